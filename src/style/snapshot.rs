//! StyleSnapshot - immutable style derived from the label's style properties
//!
//! Property setters never patch attributes in place: they swap in a fresh
//! snapshot computed by `StyleSnapshot::from_properties`.

use serde::{Deserialize, Serialize};

use super::attributes::{Font, LinkAttributes, ParagraphStyle, Shadow, TextAlignment};
use super::color::Color;
use crate::layout::Size;

/// Default shadow offset when no shadow color is configured
pub const DEFAULT_SHADOW_OFFSET: Size = Size { width: 0.0, height: -1.0 };

/// Global style knobs of a label
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StyleProperties {
    pub font: Font,
    pub text_color: Color,
    pub highlighted_text_color: Option<Color>,
    pub enabled: bool,
    pub highlighted: bool,
    pub shadow_color: Option<Color>,
    pub shadow_offset: Size,
    pub alignment: TextAlignment,
    pub line_height_multiple: f32,
}

impl Default for StyleProperties {
    fn default() -> Self {
        Self {
            font: Font::default(),
            text_color: Color::BLACK,
            highlighted_text_color: None,
            enabled: true,
            highlighted: false,
            shadow_color: None,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            alignment: TextAlignment::Natural,
            line_height_multiple: 1.0,
        }
    }
}

/// Base attributes for the whole text plus the metrics layout needs
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StyleSnapshot {
    pub base: LinkAttributes,
    pub font_size: f32,
    pub line_height_multiple: f32,
}

impl StyleSnapshot {
    pub fn from_properties(props: &StyleProperties) -> Self {
        let paragraph = ParagraphStyle {
            alignment: props.alignment,
            line_height_multiple: props.line_height_multiple,
            ..ParagraphStyle::default()
        };

        Self {
            base: LinkAttributes {
                foreground_color: foreground_color(props),
                font: Some(props.font.clone()),
                shadow: Some(shadow(props)),
                paragraph_style: Some(paragraph),
            },
            font_size: props.font.size,
            line_height_multiple: props.line_height_multiple,
        }
    }

    /// Height of a single line: `ceil(font size * line height multiple)`
    pub fn line_height(&self) -> f32 {
        (self.font_size * self.line_height_multiple).ceil()
    }
}

impl Default for StyleSnapshot {
    fn default() -> Self {
        Self::from_properties(&StyleProperties::default())
    }
}

/// Disabled -> light gray, highlighted -> highlighted color (may be unset)
fn foreground_color(props: &StyleProperties) -> Option<Color> {
    if !props.enabled {
        Some(Color::LIGHT_GRAY)
    } else if props.highlighted {
        props.highlighted_text_color
    } else {
        Some(props.text_color)
    }
}

fn shadow(props: &StyleProperties) -> Shadow {
    match props.shadow_color {
        Some(color) => Shadow {
            color: Some(color),
            offset: props.shadow_offset,
        },
        None => Shadow {
            color: None,
            offset: DEFAULT_SHADOW_OFFSET,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot() {
        let snapshot = StyleSnapshot::default();
        assert_eq!(snapshot.base.foreground_color, Some(Color::BLACK));
        assert_eq!(snapshot.base.font, Some(Font::default()));
        let paragraph = snapshot.base.paragraph_style.unwrap();
        assert_eq!(paragraph.line_height_multiple, 1.0);
        assert_eq!(paragraph.alignment, TextAlignment::Natural);
    }

    #[test]
    fn test_disabled_wins_over_highlighted() {
        let props = StyleProperties {
            enabled: false,
            highlighted: true,
            highlighted_text_color: Some(Color::WHITE),
            ..StyleProperties::default()
        };
        assert_eq!(StyleSnapshot::from_properties(&props).base.foreground_color, Some(Color::LIGHT_GRAY));
    }

    #[test]
    fn test_highlighted_without_color_omits_foreground() {
        let props = StyleProperties {
            highlighted: true,
            ..StyleProperties::default()
        };
        assert_eq!(StyleSnapshot::from_properties(&props).base.foreground_color, None);
    }

    #[test]
    fn test_shadow_without_color_uses_default_offset() {
        let props = StyleProperties {
            shadow_offset: Size::new(3.0, 3.0),
            ..StyleProperties::default()
        };
        let shadow = StyleSnapshot::from_properties(&props).base.shadow.unwrap();
        assert_eq!(shadow.color, None);
        assert_eq!(shadow.offset, DEFAULT_SHADOW_OFFSET);

        let props = StyleProperties {
            shadow_color: Some(Color::BLACK),
            shadow_offset: Size::new(1.0, 2.0),
            ..StyleProperties::default()
        };
        let shadow = StyleSnapshot::from_properties(&props).base.shadow.unwrap();
        assert_eq!(shadow.color, Some(Color::BLACK));
        assert_eq!(shadow.offset, Size::new(1.0, 2.0));
    }

    #[test]
    fn test_line_height() {
        let props = StyleProperties {
            line_height_multiple: 1.2,
            ..StyleProperties::default()
        };
        // 17 * 1.2 = 20.4
        assert_eq!(StyleSnapshot::from_properties(&props).line_height(), 21.0);
    }

    #[test]
    fn test_properties_from_partial_json() {
        let props: StyleProperties = serde_json::from_str(r#"{"enabled": false}"#).unwrap();
        assert!(!props.enabled);
        assert_eq!(props.font, Font::default());
    }
}
