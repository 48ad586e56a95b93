//! LabelConfig - detection, layout and highlight settings of a label

use serde::{Deserialize, Serialize};

use crate::error::LabelResult;
use crate::scanner::{IgnoredKeywords, LabelOffsets};
use crate::style::{Color, StyleProperties};
use crate::text::LinkTypeOption;

/// Configuration for a `RichLabel`
///
/// Every field is optional when deserializing; missing fields take the
/// defaults below.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LabelConfig {
    #[serde(default)]
    pub link_detection: LinkTypeOption,
    #[serde(default = "default_true")]
    pub automatic_link_detection: bool,
    /// Add a native link marker to URL ranges
    #[serde(default)]
    pub system_url_style: bool,
    #[serde(default = "default_line_height_multiple")]
    pub line_height_multiple: f32,
    /// Upward shift applied to multi-line text
    #[serde(default = "default_top_offset")]
    pub top_offset: f32,
    #[serde(default = "default_true")]
    pub align_text_to_top: bool,
    /// 0 = unlimited
    #[serde(default)]
    pub number_of_lines: usize,
    #[serde(default = "default_selected_background")]
    pub selected_link_background_color: Option<Color>,
    #[serde(default)]
    pub drag_threshold: f32,
    #[serde(default)]
    pub ignored_keywords: Vec<String>,
    #[serde(default)]
    pub label_offsets: LabelOffsets,
    #[serde(default)]
    pub style: StyleProperties,
}

fn default_true() -> bool { true }

fn default_line_height_multiple() -> f32 { 1.0 }

fn default_top_offset() -> f32 { 4.0 }

fn default_selected_background() -> Option<Color> {
    Some(Color::from_white(0.95, 1.0))
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            link_detection: LinkTypeOption::All,
            automatic_link_detection: true,
            system_url_style: false,
            line_height_multiple: default_line_height_multiple(),
            top_offset: default_top_offset(),
            align_text_to_top: true,
            number_of_lines: 0,
            selected_link_background_color: default_selected_background(),
            drag_threshold: 0.0,
            ignored_keywords: Vec::new(),
            label_offsets: LabelOffsets::Exact,
            style: StyleProperties::default(),
        }
    }
}

impl LabelConfig {
    pub fn from_json(json: &str) -> LabelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn ignored(&self) -> IgnoredKeywords {
        self.ignored_keywords.iter().collect()
    }

    /// Style properties with this config's line height multiple applied
    pub fn style_properties(&self) -> StyleProperties {
        StyleProperties {
            line_height_multiple: self.line_height_multiple,
            ..self.style.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabelError;

    #[test]
    fn test_defaults() {
        let config = LabelConfig::default();
        assert_eq!(config.link_detection, LinkTypeOption::All);
        assert!(config.automatic_link_detection);
        assert!(!config.system_url_style);
        assert_eq!(config.top_offset, 4.0);
        assert_eq!(config.selected_link_background_color, Some(Color::rgb(242, 242, 242)));
        assert_eq!(config.label_offsets, LabelOffsets::Exact);
    }

    #[test]
    fn test_empty_json_matches_default() {
        assert_eq!(LabelConfig::from_json("{}").unwrap(), LabelConfig::default());
    }

    #[test]
    fn test_partial_json() {
        let config = LabelConfig::from_json(
            r##"{"link_detection": "Hashtag", "ignored_keywords": ["#Skip"], "style": {"enabled": false}}"##,
        )
        .unwrap();
        assert_eq!(config.link_detection, LinkTypeOption::Hashtag);
        assert!(config.ignored().is_ignored("#skip"));
        assert!(!config.style.enabled);
        assert_eq!(config.top_offset, 4.0);
    }

    #[test]
    fn test_null_highlight_color_disables_highlight() {
        let config = LabelConfig::from_json(r#"{"selected_link_background_color": null}"#).unwrap();
        assert_eq!(config.selected_link_background_color, None);
    }

    #[test]
    fn test_invalid_json() {
        let err = LabelConfig::from_json(r#"{"top_offset": "high"}"#).unwrap_err();
        assert!(matches!(err, LabelError::InvalidConfig(_)));
    }

    #[test]
    fn test_line_height_flows_into_style() {
        let config = LabelConfig {
            line_height_multiple: 1.5,
            ..LabelConfig::default()
        };
        assert_eq!(config.style_properties().line_height_multiple, 1.5);
    }
}
