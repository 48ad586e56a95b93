//! LinkAttributes - strongly typed per-link style record
//!
//! Every field is optional. `to_attributes()` materializes only the fields
//! that are set, as a flat list of keyed values the renderer consumes.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use super::color::Color;
use crate::layout::Size;

// ==================== STYLE VALUES ====================

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Font {
    pub family: String,
    /// Point size
    pub size: f32,
}

impl Font {
    pub const SYSTEM_FAMILY: &'static str = "system-ui";
    pub const SYSTEM_SIZE: f32 = 17.0;

    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    pub fn system(size: f32) -> Self {
        Self::new(Self::SYSTEM_FAMILY, size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::system(Self::SYSTEM_SIZE)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Shadow {
    pub color: Option<Color>,
    pub offset: Size,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justified,
    #[default]
    Natural,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineBreakMode {
    #[default]
    WordWrap,
    CharWrap,
    Clip,
    TruncateHead,
    TruncateTail,
    TruncateMiddle,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ParagraphStyle {
    pub alignment: TextAlignment,
    pub line_height_multiple: f32,
    #[serde(default)]
    pub line_break_mode: LineBreakMode,
}

impl Default for ParagraphStyle {
    fn default() -> Self {
        Self {
            alignment: TextAlignment::Natural,
            line_height_multiple: 1.0,
            line_break_mode: LineBreakMode::WordWrap,
        }
    }
}

// ==================== ATTRIBUTE RECORD ====================

/// Style applied to a link range (or, for the base style, the whole text)
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LinkAttributes {
    #[serde(default)]
    pub foreground_color: Option<Color>,
    #[serde(default)]
    pub font: Option<Font>,
    #[serde(default)]
    pub shadow: Option<Shadow>,
    #[serde(default)]
    pub paragraph_style: Option<ParagraphStyle>,
}

static FALLBACK: OnceLock<LinkAttributes> = OnceLock::new();

impl LinkAttributes {
    /// Shared attributes for link types without a table entry:
    /// link blue foreground, nothing else set
    pub fn fallback() -> &'static LinkAttributes {
        FALLBACK.get_or_init(|| LinkAttributes {
            foreground_color: Some(Color::LINK_BLUE),
            ..LinkAttributes::default()
        })
    }

    pub fn with_foreground_color(mut self, color: Color) -> Self {
        self.foreground_color = Some(color);
        self
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = Some(font);
        self
    }

    /// Set fields only, in a fixed key order
    pub fn to_attributes(&self) -> Vec<AttributeValue> {
        let mut attributes = Vec::with_capacity(4);
        if let Some(color) = self.foreground_color {
            attributes.push(AttributeValue::ForegroundColor(color));
        }
        if let Some(font) = &self.font {
            attributes.push(AttributeValue::Font(font.clone()));
        }
        if let Some(shadow) = &self.shadow {
            attributes.push(AttributeValue::Shadow(shadow.clone()));
        }
        if let Some(paragraph) = &self.paragraph_style {
            attributes.push(AttributeValue::ParagraphStyle(paragraph.clone()));
        }
        attributes
    }
}

// ==================== RENDERER FORM ====================

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttributeKey {
    ForegroundColor,
    Font,
    Shadow,
    ParagraphStyle,
    /// Selection highlight
    BackgroundColor,
    /// Native link marker carrying the URL
    Link,
}

/// One keyed attribute as handed to the renderer
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "key", content = "value")]
pub enum AttributeValue {
    ForegroundColor(Color),
    Font(Font),
    Shadow(Shadow),
    ParagraphStyle(ParagraphStyle),
    BackgroundColor(Color),
    Link(String),
}

impl AttributeValue {
    pub fn key(&self) -> AttributeKey {
        match self {
            AttributeValue::ForegroundColor(_) => AttributeKey::ForegroundColor,
            AttributeValue::Font(_) => AttributeKey::Font,
            AttributeValue::Shadow(_) => AttributeKey::Shadow,
            AttributeValue::ParagraphStyle(_) => AttributeKey::ParagraphStyle,
            AttributeValue::BackgroundColor(_) => AttributeKey::BackgroundColor,
            AttributeValue::Link(_) => AttributeKey::Link,
        }
    }
}

// ==================== TESTS ====================
