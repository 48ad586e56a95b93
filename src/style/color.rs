//! RGBA color

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Disabled text (two-thirds white)
    pub const LIGHT_GRAY: Color = Color::rgb(170, 170, 170);
    /// Handles, hashtags and URLs
    pub const LINK_BLUE: Color = Color::rgb(0, 120, 215);
    /// Markdown action links
    pub const ACTION_GRAY: Color = Color::rgb(144, 164, 174);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Gray level from `white` in 0.0..=1.0
    pub fn from_white(white: f32, alpha: f32) -> Self {
        let level = unit_to_byte(white);
        Self::rgba(level, level, level, unit_to_byte(alpha))
    }

    /// `#rrggbb` / `#rrggbbaa`
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_white() {
        assert_eq!(Color::from_white(0.95, 1.0), Color::rgb(242, 242, 242));
        assert_eq!(Color::from_white(2.0, -1.0), Color::rgba(255, 255, 255, 0));
    }

    #[test]
    fn test_hex() {
        assert_eq!(Color::LINK_BLUE.to_hex(), "#0078d7");
        assert_eq!(Color::rgba(1, 2, 3, 4).to_hex(), "#01020304");
    }

    #[test]
    fn test_alpha_defaults_to_opaque() {
        let color: Color = serde_json::from_str(r#"{"r": 1, "g": 2, "b": 3}"#).unwrap();
        assert_eq!(color.a, 255);
    }
}
