//! Link categories, detection options and detected link ranges

use serde::{Deserialize, Serialize};

use super::range::TextRange;

// ==================== LINK TYPE ====================

/// Category of a detected link
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkType {
    /// Usernames starting with "@"
    UserHandle,
    /// Hashtags starting with "#"
    Hashtag,
    /// http(s):// and www. links
    #[serde(rename = "URL")]
    Url,
    /// Markdown-style `[label](payload)` links; the payload is an opaque
    /// instruction for the host (open menu, open modal, ...)
    Action,
}

impl LinkType {
    /// Every link type, in attribute-table build order
    pub const ALL: [LinkType; 4] = [
        LinkType::Action,
        LinkType::Hashtag,
        LinkType::Url,
        LinkType::UserHandle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkType::UserHandle => "user_handle",
            LinkType::Hashtag => "hashtag",
            LinkType::Url => "url",
            LinkType::Action => "action",
        }
    }

    /// Numeric code used by the JS bridge
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LinkType::UserHandle),
            1 => Some(LinkType::Hashtag),
            2 => Some(LinkType::Url),
            3 => Some(LinkType::Action),
            _ => None,
        }
    }
}

// ==================== DETECTION OPTION ====================

/// Which link categories to detect
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LinkTypeOption {
    /// Detection disabled entirely
    None,
    UserHandle,
    Hashtag,
    #[serde(rename = "URL")]
    Url,
    Action,
    /// Every category, concatenated as Action, UserHandle, Hashtag, URL
    #[default]
    All,
}

impl LinkTypeOption {
    /// Link types to scan for, in output order
    pub fn link_types(&self) -> &'static [LinkType] {
        match self {
            LinkTypeOption::None => &[],
            LinkTypeOption::UserHandle => &[LinkType::UserHandle],
            LinkTypeOption::Hashtag => &[LinkType::Hashtag],
            LinkTypeOption::Url => &[LinkType::Url],
            LinkTypeOption::Action => &[LinkType::Action],
            LinkTypeOption::All => &[
                LinkType::Action,
                LinkType::UserHandle,
                LinkType::Hashtag,
                LinkType::Url,
            ],
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, LinkTypeOption::None)
    }

    /// Numeric code used by the JS bridge
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(LinkTypeOption::None),
            1 => Some(LinkTypeOption::UserHandle),
            2 => Some(LinkTypeOption::Hashtag),
            3 => Some(LinkTypeOption::Url),
            4 => Some(LinkTypeOption::Action),
            5 => Some(LinkTypeOption::All),
            _ => None,
        }
    }
}

// ==================== LINK RANGE ====================

/// A detected link over the display text
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LinkRange {
    #[serde(rename = "type")]
    pub link_type: LinkType,
    pub range: TextRange,
    /// Matched literal for handles/hashtags/URLs, the payload for markdown links
    pub link: String,
}

impl LinkRange {
    pub fn new(link_type: LinkType, range: TextRange, link: impl Into<String>) -> Self {
        Self {
            link_type,
            range,
            link: link.into(),
        }
    }

    pub fn contains(&self, offset: usize) -> bool {
        self.range.contains(offset)
    }
}

// ==================== TESTS ====================
