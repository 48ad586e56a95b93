//! Pattern matchers for user handles, hashtags and URLs
//!
//! Each matcher is a pure `text -> Vec<LinkRange>` scan in left-to-right,
//! non-overlapping match order. Ranges are in UTF-16 units of `text`.
//!
//! Rust regex has no lookbehind, so the "preceded by whitespace or start of
//! text" rule is a non-capturing prefix and the link is capture group 1.
//! The prefix only ever consumes whitespace, which no link body can contain,
//! so adjacent links (`@a @b`) still match back to back.

use regex::Regex;
use std::sync::LazyLock;

use crate::text::{LinkRange, LinkType, Utf16Index};

// ==================== PATTERNS ====================

/// @handle - Group 1: the handle including "@"
static USER_HANDLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(@\w*[A-Za-z0-9_]+\w*)").expect("user handle pattern is valid")
});

/// #hashtag or #multi-word-tag - Group 1: the tag including "#"
static HASHTAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|\s)(#\w*[A-Za-z0-9_-]+\w*)").expect("hashtag pattern is valid")
});

/// http://, https:// or www. up to the last word boundary before whitespace
static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:https?://|www\.)\S+\b").expect("url pattern is valid")
});

// ==================== MATCHERS ====================

/// Scan for `@handle` tokens
pub fn scan_user_handles(text: &str, index: &Utf16Index) -> Vec<LinkRange> {
    scan_group(&USER_HANDLE_RE, LinkType::UserHandle, text, index)
}

/// Scan for `#hashtag` tokens
pub fn scan_hashtags(text: &str, index: &Utf16Index) -> Vec<LinkRange> {
    scan_group(&HASHTAG_RE, LinkType::Hashtag, text, index)
}

/// Scan for URLs
pub fn scan_urls(text: &str, index: &Utf16Index) -> Vec<LinkRange> {
    URL_RE
        .find_iter(text)
        .filter_map(|m| {
            let range = index.range_from_bytes(m.range())?;
            Some(LinkRange::new(LinkType::Url, range, m.as_str()))
        })
        .collect()
}

fn scan_group(re: &Regex, link_type: LinkType, text: &str, index: &Utf16Index) -> Vec<LinkRange> {
    re.captures_iter(text)
        .filter_map(|cap| {
            let m = cap.get(1)?;
            let range = index.range_from_bytes(m.range())?;
            Some(LinkRange::new(link_type, range, m.as_str()))
        })
        .collect()
}

// ==================== TESTS ====================
