//! IgnoredKeywords - caller-supplied literals that must never become links
//!
//! Matching is exact equality on the lowercased literal; no substring or
//! prefix matching.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::text::LinkRange;

/// Set of lowercase keywords to drop from detection results
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct IgnoredKeywords {
    words: HashSet<String>,
}

impl IgnoredKeywords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a keyword; stored lowercased so any casing matches
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.to_lowercase())
    }

    pub fn remove(&mut self, word: &str) -> bool {
        self.words.remove(&word.to_lowercase())
    }

    pub fn clear(&mut self) {
        self.words.clear();
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// True if `literal` (lowercased) is in the set
    pub fn is_ignored(&self, literal: &str) -> bool {
        !self.words.is_empty() && self.words.contains(&literal.to_lowercase())
    }

    /// Drop every range whose link literal is ignored
    pub fn filter(&self, ranges: Vec<LinkRange>) -> Vec<LinkRange> {
        if self.words.is_empty() {
            return ranges;
        }
        ranges.into_iter().filter(|r| !self.is_ignored(&r.link)).collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoredKeywords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut keywords = Self::new();
        for word in iter {
            keywords.insert(word.as_ref());
        }
        keywords
    }
}

impl From<Vec<String>> for IgnoredKeywords {
    fn from(words: Vec<String>) -> Self {
        words.into_iter().collect()
    }
}

impl From<IgnoredKeywords> for Vec<String> {
    fn from(keywords: IgnoredKeywords) -> Self {
        let mut words: Vec<String> = keywords.words.into_iter().collect();
        words.sort();
        words
    }
}
