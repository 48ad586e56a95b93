//! TextRange + UTF-16 offset index
//!
//! Ranges are expressed in UTF-16 code units so they line up with renderers
//! (and JS strings) that index text the same way. Regex matching works on
//! UTF-8 byte offsets; `Utf16Index` converts between the two in O(1).

use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{LabelError, LabelResult};

// ==================== TEXT RANGE ====================

/// Half-open span `[start, start + length)` in UTF-16 code units
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: usize,
    pub length: usize,
}

impl TextRange {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Build a range, checking it fits inside a text of `text_len` units
    pub fn checked(start: usize, length: usize, text_len: usize) -> LabelResult<Self> {
        let range = Self::new(start, length);
        if range.fits(text_len) {
            Ok(range)
        } else {
            Err(LabelError::RangeOutOfBounds { start, length, text_len })
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Half-open containment: `end()` itself is outside
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end()
    }

    pub fn intersects(&self, other: &TextRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    pub fn fits(&self, text_len: usize) -> bool {
        self.end() <= text_len
    }
}

// ==================== UTF-16 INDEX ====================

/// Bidirectional byte <-> UTF-16 offset table for one string
///
/// Byte offsets that fall inside a multi-byte char resolve to the char start,
/// and the trailing half of a surrogate pair resolves to the char start too.
#[derive(Clone, Debug)]
pub struct Utf16Index {
    utf16_at_byte: Vec<usize>,
    byte_at_utf16: Vec<usize>,
}

impl Utf16Index {
    pub fn new(text: &str) -> Self {
        let mut utf16_at_byte = Vec::with_capacity(text.len() + 1);
        let mut byte_at_utf16 = Vec::with_capacity(text.len() + 1);
        let mut units = 0;

        for (byte, c) in text.char_indices() {
            for _ in 0..c.len_utf8() {
                utf16_at_byte.push(units);
            }
            for _ in 0..c.len_utf16() {
                byte_at_utf16.push(byte);
            }
            units += c.len_utf16();
        }

        utf16_at_byte.push(units);
        byte_at_utf16.push(text.len());

        Self {
            utf16_at_byte,
            byte_at_utf16,
        }
    }

    /// Length of the text in UTF-16 code units
    pub fn len(&self) -> usize {
        self.byte_at_utf16.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn byte_to_utf16(&self, byte: usize) -> Option<usize> {
        self.utf16_at_byte.get(byte).copied()
    }

    pub fn utf16_to_byte(&self, offset: usize) -> Option<usize> {
        self.byte_at_utf16.get(offset).copied()
    }

    /// Convert a byte span (as produced by regex) into a `TextRange`
    pub fn range_from_bytes(&self, bytes: Range<usize>) -> Option<TextRange> {
        let start = self.byte_to_utf16(bytes.start)?;
        let end = self.byte_to_utf16(bytes.end)?;
        Some(TextRange::new(start, end.saturating_sub(start)))
    }

    /// Convert a `TextRange` back into a byte span for slicing
    pub fn byte_range(&self, range: TextRange) -> Option<Range<usize>> {
        if !range.fits(self.len()) {
            return None;
        }
        let start = self.utf16_to_byte(range.start)?;
        let end = self.utf16_to_byte(range.end())?;
        Some(start..end)
    }
}

/// Length of `text` in UTF-16 code units
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

// ==================== TESTS ====================
