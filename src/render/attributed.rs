//! AttributedText - display text + attribute runs handed to the renderer
//!
//! Runs are stored in application order. When two runs set the same key at
//! one offset, the later run wins, matching "add attributes" semantics of
//! platform attributed strings.

use serde::{Deserialize, Serialize};

use crate::error::LabelResult;
use crate::style::{AttributeKey, AttributeValue, LineBreakMode, LinkAttributes};
use crate::text::{utf16_len, TextRange};

/// Attributes applied over one range
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AttributeRun {
    pub range: TextRange,
    pub attributes: Vec<AttributeValue>,
}

impl AttributeRun {
    fn get(&self, key: AttributeKey) -> Option<&AttributeValue> {
        self.attributes.iter().rev().find(|a| a.key() == key)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct AttributedText {
    text: String,
    /// Length in UTF-16 units
    length: usize,
    runs: Vec<AttributeRun>,
}

impl AttributedText {
    /// Whole text styled with `base`
    pub fn new(text: impl Into<String>, base: &LinkAttributes) -> Self {
        let text = text.into();
        let length = utf16_len(&text);
        let mut attributed = Self {
            text,
            length,
            runs: Vec::new(),
        };
        let full = attributed.full_range();
        attributed.push_run(full, base.to_attributes());
        attributed
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in UTF-16 units
    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn runs(&self) -> &[AttributeRun] {
        &self.runs
    }

    pub fn full_range(&self) -> TextRange {
        TextRange::new(0, self.length)
    }

    fn check(&self, range: TextRange) -> LabelResult<()> {
        TextRange::checked(range.start, range.length, self.length).map(|_| ())
    }

    fn push_run(&mut self, range: TextRange, attributes: Vec<AttributeValue>) {
        if range.is_empty() || attributes.is_empty() {
            return;
        }
        self.runs.push(AttributeRun { range, attributes });
    }

    /// Layer `attributes` over `range`
    pub fn add_attributes(&mut self, range: TextRange, attributes: Vec<AttributeValue>) -> LabelResult<()> {
        self.check(range)?;
        self.push_run(range, attributes);
        Ok(())
    }

    pub fn add_attribute(&mut self, range: TextRange, attribute: AttributeValue) -> LabelResult<()> {
        self.add_attributes(range, vec![attribute])
    }

    /// Remove every value of `key` inside `range`, splitting runs at the edges
    pub fn remove_attribute(&mut self, key: AttributeKey, range: TextRange) -> LabelResult<()> {
        self.check(range)?;
        if range.is_empty() {
            return Ok(());
        }

        let mut runs = Vec::with_capacity(self.runs.len() + 2);
        for run in self.runs.drain(..) {
            if !run.range.intersects(&range) || run.get(key).is_none() {
                runs.push(run);
                continue;
            }

            if run.range.start < range.start {
                runs.push(AttributeRun {
                    range: TextRange::new(run.range.start, range.start - run.range.start),
                    attributes: run.attributes.clone(),
                });
            }

            let overlap_start = run.range.start.max(range.start);
            let overlap_end = run.range.end().min(range.end());
            let remaining: Vec<AttributeValue> = run.attributes.iter().filter(|a| a.key() != key).cloned().collect();
            if !remaining.is_empty() {
                runs.push(AttributeRun {
                    range: TextRange::new(overlap_start, overlap_end - overlap_start),
                    attributes: remaining,
                });
            }

            if run.range.end() > range.end() {
                runs.push(AttributeRun {
                    range: TextRange::new(range.end(), run.range.end() - range.end()),
                    attributes: run.attributes,
                });
            }
        }
        self.runs = runs;
        Ok(())
    }

    /// Effective value of `key` at `offset`
    pub fn attribute_at(&self, key: AttributeKey, offset: usize) -> Option<&AttributeValue> {
        self.run_with(key, offset).and_then(|run| run.get(key))
    }

    /// Effective attributes at `offset`, one per key
    pub fn attributes_at(&self, offset: usize) -> Vec<AttributeValue> {
        let mut resolved: Vec<AttributeValue> = Vec::new();
        for run in self.runs.iter().filter(|r| r.range.contains(offset)) {
            for attr in &run.attributes {
                match resolved.iter_mut().find(|a| a.key() == attr.key()) {
                    Some(slot) => *slot = attr.clone(),
                    None => resolved.push(attr.clone()),
                }
            }
        }
        resolved
    }

    /// Last-applied run at `offset` that sets `key`
    fn run_with(&self, key: AttributeKey, offset: usize) -> Option<&AttributeRun> {
        self.runs
            .iter()
            .rev()
            .find(|run| run.range.contains(offset) && run.get(key).is_some())
    }

    /// Force word wrapping on the paragraph style found at offset 0
    pub fn sanitize(&mut self) {
        if self.is_empty() {
            return;
        }
        let Some(AttributeValue::ParagraphStyle(paragraph)) = self.attribute_at(AttributeKey::ParagraphStyle, 0) else {
            return;
        };
        let mut paragraph = paragraph.clone();
        paragraph.line_break_mode = LineBreakMode::WordWrap;
        let full = self.full_range();
        self.push_run(full, vec![AttributeValue::ParagraphStyle(paragraph)]);
    }

    /// False when `offset` sits inside a link-marked range, after its first char
    pub fn should_hyphenate_before(&self, offset: usize) -> bool {
        match self.run_with(AttributeKey::Link, offset) {
            Some(run) => !(offset > run.range.start && offset <= run.range.end()),
            None => true,
        }
    }
}

// ==================== TESTS ====================
