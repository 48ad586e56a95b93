//! RangeIndex - point/offset to link range resolution

use super::geometry::Point;
use super::TextLayout;
use crate::error::LabelResult;
use crate::text::LinkRange;

/// Detected ranges of the current display text, in aggregation order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RangeIndex {
    ranges: Vec<LinkRange>,
    /// Display text length in UTF-16 units
    text_len: usize,
}

impl RangeIndex {
    pub fn new(ranges: Vec<LinkRange>, text_len: usize) -> Self {
        Self { ranges, text_len }
    }

    pub fn ranges(&self) -> &[LinkRange] {
        &self.ranges
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// First range whose half-open interval holds `offset`
    pub fn link_at_offset(&self, offset: usize) -> Option<&LinkRange> {
        if offset >= self.text_len {
            return None;
        }
        self.ranges.iter().find(|link| link.contains(offset))
    }

    /// Link under `point` given in label space
    ///
    /// `origin` is the glyph drawing origin; the point is moved into text
    /// container space before querying the layout. A point outside the
    /// line fragment of its nearest character hits nothing.
    pub fn link_at_point(&self, layout: &dyn TextLayout, point: Point, origin: Point) -> LabelResult<Option<&LinkRange>> {
        if self.text_len == 0 {
            return Ok(None);
        }

        let location = point.offset_by(-origin.x, -origin.y);
        let offset = layout.offset_for_point(location)?;
        if offset >= self.text_len {
            return Ok(None);
        }

        let line = layout.line_fragment_rect(offset)?;
        if !line.contains(location) {
            return Ok(None);
        }

        Ok(self.link_at_offset(offset))
    }
}
