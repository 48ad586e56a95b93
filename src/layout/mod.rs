//! Layout collaborator seam, hit-testing and touch tracking
//!
//! Glyph layout lives outside this crate. The engine only asks a
//! `TextLayout` for the character offset under a point, the line fragment
//! rect around an offset and the used size of the laid-out text.

pub mod geometry;
pub mod hit;
pub mod touch;

pub use geometry::*;
pub use hit::*;
pub use touch::*;

use crate::error::LabelResult;

/// Height above which text counts as more than one line of system text
pub const SINGLE_LINE_HEIGHT: f32 = 17.0;

/// External layout engine queried by the label
pub trait TextLayout {
    /// Nearest character offset (UTF-16) for a point in text-container space
    fn offset_for_point(&self, point: Point) -> LabelResult<usize>;

    /// Rect of the line fragment holding `offset`
    fn line_fragment_rect(&self, offset: usize) -> LabelResult<Rect>;

    /// Size used by the laid-out text when limited to `max_lines` (0 = unlimited)
    fn used_bounds(&self, max_lines: usize) -> LabelResult<Size>;
}

/// Drawing origin of the glyphs inside the label
///
/// Multi-line text is pulled up by `top_offset` once its used height
/// exceeds a single line of `line_height`.
pub fn glyph_origin(layout: &dyn TextLayout, max_lines: usize, line_height: f32, top_offset: f32) -> LabelResult<Point> {
    let used = layout.used_bounds(max_lines)?.ceil();
    if used.height > line_height {
        Ok(Point::new(0.0, -top_offset))
    } else {
        Ok(Point::ZERO)
    }
}

/// Rect the text occupies when laid out inside `bounds`
///
/// Taller-than-one-line text is centered vertically when it fits, or
/// shifted up by `top_offset` when it overflows.
pub fn text_rect_for_bounds(
    layout: &dyn TextLayout,
    bounds: Rect,
    number_of_lines: usize,
    top_offset: f32,
) -> LabelResult<Rect> {
    let used = layout.used_bounds(number_of_lines)?.ceil();
    let mut rect = Rect {
        origin: bounds.origin,
        size: used,
    };

    if used.height > SINGLE_LINE_HEIGHT {
        let offset_y = if used.height < bounds.size.height {
            (bounds.size.height - used.height) / 2.0
        } else {
            -top_offset
        };
        rect.origin = rect.origin.offset_by(0.0, offset_y);
    }

    Ok(rect)
}
