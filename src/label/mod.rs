//! RichLabel - the link detection and attribution engine behind a label view
//!
//! Every mutation that affects rendering rebuilds its dependents
//! synchronously before returning. Rebuilds compute a complete new
//! attributed text and range index and then swap them in, so readers never
//! observe a half-built state.
//!
//! # Pipeline
//! raw text → markdown strip → base attributes → sanitize → detect
//! → per-type attributes → (URL link markers) → swap → redraw request

pub mod events;

pub use events::*;

use crate::config::LabelConfig;
use crate::error::LabelResult;
use crate::layout::{
    glyph_origin, text_rect_for_bounds, Point, RangeIndex, Rect, TextLayout, TouchEnd, TouchState, TouchTracker,
};
use crate::render::AttributedText;
use crate::scanner::{rewrite, DetectionStats, IgnoredKeywords, LinkDetector, MarkdownRewrite};
use crate::style::{
    AttributeKey, AttributeTable, AttributeValue, Color, Font, LinkAttributes, StyleProperties, StyleSnapshot,
};
use crate::text::{LinkRange, LinkType, LinkTypeOption, TextRange};


// ==================== MAIN IMPLEMENTATION ====================

pub struct RichLabel {
    config: LabelConfig,
    raw_text: String,
    detector: LinkDetector,
    snapshot: StyleSnapshot,
    table: AttributeTable,
    attributed: AttributedText,
    index: RangeIndex,
    stats: DetectionStats,
    selected_range: Option<TextRange>,
    touch: TouchTracker,
    needs_display: bool,
    delegate: Option<Box<dyn LabelDelegate>>,
}

impl Default for RichLabel {
    fn default() -> Self {
        Self::new(LabelConfig::default())
    }
}

impl RichLabel {
    pub fn new(config: LabelConfig) -> Self {
        let snapshot = StyleSnapshot::from_properties(&config.style_properties());
        let table = AttributeTable::from_snapshot(&snapshot);
        let mut label = Self {
            detector: detector_for(&config),
            touch: TouchTracker::new(config.drag_threshold),
            config,
            raw_text: String::new(),
            snapshot,
            table,
            attributed: AttributedText::default(),
            index: RangeIndex::default(),
            stats: DetectionStats::default(),
            selected_range: None,
            needs_display: false,
            delegate: None,
        };
        label.rebuild();
        label
    }

    pub fn with_text(mut self, raw: &str) -> Self {
        self.set_text(raw);
        self
    }

    // ==================== ACCESSORS ====================

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Text as set by the host, markdown links included
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Display text (markdown delimiters stripped)
    pub fn text(&self) -> &str {
        self.attributed.text()
    }

    pub fn attributed_text(&self) -> &AttributedText {
        &self.attributed
    }

    pub fn link_ranges(&self) -> &[LinkRange] {
        self.index.ranges()
    }

    pub fn stats(&self) -> &DetectionStats {
        &self.stats
    }

    pub fn style_snapshot(&self) -> &StyleSnapshot {
        &self.snapshot
    }

    pub fn selected_range(&self) -> Option<TextRange> {
        self.selected_range
    }

    pub fn touch_state(&self) -> &TouchState {
        self.touch.state()
    }

    pub fn link_detection(&self) -> LinkTypeOption {
        self.config.link_detection
    }

    pub fn ignored_keywords(&self) -> &IgnoredKeywords {
        self.detector.ignored()
    }

    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    /// Read and clear the pending redraw request
    pub fn take_needs_display(&mut self) -> bool {
        std::mem::take(&mut self.needs_display)
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn LabelDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn clear_delegate(&mut self) {
        self.delegate = None;
    }

    // ==================== TEXT & DETECTION ====================

    pub fn set_text(&mut self, raw: &str) {
        self.raw_text = raw.to_string();
        self.rebuild();
    }

    pub fn set_link_detection(&mut self, option: LinkTypeOption) {
        self.config.link_detection = option;
        self.detector = detector_for(&self.config);
        self.rebuild();
    }

    pub fn set_automatic_link_detection(&mut self, enabled: bool) {
        self.config.automatic_link_detection = enabled;
        self.rebuild();
    }

    pub fn set_system_url_style(&mut self, enabled: bool) {
        self.config.system_url_style = enabled;
        self.rebuild();
    }

    pub fn set_ignored_keywords<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ignored: IgnoredKeywords = words.into_iter().collect();
        self.config.ignored_keywords = ignored.into();
        self.detector = detector_for(&self.config);
        self.rebuild();
    }

    /// Line height, detection switch and detection types with one rebuild
    pub fn set_up(&mut self, line_height_multiple: f32, automatic_link_detection: bool, link_detection: LinkTypeOption) {
        self.config.line_height_multiple = line_height_multiple;
        self.config.automatic_link_detection = automatic_link_detection;
        self.config.link_detection = link_detection;
        self.detector = detector_for(&self.config);
        self.restyle();
    }

    // ==================== STYLE ====================

    pub fn set_style(&mut self, style: StyleProperties) {
        self.config.line_height_multiple = style.line_height_multiple;
        self.config.style = style;
        self.restyle();
    }

    pub fn set_font(&mut self, font: Font) {
        self.config.style.font = font;
        self.restyle();
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.config.style.text_color = color;
        self.restyle();
    }

    pub fn set_highlighted_text_color(&mut self, color: Option<Color>) {
        self.config.style.highlighted_text_color = color;
        self.restyle();
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.config.style.enabled = enabled;
        self.restyle();
    }

    pub fn set_highlighted(&mut self, highlighted: bool) {
        self.config.style.highlighted = highlighted;
        self.restyle();
    }

    pub fn set_line_height_multiple(&mut self, multiple: f32) {
        self.config.line_height_multiple = multiple;
        self.restyle();
    }

    pub fn set_selected_link_background_color(&mut self, color: Option<Color>) {
        self.config.selected_link_background_color = color;
        self.restyle();
    }

    pub fn set_top_offset(&mut self, top_offset: f32) {
        self.config.top_offset = top_offset;
        self.needs_display = true;
    }

    pub fn set_align_text_to_top(&mut self, align: bool) {
        self.config.align_text_to_top = align;
        self.needs_display = true;
    }

    pub fn set_number_of_lines(&mut self, lines: usize) {
        self.config.number_of_lines = lines;
        self.needs_display = true;
    }

    pub fn set_drag_threshold(&mut self, threshold: f32) {
        self.config.drag_threshold = threshold;
        self.touch.set_threshold(threshold);
    }

    // ==================== ATTRIBUTE TABLE ====================

    /// Table entry, or the shared fallback attributes
    pub fn attributes_for_type(&self, link_type: LinkType) -> &LinkAttributes {
        self.table.attributes_for_type(link_type)
    }

    /// Upsert (`Some`) or clear (`None`) a type's attributes, then rebuild
    pub fn set_attributes_for_type(&mut self, link_type: LinkType, attributes: Option<LinkAttributes>) {
        self.table.set_attributes_for_type(link_type, attributes);
        self.rebuild();
    }

    /// Theme every non-Action entry with `font` and `color`, then rebuild
    pub fn override_non_action_attributes(&mut self, font: &Font, color: Color) {
        self.table.override_non_action(font, color);
        self.rebuild();
    }

    // ==================== REBUILD ====================

    /// New style snapshot and attribute table, then a full rebuild
    ///
    /// Per-type overrides are discarded: the table is regenerated from the
    /// new snapshot.
    fn restyle(&mut self) {
        self.snapshot = StyleSnapshot::from_properties(&self.config.style_properties());
        self.table = AttributeTable::from_snapshot(&self.snapshot);
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let rewritten = if self.raw_text.is_empty() {
            MarkdownRewrite::default()
        } else {
            rewrite(&self.raw_text)
        };

        let mut attributed = AttributedText::new(rewritten.display.as_str(), &self.snapshot.base);
        attributed.sanitize();

        let detection = if self.config.automatic_link_detection && !attributed.is_empty() {
            self.detector.detect_rewritten(&self.raw_text, &rewritten)
        } else {
            Default::default()
        };

        for link in &detection.ranges {
            self.apply_link_attributes(&mut attributed, link);
        }

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(
            &format!(
                "[RichLabel] Rebuilt: {} links ({} actions, {} handles, {} hashtags, {} urls, {} ignored) in {:.2}ms",
                detection.stats.link_count(),
                detection.stats.action_count,
                detection.stats.user_handle_count,
                detection.stats.hashtag_count,
                detection.stats.url_count,
                detection.stats.ignored_count,
                detection.stats.total_time_ms
            )
            .into(),
        );

        let index = RangeIndex::new(detection.ranges, attributed.len());

        self.attributed = attributed;
        self.index = index;
        self.stats = detection.stats;
        self.selected_range = None;
        self.needs_display = true;
    }

    fn apply_link_attributes(&self, attributed: &mut AttributedText, link: &LinkRange) {
        let mut attributes = self.table.attributes_for_type(link.link_type).to_attributes();
        if self.config.system_url_style && link.link_type == LinkType::Url {
            attributes.push(AttributeValue::Link(link.link.clone()));
        }

        if let Err(_e) = attributed.add_attributes(link.range, attributes) {
            #[cfg(target_arch = "wasm32")]
            web_sys::console::warn_1(&format!("[RichLabel] Skipping {} link: {}", link.link_type.as_str(), _e).into());
        }
    }

    // ==================== SELECTION ====================

    /// Move the selection highlight
    ///
    /// The previous range's background is removed; the new one gets the
    /// configured highlight color, if any. Always requests a redraw.
    pub fn set_selected_range(&mut self, range: Option<TextRange>) {
        let range = range.filter(|r| !r.is_empty());

        if let Some(previous) = self.selected_range {
            if previous.start < self.attributed.len() && Some(previous) != range {
                let clamped = TextRange::new(previous.start, previous.length.min(self.attributed.len() - previous.start));
                if let Err(_e) = self.attributed.remove_attribute(AttributeKey::BackgroundColor, clamped) {
                    #[cfg(target_arch = "wasm32")]
                    web_sys::console::warn_1(&format!("[RichLabel] Could not clear highlight: {}", _e).into());
                }
            }
        }

        if let (Some(range), Some(color)) = (range, self.config.selected_link_background_color) {
            if let Err(_e) = self.attributed.add_attribute(range, AttributeValue::BackgroundColor(color)) {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_1(&format!("[RichLabel] Could not highlight: {}", _e).into());
            }
        }

        self.selected_range = range;
        self.needs_display = true;
    }

    // ==================== LAYOUT & HIT-TESTING ====================

    /// Where glyphs are drawn inside the label
    pub fn glyph_origin(&self, layout: &dyn TextLayout) -> LabelResult<Point> {
        if !self.config.align_text_to_top {
            return Ok(Point::ZERO);
        }
        glyph_origin(
            layout,
            self.config.number_of_lines,
            self.snapshot.line_height(),
            self.config.top_offset,
        )
    }

    pub fn text_rect_for_bounds(&self, layout: &dyn TextLayout, bounds: Rect, number_of_lines: usize) -> LabelResult<Rect> {
        text_rect_for_bounds(layout, bounds, number_of_lines, self.config.top_offset)
    }

    /// Link under `point` (label space), if any
    ///
    /// Layout failures count as a miss.
    pub fn link_at_point(&self, layout: &dyn TextLayout, point: Point) -> Option<LinkRange> {
        if self.attributed.is_empty() {
            return None;
        }

        let hit = self
            .glyph_origin(layout)
            .and_then(|origin| self.index.link_at_point(layout, point, origin).map(|hit| hit.cloned()));

        match hit {
            Ok(hit) => hit,
            Err(_e) => {
                #[cfg(target_arch = "wasm32")]
                web_sys::console::warn_1(&format!("[RichLabel] Hit-test failed: {}", _e).into());
                None
            }
        }
    }

    pub fn link_at_offset(&self, offset: usize) -> Option<&LinkRange> {
        self.index.link_at_offset(offset)
    }

    /// False inside link-marked ranges so links are never hyphenated
    pub fn should_hyphenate_before(&self, offset: usize) -> bool {
        self.attributed.should_hyphenate_before(offset)
    }

    // ==================== TOUCH HANDLING ====================

    /// Touch down; returns true when the touch landed on a link
    ///
    /// A miss clears the selection and leaves the touch to the host's
    /// default handling.
    pub fn touch_began(&mut self, layout: &dyn TextLayout, point: Point) -> bool {
        let hit = self.link_at_point(layout, point);
        let selection = hit.as_ref().map(|link| link.range);
        self.touch.began(point, hit);
        self.set_selected_range(selection);
        selection.is_some()
    }

    /// Returns true once the gesture is a drag
    pub fn touch_moved(&mut self, point: Point) -> bool {
        self.touch.moved(point)
    }

    /// Touch up: re-hit-test and emit the tap event unless the gesture dragged
    pub fn touch_ended(&mut self, layout: &dyn TextLayout, point: Point) -> Option<LabelEvent> {
        let event = match self.touch.ended(point) {
            TouchEnd::Dragged => None,
            TouchEnd::Released(at) => Some(LabelEvent::for_tap(self.link_at_point(layout, at))),
        };

        if let (Some(event), Some(delegate)) = (&event, self.delegate.as_mut()) {
            event.dispatch(&mut **delegate);
        }

        self.set_selected_range(None);
        event
    }

    pub fn touch_cancelled(&mut self) {
        self.touch.cancelled();
        self.set_selected_range(None);
    }
}

fn detector_for(config: &LabelConfig) -> LinkDetector {
    LinkDetector::new(config.link_detection)
        .with_ignored(config.ignored())
        .with_label_offsets(config.label_offsets)
}
