//! JS facade for RichLabel
//!
//! Hosts pass a layout object implementing:
//! ```javascript,ignore
//! {
//!   offsetForPoint(x, y) { return 12; },
//!   lineFragmentRect(offset) { return { x: 0, y: 0, width: 320, height: 17 }; },
//!   usedBounds(maxLines) { return { width: 300, height: 34 }; },
//! }
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::LabelConfig;
use crate::error::{LabelError, LabelResult};
use crate::label::RichLabel;
use crate::layout::{Point, Rect, Size, TextLayout};
use crate::style::{Color, Font, LinkAttributes, StyleProperties};
use crate::text::{LinkType, LinkTypeOption};

// ==================== LAYOUT BRIDGE ====================

#[wasm_bindgen]
extern "C" {
    /// Host-side layout engine (duck-typed)
    pub type JsLayout;

    #[wasm_bindgen(method, catch, structural, js_name = offsetForPoint)]
    fn js_offset_for_point(this: &JsLayout, x: f32, y: f32) -> Result<f64, JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = lineFragmentRect)]
    fn js_line_fragment_rect(this: &JsLayout, offset: u32) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, structural, js_name = usedBounds)]
    fn js_used_bounds(this: &JsLayout, max_lines: u32) -> Result<JsValue, JsValue>;
}

/// `{ x, y, width, height }` as hosts write rects
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default)]
#[serde(default)]
struct JsRect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl From<JsRect> for Rect {
    fn from(r: JsRect) -> Self {
        Rect::new(r.x, r.y, r.width, r.height)
    }
}

impl From<Rect> for JsRect {
    fn from(r: Rect) -> Self {
        JsRect {
            x: r.origin.x,
            y: r.origin.y,
            width: r.size.width,
            height: r.size.height,
        }
    }
}

/// Thrown JS errors keep their message; anything else is debug-printed
fn layout_error(e: JsValue) -> LabelError {
    let message = match e.dyn_ref::<js_sys::Error>() {
        Some(err) => String::from(err.message()),
        None => e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    };
    LabelError::Layout(message)
}

fn serialization_error(e: serde_wasm_bindgen::Error) -> LabelError {
    LabelError::Serialization(e.to_string())
}

impl TextLayout for JsLayout {
    fn offset_for_point(&self, point: Point) -> LabelResult<usize> {
        let offset = self.js_offset_for_point(point.x, point.y).map_err(layout_error)?;
        if !offset.is_finite() || offset < 0.0 {
            return Err(LabelError::Layout(format!("offsetForPoint returned {}", offset)));
        }
        Ok(offset as usize)
    }

    fn line_fragment_rect(&self, offset: usize) -> LabelResult<Rect> {
        let value = self.js_line_fragment_rect(offset as u32).map_err(layout_error)?;
        let rect: JsRect = serde_wasm_bindgen::from_value(value).map_err(serialization_error)?;
        Ok(rect.into())
    }

    fn used_bounds(&self, max_lines: usize) -> LabelResult<Size> {
        let value = self.js_used_bounds(max_lines as u32).map_err(layout_error)?;
        let size: Size = serde_wasm_bindgen::from_value(value).map_err(serialization_error)?;
        Ok(size)
    }
}

// ==================== HANDLE ====================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct RichLabelHandle {
    inner: RichLabel,
}

#[wasm_bindgen]
impl RichLabelHandle {
    /// Create a label from an optional config object
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RichLabelHandle, JsValue> {
        let config: LabelConfig = if config.is_null() || config.is_undefined() {
            LabelConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
        };

        Ok(RichLabelHandle {
            inner: RichLabel::new(config),
        })
    }

    // ==================== TEXT & DETECTION ====================

    #[wasm_bindgen(js_name = setText)]
    pub fn set_text(&mut self, raw: &str) {
        self.inner.set_text(raw);
    }

    /// Display text
    #[wasm_bindgen]
    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }

    #[wasm_bindgen(js_name = rawText)]
    pub fn raw_text(&self) -> String {
        self.inner.raw_text().to_string()
    }

    /// 0 None, 1 UserHandle, 2 Hashtag, 3 URL, 4 Action, 5 All
    #[wasm_bindgen(js_name = setLinkDetection)]
    pub fn set_link_detection(&mut self, option: u8) -> Result<(), JsValue> {
        let option = LinkTypeOption::from_code(option)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown link detection option: {}", option)))?;
        self.inner.set_link_detection(option);
        Ok(())
    }

    #[wasm_bindgen(js_name = setAutomaticLinkDetection)]
    pub fn set_automatic_link_detection(&mut self, enabled: bool) {
        self.inner.set_automatic_link_detection(enabled);
    }

    #[wasm_bindgen(js_name = setSystemUrlStyle)]
    pub fn set_system_url_style(&mut self, enabled: bool) {
        self.inner.set_system_url_style(enabled);
    }

    #[wasm_bindgen(js_name = setUp)]
    pub fn set_up(&mut self, line_height_multiple: f32, automatic_link_detection: bool, option: u8) -> Result<(), JsValue> {
        let option = LinkTypeOption::from_code(option)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown link detection option: {}", option)))?;
        self.inner.set_up(line_height_multiple, automatic_link_detection, option);
        Ok(())
    }

    /// Array of strings
    #[wasm_bindgen(js_name = setIgnoredKeywords)]
    pub fn set_ignored_keywords(&mut self, words: JsValue) -> Result<(), JsValue> {
        let words: Vec<String> = serde_wasm_bindgen::from_value(words)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse keywords: {}", e)))?;
        self.inner.set_ignored_keywords(words);
        Ok(())
    }

    // ==================== STYLE ====================

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&mut self, style: JsValue) -> Result<(), JsValue> {
        let style: StyleProperties = serde_wasm_bindgen::from_value(style)
            .map_err(|e| JsValue::from_str(&format!("Invalid style: {}", e)))?;
        self.inner.set_style(style);
        Ok(())
    }

    #[wasm_bindgen(js_name = setTopOffset)]
    pub fn set_top_offset(&mut self, top_offset: f32) {
        self.inner.set_top_offset(top_offset);
    }

    #[wasm_bindgen(js_name = setNumberOfLines)]
    pub fn set_number_of_lines(&mut self, lines: u32) {
        self.inner.set_number_of_lines(lines as usize);
    }

    /// Color object, or null to disable the highlight
    #[wasm_bindgen(js_name = setSelectedLinkBackgroundColor)]
    pub fn set_selected_link_background_color(&mut self, color: JsValue) -> Result<(), JsValue> {
        let color: Option<Color> = serde_wasm_bindgen::from_value(color)
            .map_err(|e| JsValue::from_str(&format!("Invalid color: {}", e)))?;
        self.inner.set_selected_link_background_color(color);
        Ok(())
    }

    #[wasm_bindgen(js_name = attributesForType)]
    pub fn attributes_for_type(&self, link_type: u8) -> Result<JsValue, JsValue> {
        let link_type = parse_link_type(link_type)?;
        to_js(self.inner.attributes_for_type(link_type))
    }

    /// Attributes object upserts, null clears
    #[wasm_bindgen(js_name = setAttributesForType)]
    pub fn set_attributes_for_type(&mut self, link_type: u8, attributes: JsValue) -> Result<(), JsValue> {
        let link_type = parse_link_type(link_type)?;
        let attributes: Option<LinkAttributes> = serde_wasm_bindgen::from_value(attributes)
            .map_err(|e| JsValue::from_str(&format!("Invalid attributes: {}", e)))?;
        self.inner.set_attributes_for_type(link_type, attributes);
        Ok(())
    }

    #[wasm_bindgen(js_name = overrideNonActionAttributes)]
    pub fn override_non_action_attributes(&mut self, font: JsValue, color: JsValue) -> Result<(), JsValue> {
        let font: Font = serde_wasm_bindgen::from_value(font)
            .map_err(|e| JsValue::from_str(&format!("Invalid font: {}", e)))?;
        let color: Color = serde_wasm_bindgen::from_value(color)
            .map_err(|e| JsValue::from_str(&format!("Invalid color: {}", e)))?;
        self.inner.override_non_action_attributes(&font, color);
        Ok(())
    }

    // ==================== RESULTS ====================

    #[wasm_bindgen(js_name = linkRanges)]
    pub fn link_ranges(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.link_ranges())
    }

    #[wasm_bindgen(js_name = attributedText)]
    pub fn attributed_text(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.attributed_text())
    }

    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.stats())
    }

    #[wasm_bindgen(js_name = takeNeedsDisplay)]
    pub fn take_needs_display(&mut self) -> bool {
        self.inner.take_needs_display()
    }

    #[wasm_bindgen(js_name = shouldHyphenateBefore)]
    pub fn should_hyphenate_before(&self, offset: u32) -> bool {
        self.inner.should_hyphenate_before(offset as usize)
    }

    // ==================== LAYOUT & TOUCH ====================

    /// `{ x, y }` drawing origin of the glyphs
    #[wasm_bindgen(js_name = glyphOrigin)]
    pub fn glyph_origin(&self, layout: &JsLayout) -> Result<JsValue, JsValue> {
        let origin = self.inner.glyph_origin(layout).map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&origin)
    }

    #[wasm_bindgen(js_name = textRectForBounds)]
    pub fn text_rect_for_bounds(&self, layout: &JsLayout, bounds: JsValue, number_of_lines: u32) -> Result<JsValue, JsValue> {
        let bounds: JsRect = serde_wasm_bindgen::from_value(bounds)
            .map_err(|e| JsValue::from_str(&format!("Invalid bounds: {}", e)))?;
        let rect = self
            .inner
            .text_rect_for_bounds(layout, bounds.into(), number_of_lines as usize)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&JsRect::from(rect))
    }

    /// Link under the point, or undefined
    #[wasm_bindgen(js_name = linkAtPoint)]
    pub fn link_at_point(&self, layout: &JsLayout, x: f32, y: f32) -> Result<JsValue, JsValue> {
        to_js(&self.inner.link_at_point(layout, Point::new(x, y)))
    }

    /// True when the touch landed on a link
    #[wasm_bindgen(js_name = touchBegan)]
    pub fn touch_began(&mut self, layout: &JsLayout, x: f32, y: f32) -> bool {
        self.inner.touch_began(layout, Point::new(x, y))
    }

    /// True once the gesture is a drag
    #[wasm_bindgen(js_name = touchMoved)]
    pub fn touch_moved(&mut self, x: f32, y: f32) -> bool {
        self.inner.touch_moved(Point::new(x, y))
    }

    /// Tap event (`{ event: "LinkTapped", link }` / `{ event: "BackgroundTapped" }`) or undefined after a drag
    #[wasm_bindgen(js_name = touchEnded)]
    pub fn touch_ended(&mut self, layout: &JsLayout, x: f32, y: f32) -> Result<JsValue, JsValue> {
        let event = self.inner.touch_ended(layout, Point::new(x, y));
        to_js(&event)
    }

    #[wasm_bindgen(js_name = touchCancelled)]
    pub fn touch_cancelled(&mut self) {
        self.inner.touch_cancelled();
    }
}

/// 0 UserHandle, 1 Hashtag, 2 URL, 3 Action
fn parse_link_type(code: u8) -> Result<LinkType, JsValue> {
    LinkType::from_code(code).ok_or_else(|| JsValue::from_str(&format!("Unknown link type: {}", code)))
}
