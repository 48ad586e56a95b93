//! Browser tests for the JS facade

#![cfg(target_arch = "wasm32")]

use js_sys::{Function, Object, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;

use richlabel::{JsLayout, RichLabelHandle};

wasm_bindgen_test_configure!(run_in_browser);

const MIXED: &str = "@alice says hi #devsdna see http://x.com";

/// Single line of 10px glyphs, 17px tall
fn grid_layout(len: u32) -> JsLayout {
    let layout = Object::new();
    let offset = Function::new_with_args("x, y", &format!("return Math.min(Math.floor(x / 10), {});", len - 1));
    let line = Function::new_with_args("offset", &format!("return {{ x: 0, y: 0, width: {}, height: 17 }};", len * 10));
    let used = Function::new_with_args("maxLines", &format!("return {{ width: {}, height: 17 }};", len * 10));
    Reflect::set(&layout, &"offsetForPoint".into(), &offset).unwrap();
    Reflect::set(&layout, &"lineFragmentRect".into(), &line).unwrap();
    Reflect::set(&layout, &"usedBounds".into(), &used).unwrap();
    layout.unchecked_into::<JsLayout>()
}

fn get(value: &JsValue, key: &str) -> JsValue {
    Reflect::get(value, &key.into()).unwrap()
}

#[wasm_bindgen_test]
fn test_default_config_detects_all() {
    let mut label = RichLabelHandle::new(JsValue::NULL).unwrap();
    label.set_text(MIXED);

    let ranges: js_sys::Array = label.link_ranges().unwrap().dyn_into().unwrap();
    assert_eq!(ranges.length(), 3);
    assert_eq!(get(&ranges.get(0), "link").as_string().unwrap(), "@alice");
    assert_eq!(get(&ranges.get(2), "type").as_string().unwrap(), "URL");
}

#[wasm_bindgen_test]
fn test_markdown_is_stripped() {
    let mut label = RichLabelHandle::new(JsValue::UNDEFINED).unwrap();
    label.set_text("@[Link Label](target)");
    assert_eq!(label.text(), "Link Label");
    assert_eq!(label.raw_text(), "@[Link Label](target)");
}

#[wasm_bindgen_test]
fn test_unknown_option_is_rejected() {
    let mut label = RichLabelHandle::new(JsValue::NULL).unwrap();
    assert!(label.set_link_detection(9).is_err());
    assert!(label.set_link_detection(2).is_ok());
}

#[wasm_bindgen_test]
fn test_tap_through_js_layout() {
    let mut label = RichLabelHandle::new(JsValue::NULL).unwrap();
    label.set_text(MIXED);
    let layout = grid_layout(40);

    assert!(label.touch_began(&layout, 165.0, 8.0));
    let event = label.touch_ended(&layout, 165.0, 8.0).unwrap();
    assert_eq!(get(&event, "event").as_string().unwrap(), "LinkTapped");
    assert_eq!(get(&get(&event, "link"), "link").as_string().unwrap(), "#devsdna");
}

#[wasm_bindgen_test]
fn test_layout_exception_is_a_miss() {
    let mut label = RichLabelHandle::new(JsValue::NULL).unwrap();
    label.set_text(MIXED);

    let layout = Object::new();
    let throwing = Function::new_no_args("throw new Error('detached');");
    Reflect::set(&layout, &"offsetForPoint".into(), &throwing).unwrap();
    Reflect::set(&layout, &"lineFragmentRect".into(), &throwing).unwrap();
    Reflect::set(&layout, &"usedBounds".into(), &throwing).unwrap();
    let layout = layout.unchecked_into::<JsLayout>();

    assert!(label.link_at_point(&layout, 5.0, 5.0).unwrap().is_undefined());
    assert!(label.glyph_origin(&layout).is_err());
}

#[wasm_bindgen_test]
fn test_ignored_keywords_from_js() {
    let mut label = RichLabelHandle::new(JsValue::NULL).unwrap();
    label.set_text(MIXED);
    let words = js_sys::Array::of1(&"#DevsDNA".into());
    label.set_ignored_keywords(words.into()).unwrap();

    let stats = label.stats().unwrap();
    assert_eq!(get(&stats, "hashtag_count").as_f64().unwrap(), 0.0);
    assert_eq!(get(&stats, "ignored_count").as_f64().unwrap(), 1.0);
}
