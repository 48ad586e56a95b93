//! RichLabel: Link Detection + Range Attribution Engine
//!
//! A Rust/WASM implementation of the engine behind a rich text label: it
//! finds user handles, hashtags, URLs and markdown-style action links in a
//! text, styles them per link type and resolves taps back to links.
//!
//! # Architecture
//!
//! ## Detection (`scanner`)
//! - `markdown.rs` - MarkdownLinks: `@[label](payload)` / `[label](payload)` rewrite + range recovery
//! - `patterns.rs` - Pattern matchers for handles, hashtags and URLs
//! - `ignore.rs` - IgnoredKeywords: case-insensitive ignore list
//! - `detector.rs` - LinkDetector: per-option aggregation + scan statistics
//!
//! ## Styling (`style`, `render`)
//! - `snapshot.rs` - StyleSnapshot: base attributes derived from style properties
//! - `table.rs` - AttributeTable: per-link-type attributes with a shared fallback
//! - `attributed.rs` - AttributedText: display text + attribute runs for the renderer
//!
//! ## Interaction (`layout`, `label`)
//! - `hit.rs` - RangeIndex: point/offset to link resolution
//! - `touch.rs` - TouchTracker: press / drag / release state
//! - `label/` - RichLabel: the engine tying it all together, plus tap events
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { RichLabelHandle } from 'richlabel';
//!
//! await init();
//!
//! const label = new RichLabelHandle({ ignored_keywords: ['#skip'] });
//! label.setText("@alice says hi #devsdna see http://x.com");
//!
//! console.log(label.linkRanges());     // 3 ranges: handle, hashtag, URL
//! console.log(label.attributedText()); // text + attribute runs to render
//!
//! // On touch, hand over a layout object (offsetForPoint, lineFragmentRect, usedBounds)
//! label.touchBegan(layout, x, y);
//! const event = label.touchEnded(layout, x, y); // { event: "LinkTapped", link } | { event: "BackgroundTapped" }
//! ```

pub mod config;
pub mod error;
pub mod label;
pub mod layout;
pub mod render;
pub mod scanner;
pub mod style;
pub mod text;
pub mod wasm;

// Public exports
pub use config::*;
pub use error::*;
pub use label::*;
pub use layout::*;
pub use render::*;
pub use scanner::*;
pub use style::*;
pub use text::*;
pub use wasm::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator for smaller WASM bundle size.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Get version information
#[wasm_bindgen]
pub fn version() -> String {
    format!("richlabel v{}", env!("CARGO_PKG_VERSION"))
}
