//! LinkSpan: pattern-based link-span annotation engine
//!
//! A Rust/WASM implementation of a mention/topic/URL annotation pipeline.
//! Given a plain text string and an ordered set of pattern rules, the engine
//! produces stylable ranges over the text - and can optionally rewrite the
//! text with each match's signal characters (the leading `@`, the
//! surrounding `#...#`) stripped, re-anchoring every range to the edited
//! text.
//!
//! # Architecture
//!
//! ## Annotator Components
//! - `category.rs` - Category: span kinds (mention, topic, custom/URL, open)
//! - `rule.rs` - PatternRule: delimiter-pair and raw-regex rule forms + trim
//! - `scan.rs` - Scanner: compiled rule set, raw match extraction
//! - `annotate.rs` - Annotator: reveal-mode styled ranges (no text mutation)
//! - `rewrite.rs` - Rewriter: hidden-mode signal stripping, right-to-left
//! - `engine.rs` - TextAnnotator: **unified facade** - one annotate() call
//!
//! # Usage (WASM)
//! ```javascript,ignore
//! import init, { TextAnnotator } from 'linkspan';
//!
//! await init();
//!
//! // Default rules: #topic#, @mention, URLs
//! const annotator = new TextAnnotator(null);
//!
//! // Reveal mode: text untouched, signal characters visible
//! const revealed = annotator.annotate("hi @bob check #swift#", true);
//!
//! // Hidden mode: signals stripped, ranges re-anchored
//! const hidden = annotator.annotate("hi @bob check #swift#", false);
//! // hidden.text   -> "hi bob check swift"
//! // hidden.ranges -> [{ start: 3, end: 6, category: "mention", title: "bob" }, ...]
//! ```

pub mod annotator;

pub use annotator::*;

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
    format!("linkspan v{}", env!("CARGO_PKG_VERSION"))
}
