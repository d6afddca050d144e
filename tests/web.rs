//! WASM-target tests for the JS boundary
//!
//! Run with `wasm-pack test --headless --chrome`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use linkspan::{TextAnnotationResult, TextAnnotator};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn default_rules_hidden_mode() {
    let annotator = TextAnnotator::js_new(JsValue::NULL).unwrap();
    let value = annotator
        .js_annotate("hi @bob check #swift# ok", false)
        .unwrap();

    let result: TextAnnotationResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(result.text, "hi bob check swift ok");
    assert_eq!(result.ranges.len(), 2);
}

#[wasm_bindgen_test]
fn default_rules_reveal_mode() {
    let annotator = TextAnnotator::js_new(JsValue::NULL).unwrap();
    let value = annotator
        .js_annotate("see https://example.com/x now", true)
        .unwrap();

    let result: TextAnnotationResult = serde_wasm_bindgen::from_value(value).unwrap();
    assert_eq!(result.text, "see https://example.com/x now");
    assert_eq!(result.ranges.len(), 1);
    assert_eq!(result.ranges[0].title, "https://example.com/x");
}

#[wasm_bindgen_test]
fn invalid_rules_rejected_at_construction() {
    let specs = serde_wasm_bindgen::to_value(&serde_json::json!([
        { "category": "broken", "pattern": "(unclosed" }
    ]))
    .unwrap();

    assert!(TextAnnotator::js_new(specs).is_err());
}
