//! TextAnnotator - unified annotation facade
//!
//! Single entry point over Scanner, Annotator and Rewriter: one call takes
//! the source text plus a "reveal signal characters" flag and returns a
//! [`TextAnnotationResult`]. Exposed both as a native Rust API and as a
//! wasm_bindgen class for the JS rendering layer.
//!
//! # Usage (JavaScript)
//! ```javascript,ignore
//! import init, { TextAnnotator } from 'linkspan';
//!
//! await init();
//! const annotator = new TextAnnotator(null); // default topic/mention/URL rules
//! const result = annotator.annotate("hi @bob check #swift#", false);
//! // result.text   -> "hi bob check swift"
//! // result.ranges -> [{ start, end, category, title }, ...]
//! ```

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use super::annotate::{annotate as annotate_matches, StyledRange};
use super::category::Category;
use super::rewrite::rewrite;
use super::rule::PatternRule;
use super::scan::{AnnotateError, Scanner};

// ==================== TYPE DEFINITIONS ====================

/// Output of one annotation call
///
/// In reveal mode `text` is the original input verbatim; in hidden mode it
/// is the rewritten text with signal characters stripped. `ranges` are
/// always relative to `text`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TextAnnotationResult {
    pub text: String,
    pub ranges: Vec<StyledRange>,
}

impl TextAnnotationResult {
    /// Styled range containing the given byte offset, if any
    ///
    /// Hit-test helper for tap handling: the host resolves a tap position to
    /// `(category, title)` through the returned range.
    pub fn range_at(&self, offset: usize) -> Option<&StyledRange> {
        self.ranges.iter().find(|r| r.contains(offset))
    }
}

/// Rule description accepted over the JS boundary
///
/// Either `start` + `end` (delimiter form) or `pattern` (raw form).
#[derive(Serialize, Deserialize, Debug)]
pub struct RuleSpec {
    pub category: String,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
}

impl TryFrom<RuleSpec> for PatternRule {
    type Error = AnnotateError;

    fn try_from(spec: RuleSpec) -> Result<Self, Self::Error> {
        let category = Category::from_attribute_name(&spec.category);

        match (spec.start, spec.end, spec.pattern) {
            (Some(start), Some(end), _) => Ok(PatternRule::delimited(category, start, end)),
            (_, _, Some(pattern)) => Ok(PatternRule::raw(category, pattern)),
            _ => Err(AnnotateError::IncompleteRule(spec.category)),
        }
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// TextAnnotator - pattern-based link-span annotation engine
///
/// Holds a compiled rule set; one `annotate` call is a synchronous, pure
/// function of its inputs with no state carried across calls.
#[wasm_bindgen]
pub struct TextAnnotator {
    scanner: Scanner,
}

/// Default rule set: topic, mention, custom-URL, in that priority order
///
/// Each rule comes from its category's factory ([`Category::default_rule`]),
/// the single place the built-in expressions are defined.
pub fn default_rules() -> Vec<PatternRule> {
    [Category::Topic, Category::Mention, Category::Custom]
        .into_iter()
        .filter_map(|category| category.default_rule())
        .collect()
}

// Native API (non-WASM)
impl TextAnnotator {
    /// Build an annotator from an ordered rule set
    ///
    /// # Errors
    /// Fails fast on any malformed pattern expression; a broken rule set is
    /// a configuration error, never skipped.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, AnnotateError> {
        Ok(Self {
            scanner: Scanner::new(rules)?,
        })
    }

    /// Build an annotator with the default topic/mention/URL rules
    pub fn with_defaults() -> Self {
        // The default expressions are fixed constants and always compile
        Self::new(default_rules()).expect("default rules compile")
    }

    /// Annotate `text`, optionally stripping signal characters
    ///
    /// With `reveal_signal` set the original text is returned verbatim with
    /// styled ranges over it; otherwise the text is rewritten with each
    /// match's delimiters stripped and the ranges re-anchored.
    pub fn annotate(&self, text: &str, reveal_signal: bool) -> TextAnnotationResult {
        let matches = self.scanner.scan(text);

        if reveal_signal {
            TextAnnotationResult {
                text: text.to_string(),
                ranges: annotate_matches(&matches),
            }
        } else {
            let (rewritten, ranges) = rewrite(text, matches);
            TextAnnotationResult {
                text: rewritten,
                ranges,
            }
        }
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.scanner.rule_count()
    }
}

// ==================== WASM BOUNDARY ====================

#[wasm_bindgen]
impl TextAnnotator {
    /// Create a TextAnnotator
    ///
    /// # Arguments
    /// * `rules` - Optional JSON array of RuleSpec objects; `null` or
    ///   `undefined` selects the default topic/mention/URL rule set
    #[wasm_bindgen(constructor)]
    pub fn js_new(rules: JsValue) -> Result<TextAnnotator, JsValue> {
        if rules.is_null() || rules.is_undefined() {
            return Ok(Self::with_defaults());
        }

        let specs: Vec<RuleSpec> = serde_wasm_bindgen::from_value(rules)
            .map_err(|e| JsValue::from_str(&format!("Invalid rules: {}", e)))?;

        let rules = specs
            .into_iter()
            .map(PatternRule::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Self::new(rules).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Annotate text and return `{ text, ranges }`
    #[wasm_bindgen(js_name = annotate)]
    pub fn js_annotate(&self, text: &str, reveal_signal: bool) -> Result<JsValue, JsValue> {
        let result = self.annotate(text, reveal_signal);

        serde_wasm_bindgen::to_value(&result).map_err(|e| {
            web_sys::console::error_1(
                &format!("[TextAnnotator] Serialization failed: {}", e).into(),
            );
            JsValue::from_str(&format!("Serialization error: {}", e))
        })
    }

    /// Style-attribute keys of the built-in categories
    ///
    /// Hosts register these as link attributes so default-rule spans are
    /// tappable.
    #[wasm_bindgen(js_name = linkAttributeNames)]
    pub fn link_attribute_names(&self) -> Vec<String> {
        Category::builtin_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get annotator status
    #[wasm_bindgen(js_name = getStatus)]
    pub fn get_status(&self) -> JsValue {
        let status = serde_json::json!({
            "rule_count": self.rule_count(),
            "builtin_attributes": Category::builtin_names(),
        });

        JsValue::from_str(&status.to_string())
    }
}

// ==================== TESTS ====================
