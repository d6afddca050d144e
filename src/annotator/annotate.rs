//! Annotator - reveal-mode style assignment
//!
//! Converts raw matches into styled ranges without touching the text: the
//! signal characters stay visible, offsets are used as-is, and the title is
//! the untrimmed matched substring.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::scan::RawMatch;

// ==================== TYPE DEFINITIONS ====================

/// One stretch of text to be visually emphasized
///
/// Byte offsets are relative to whichever text the enclosing result carries
/// (original in reveal mode, rewritten in hidden mode). `title` is the data
/// a tap handler receives alongside the category.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StyledRange {
    pub start: usize,
    pub end: usize,
    pub category: Category,
    pub title: String,
}

impl StyledRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether the given byte offset falls inside this range
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// Emit one styled range per raw match, in scanner emission order
///
/// Ranges are applied downstream as attribute overlays, so emission order
/// carries no meaning for the caller; preserving scan order keeps output
/// deterministic.
pub fn annotate(matches: &[RawMatch]) -> Vec<StyledRange> {
    matches
        .iter()
        .map(|m| StyledRange {
            start: m.start,
            end: m.end,
            category: m.rule.category.clone(),
            title: m.matched_text.clone(),
        })
        .collect()
}

// ==================== TESTS ====================
