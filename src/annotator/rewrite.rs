//! Rewriter - hidden-signal mode
//!
//! Produces a version of the text with every match's signal characters
//! stripped, with styled ranges re-anchored to the edited text. Edits shift
//! all subsequent offsets, so the algorithm is two-phase:
//!
//! 1. Titles and replacement strings are computed from the ORIGINAL matched
//!    substrings, independent of mutation order.
//! 2. Replacements are applied in DESCENDING start order (rightmost first).
//!    Mutating one span never shifts the stored offset of a pending match,
//!    since all pending matches lie to its left. Left-to-right replacement
//!    would corrupt every subsequent offset.
//!
//! Output ranges are then derived in ascending order with a running length
//! delta, so each range points at its title in the final text.

use super::annotate::StyledRange;
use super::scan::RawMatch;

// ==================== MAIN IMPLEMENTATION ====================

/// Rewrite the text with signal characters stripped
///
/// Returns the mutated text plus styled ranges over it, sorted ascending.
/// Zero matches returns the text unchanged with no ranges. A rule whose trim
/// is a no-op (raw rules, defensive fallbacks) still participates in the
/// replacement step, replacing the matched text with itself; the algorithm
/// stays uniform and the range is still emitted.
///
/// The styled range covers the trimmed title only. For the whitespace-class
/// end delimiter the replacement additionally keeps the terminating space,
/// which falls outside the range (see [`PatternRule::replacement`]).
///
/// Matches from different rules whose spans overlap are both processed;
/// descending start order keeps the result deterministic, and spans are
/// clamped to the current text so an already-spliced region never produces
/// an out-of-bounds edit.
///
/// [`PatternRule::replacement`]: super::rule::PatternRule::replacement
pub fn rewrite(text: &str, mut matches: Vec<RawMatch>) -> (String, Vec<StyledRange>) {
    if matches.is_empty() {
        return (text.to_string(), Vec::new());
    }

    // Stable sort: ties keep discovery order
    matches.sort_by_key(|m| m.start);

    // Phase 1: trim against the original, unmodified matched text
    let pieces: Vec<(String, String)> = matches
        .iter()
        .map(|m| {
            let title = m.rule.trim(&m.matched_text).into_owned();
            let replacement = m.rule.replacement(&m.matched_text);
            (title, replacement)
        })
        .collect();

    // Phase 2: mutate right-to-left
    let mut rewritten = text.to_string();

    for (m, (_, replacement)) in matches.iter().zip(&pieces).rev() {
        let end = clamp_to_boundary(&rewritten, m.end);
        let start = m.start.min(end);
        rewritten.replace_range(start..end, replacement);
    }

    // Re-anchor ranges to the final text: each replacement to the left of a
    // match shifts it by the difference between replacement and matched
    // lengths. A match contained in an already-replaced span can be shifted
    // past its own start, so both ends are clamped into the rewritten text.
    let mut ranges = Vec::with_capacity(matches.len());
    let mut shift: isize = 0;

    for (m, (title, replacement)) in matches.iter().zip(pieces) {
        let start = clamp_to_boundary(&rewritten, (m.start as isize + shift).max(0) as usize);
        shift += replacement.len() as isize - m.len() as isize;

        ranges.push(StyledRange {
            start,
            end: clamp_to_boundary(&rewritten, start.saturating_add(title.len())),
            category: m.rule.category.clone(),
            title,
        });
    }

    (rewritten, ranges)
}

/// Largest valid char boundary at or below `at`
///
/// Overlapping rule matches may already have spliced part of this span.
fn clamp_to_boundary(text: &str, at: usize) -> usize {
    let mut at = at.min(text.len());
    while !text.is_char_boundary(at) {
        at -= 1;
    }
    at
}

// ==================== TESTS ====================
