//! Pattern rules - configurable span detection
//!
//! A [`PatternRule`] describes one detectable span type. Two forms exist:
//!
//! - **Delimited**: a `(start, end)` signal-character pair, e.g. `@...\s`
//!   for mentions or `#...#` for topics. The expression is built as
//!   `start + ".*?" + end` (non-greedy) and the rule knows how to strip the
//!   delimiters from a matched substring.
//! - **Raw**: a verbatim regular expression, e.g. the URL pattern. Trimming
//!   is always the identity.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::category::Category;

/// Fixed URL detection pattern used by the default `Custom` rule.
///
/// Matches `http(s)`, `ftp` and `file` URIs over a restricted character
/// class. This is a reusable configuration constant, not tunable behavior.
pub const URL_PATTERN: &str =
    r"(https?|ftp|file)://[-A-Za-z0-9+&@#/%?=~_|!:,.;]+[-A-Za-z0-9+&@#/%=~_|]";

// ==================== TYPE DEFINITIONS ====================

/// One detectable span type: category + matching expression + trim behavior
///
/// Construction never fails, for any literal strings. The expression is only
/// usable if it is valid regex syntax; delimiters that are regex
/// metacharacters (`#` and `@` are safe, `(` is not) must be escaped by the
/// caller if literal matching is desired. Compilation happens at rule
/// registration ([`Scanner::new`](super::scan::Scanner::new)), which is where
/// a malformed expression surfaces.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PatternRule {
    pub category: Category,
    pub expression: String,
    /// Leading signal delimiter; empty for raw rules
    #[serde(default)]
    pub start: String,
    /// Trailing signal delimiter; empty for raw rules
    #[serde(default)]
    pub end: String,
}

// ==================== MAIN IMPLEMENTATION ====================

impl PatternRule {
    /// Build a delimiter-form rule from a `(start, end)` signal pair
    ///
    /// The whitespace class `"\s"` is accepted as `end`; its display form
    /// (what [`trim`](Self::trim) strips) is a single literal space. No other
    /// regex metacharacter used as a delimiter is unescaped for trimming -
    /// a known limitation of the delimiter form.
    pub fn delimited(
        category: Category,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        let start = start.into();
        let end = end.into();
        let expression = format!("{}.*?{}", start, end);

        Self {
            category,
            expression,
            start,
            end,
        }
    }

    /// Build a raw-form rule from a verbatim expression
    pub fn raw(category: Category, expression: impl Into<String>) -> Self {
        Self {
            category,
            expression: expression.into(),
            start: String::new(),
            end: String::new(),
        }
    }

    /// Whether this is a raw-form rule (no signal delimiters)
    pub fn is_raw(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Display form of the end delimiter: `"\s"` trims as one literal space
    fn end_display(&self) -> &str {
        if self.end == r"\s" {
            " "
        } else {
            &self.end
        }
    }

    /// Strip the signal delimiters from a matched substring
    ///
    /// Removes the leading `start` and the first occurrence of the display
    /// form of `end` - one deletion each, never all occurrences. Returns the
    /// input unchanged when the text does not actually begin with `start` and
    /// end with the display form of `end` (defensive no-op, not an error),
    /// and always for raw rules.
    pub fn trim<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.is_raw() {
            return Cow::Borrowed(text);
        }

        let end_tip = self.end_display();

        if !text.starts_with(&self.start)
            || !text.ends_with(end_tip)
            || text.len() < self.start.len() + end_tip.len()
        {
            return Cow::Borrowed(text);
        }

        let rest = &text[self.start.len()..];
        Cow::Owned(rest.replacen(end_tip, "", 1))
    }

    /// Hidden-mode replacement text for a matched substring
    ///
    /// Equal to the trimmed title, except for the whitespace-class end
    /// delimiter: the terminating space is real text separating the span
    /// from what follows, not a signal character, so it survives the rewrite
    /// (outside the styled range).
    pub fn replacement(&self, text: &str) -> String {
        let title = self.trim(text);

        if self.end == r"\s" && title.as_ref() != text {
            let mut replacement = String::with_capacity(title.len() + 1);
            replacement.push_str(&title);
            replacement.push(' ');
            replacement
        } else {
            title.into_owned()
        }
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimited_expression_is_non_greedy() {
        let rule = PatternRule::delimited(Category::Topic, "#", "#");
        assert_eq!(rule.expression, "#.*?#");
        assert!(!rule.is_raw());
    }

    #[test]
    fn test_raw_expression_verbatim() {
        let rule = PatternRule::raw(Category::Custom, URL_PATTERN);
        assert_eq!(rule.expression, URL_PATTERN);
        assert!(rule.is_raw());
    }

    #[test]
    fn test_trim_topic() {
        let rule = PatternRule::delimited(Category::Topic, "#", "#");
        assert_eq!(rule.trim("#swift#"), "swift");
    }

    #[test]
    fn test_trim_mention_whitespace_end() {
        // "\s" maps to a single literal space for trimming
        let rule = PatternRule::delimited(Category::Mention, "@", r"\s");
        assert_eq!(rule.trim("@bob "), "bob");
    }

    #[test]
    fn test_trim_removes_single_occurrences_only() {
        let rule = PatternRule::delimited(Category::Topic, "#", "#");
        // Only the prefix "#" and the first "#" after it are deleted
        assert_eq!(rule.trim("#a b#"), "a b");
        assert_eq!(rule.trim("##"), "");
    }

    #[test]
    fn test_trim_no_op_without_delimiters() {
        let rule = PatternRule::delimited(Category::Topic, "#", "#");
        assert_eq!(rule.trim("swift"), "swift");
        assert_eq!(rule.trim("#swift"), "#swift");
        assert_eq!(rule.trim("swift#"), "swift#");
        // A lone "#" both starts and ends with the delimiter but is too
        // short to contain both
        assert_eq!(rule.trim("#"), "#");
    }

    #[test]
    fn test_trim_no_op_on_non_space_whitespace() {
        // Only the literal space is recognized as the display form of "\s";
        // a tab-terminated match trims as a no-op
        let rule = PatternRule::delimited(Category::Mention, "@", r"\s");
        assert_eq!(rule.trim("@bob\t"), "@bob\t");
    }

    #[test]
    fn test_trim_identity_for_raw_rules() {
        let rule = PatternRule::raw(Category::Custom, URL_PATTERN);
        assert_eq!(rule.trim("https://example.com/x"), "https://example.com/x");
        // Even text that looks delimited is left alone
        assert_eq!(rule.trim("#swift#"), "#swift#");
    }

    #[test]
    fn test_replacement_keeps_terminating_whitespace() {
        let rule = PatternRule::delimited(Category::Mention, "@", r"\s");
        // Title is "bob"; the separating space stays in the text
        assert_eq!(rule.replacement("@bob "), "bob ");
    }

    #[test]
    fn test_replacement_matches_title_for_paired_delimiters() {
        let rule = PatternRule::delimited(Category::Topic, "#", "#");
        assert_eq!(rule.replacement("#swift#"), "swift");
    }

    #[test]
    fn test_replacement_identity_on_no_op_trim() {
        let mention = PatternRule::delimited(Category::Mention, "@", r"\s");
        assert_eq!(mention.replacement("@bob\t"), "@bob\t");

        let url = PatternRule::raw(Category::Custom, URL_PATTERN);
        assert_eq!(url.replacement("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_trim_caller_defined_category() {
        let rule = PatternRule::delimited(Category::Other("wiki".into()), "[[", "]]");
        assert_eq!(rule.trim("[[Rivendell]]"), "Rivendell");
    }
}
