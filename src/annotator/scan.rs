//! Scanner - raw pattern matching over the source text
//!
//! Compiles an ordered rule set once, then runs every rule's expression over
//! the full text, case-insensitively, collecting one [`RawMatch`] per regex
//! match. Rules are matched independently: matches from different rules are
//! never deduplicated or conflict-resolved against each other, so their
//! spans may overlap.

use regex::{Regex, RegexBuilder};

use super::rule::PatternRule;

// ==================== TYPE DEFINITIONS ====================

/// Annotation engine errors
///
/// A broken rule set is a programming error, not a runtime condition to
/// recover from: pattern compilation fails fast at registration and is never
/// silently skipped.
#[derive(Debug)]
pub enum AnnotateError {
    /// A rule's expression is not valid regex syntax
    InvalidPattern {
        expression: String,
        source: regex::Error,
    },
    /// A rule description carried neither a delimiter pair nor a raw pattern
    IncompleteRule(String),
}

impl std::fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnotateError::InvalidPattern { expression, source } => {
                write!(f, "invalid pattern expression `{}`: {}", expression, source)
            }
            AnnotateError::IncompleteRule(category) => write!(
                f,
                "rule for category `{}` needs either start/end delimiters or a raw pattern",
                category
            ),
        }
    }
}

impl std::error::Error for AnnotateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnnotateError::InvalidPattern { source, .. } => Some(source),
            AnnotateError::IncompleteRule(_) => None,
        }
    }
}

/// A single raw match over the ORIGINAL text
///
/// Byte offsets; `matched_text` is the untrimmed matched substring, signal
/// characters included.
#[derive(Clone, Debug)]
pub struct RawMatch {
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
    pub rule: PatternRule,
}

impl RawMatch {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

// ==================== MAIN IMPLEMENTATION ====================

/// Scanner - compiled rule set + raw match extraction
#[derive(Debug)]
pub struct Scanner {
    rules: Vec<CompiledRule>,
}

#[derive(Debug)]
struct CompiledRule {
    rule: PatternRule,
    regex: Regex,
}

impl Scanner {
    /// Compile an ordered rule set
    ///
    /// # Errors
    /// [`AnnotateError::InvalidPattern`] if any rule's expression fails to
    /// compile. The whole rule set is rejected; nothing is skipped.
    pub fn new(rules: Vec<PatternRule>) -> Result<Self, AnnotateError> {
        let mut compiled = Vec::with_capacity(rules.len());

        for rule in rules {
            let regex = RegexBuilder::new(&rule.expression)
                .case_insensitive(true)
                .build()
                .map_err(|source| AnnotateError::InvalidPattern {
                    expression: rule.expression.clone(),
                    source,
                })?;

            compiled.push(CompiledRule { rule, regex });
        }

        Ok(Self { rules: compiled })
    }

    /// Number of registered rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Registered rules, in supplied order
    pub fn rules(&self) -> impl Iterator<Item = &PatternRule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Run every rule over the full text
    ///
    /// Output is grouped by rule in registration order; within one rule,
    /// matches are in left-to-right scan order (standard leftmost,
    /// non-overlapping semantics per rule). Zero matches is not an error.
    pub fn scan(&self, text: &str) -> Vec<RawMatch> {
        let mut matches = Vec::new();

        for compiled in &self.rules {
            for m in compiled.regex.find_iter(text) {
                matches.push(RawMatch {
                    start: m.start(),
                    end: m.end(),
                    matched_text: m.as_str().to_string(),
                    rule: compiled.rule.clone(),
                });
            }
        }

        matches
    }
}

// ==================== TESTS ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::category::Category;
    use crate::annotator::rule::URL_PATTERN;

    fn topic_rule() -> PatternRule {
        PatternRule::delimited(Category::Topic, "#", "#")
    }

    fn mention_rule() -> PatternRule {
        PatternRule::delimited(Category::Mention, "@", r"\s")
    }

    #[test]
    fn test_scan_single_topic() {
        let scanner = Scanner::new(vec![topic_rule()]).unwrap();
        let matches = scanner.scan("check #swift# now");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].start, 6);
        assert_eq!(matches[0].end, 13);
        assert_eq!(matches[0].matched_text, "#swift#");
        assert_eq!(matches[0].rule.category, Category::Topic);
    }

    #[test]
    fn test_scan_mention_stops_at_whitespace() {
        let scanner = Scanner::new(vec![mention_rule()]).unwrap();
        let matches = scanner.scan("hi @bob how are you");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "@bob ");
        assert_eq!(matches[0].start, 3);
        assert_eq!(matches[0].end, 8);
    }

    #[test]
    fn test_scan_output_grouped_by_rule_order() {
        // Mention appears first in the text, but the topic rule is
        // registered first, so its matches come first
        let scanner = Scanner::new(vec![topic_rule(), mention_rule()]).unwrap();
        let matches = scanner.scan("hi @bob check #swift# ok");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].rule.category, Category::Topic);
        assert_eq!(matches[1].rule.category, Category::Mention);
    }

    #[test]
    fn test_scan_non_overlapping_within_rule() {
        let scanner = Scanner::new(vec![topic_rule()]).unwrap();
        let matches = scanner.scan("#a# and #b#");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].matched_text, "#a#");
        assert_eq!(matches[1].matched_text, "#b#");
        assert!(matches[0].end <= matches[1].start);
    }

    #[test]
    fn test_scan_is_case_insensitive() {
        let scanner =
            Scanner::new(vec![PatternRule::raw(Category::Custom, URL_PATTERN)]).unwrap();
        let matches = scanner.scan("see HTTPS://Example.com/X now");

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].matched_text, "HTTPS://Example.com/X");
    }

    #[test]
    fn test_scan_cross_rule_matches_may_overlap() {
        // "@tag " overlaps "#x#" is hard to arrange with the defaults, so use
        // two rules that both cover the same run
        let hash_raw = PatternRule::raw(Category::Other("raw-topic".into()), "#[a-z]+#");
        let scanner = Scanner::new(vec![topic_rule(), hash_raw]).unwrap();
        let matches = scanner.scan("see #swift# here");

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].start, matches[1].start);
        assert_eq!(matches[0].end, matches[1].end);
    }

    #[test]
    fn test_scan_no_matches_is_empty() {
        let scanner = Scanner::new(vec![topic_rule(), mention_rule()]).unwrap();
        assert!(scanner.scan("plain text only").is_empty());
        assert!(scanner.scan("").is_empty());
    }

    #[test]
    fn test_invalid_pattern_fails_fast() {
        let broken = PatternRule::raw(Category::Custom, "(unclosed");
        let err = Scanner::new(vec![topic_rule(), broken]).unwrap_err();

        match err {
            AnnotateError::InvalidPattern { expression, .. } => {
                assert_eq!(expression, "(unclosed");
            }
            other => panic!("expected InvalidPattern, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_rule_set() {
        let scanner = Scanner::new(Vec::new()).unwrap();
        assert_eq!(scanner.rule_count(), 0);
        assert!(scanner.scan("anything #at# all").is_empty());
    }
}
