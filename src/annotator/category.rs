//! Link-span categories
//!
//! A [`Category`] tags a detected span with its semantic kind. The three
//! built-in kinds (mention, topic, custom/URL) carry a stable attribute name
//! that the rendering layer uses as its style-attribute key; `Other` keeps
//! the rule set open for caller-defined kinds.

use serde::{Deserialize, Serialize};

use super::rule::{PatternRule, URL_PATTERN};

// ==================== TYPE DEFINITIONS ====================

/// Semantic kind of a detected link-like span
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Mention,
    Topic,
    Custom,
    /// Caller-defined category. Carries no built-in attribute name; the
    /// string itself is used as the style key.
    Other(String),
}

// ==================== MAIN IMPLEMENTATION ====================

impl Category {
    /// Style-attribute key for this category
    pub fn attribute_name(&self) -> &str {
        match self {
            Category::Mention => "mention",
            Category::Topic => "topic",
            Category::Custom => "custom",
            Category::Other(name) => name.as_str(),
        }
    }

    /// Resolve an attribute name back to a category
    ///
    /// Unknown names map to `Other`, never fail.
    pub fn from_attribute_name(name: &str) -> Self {
        match name {
            "mention" => Category::Mention,
            "topic" => Category::Topic,
            "custom" => Category::Custom,
            other => Category::Other(other.to_string()),
        }
    }

    /// Attribute names of the three built-in categories, in priority order.
    ///
    /// Hosts register these as link-attribute keys up front so every styled
    /// range produced with the default rule set is tappable.
    pub fn builtin_names() -> [&'static str; 3] {
        ["topic", "mention", "custom"]
    }

    /// Default detection rule for a built-in category
    ///
    /// * `Mention` - `@name` terminated by whitespace
    /// * `Topic` - `#topic#` delimited on both sides
    /// * `Custom` - the fixed URL pattern ([`URL_PATTERN`])
    /// * `Other` - none; caller-defined categories always supply their own rule
    pub fn default_rule(&self) -> Option<PatternRule> {
        match self {
            Category::Mention => Some(PatternRule::delimited(Category::Mention, "@", r"\s")),
            Category::Topic => Some(PatternRule::delimited(Category::Topic, "#", "#")),
            Category::Custom => Some(PatternRule::raw(Category::Custom, URL_PATTERN)),
            Category::Other(_) => None,
        }
    }
}

// ==================== TESTS ====================
