//! Intent classification: keyword search or natural-language question

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use verse_core::prefix::{matching_prefix, KEYWORD_PREFIXES, ORACLE_PREFIXES};

/// Strings shaped like "John 3:16", "1 Kings 2" or "Psalms 23:1-6"
static REFERENCE_SHAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]*\s*[A-Za-z]+\s+[0-9]+(:[0-9]+)?(-[0-9]+)?$").unwrap()
});

/// How a query should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    /// Natural language, translated by the oracle
    Llm,
    /// Boolean keyword expression or reference
    Standard,
}

/// The rule that decided an [`Intent`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentRule {
    OraclePrefix,
    KeywordPrefix,
    Operators,
    ReferenceShape,
    Default,
}

impl IntentRule {
    pub fn intent(self) -> Intent {
        match self {
            IntentRule::OraclePrefix | IntentRule::Default => Intent::Llm,
            IntentRule::KeywordPrefix | IntentRule::Operators | IntentRule::ReferenceShape => {
                Intent::Standard
            }
        }
    }
}

/// Find the first rule that applies to `query`.
///
/// Explicit prefixes win over every heuristic, so `ask: a + b` still goes to
/// the oracle.
pub fn classify_rule(query: &str) -> IntentRule {
    let query = query.trim();

    if matching_prefix(query, &ORACLE_PREFIXES).is_some() {
        return IntentRule::OraclePrefix;
    }
    if matching_prefix(query, &KEYWORD_PREFIXES).is_some() {
        return IntentRule::KeywordPrefix;
    }
    if query.contains(['+', ',', '(', ')']) {
        return IntentRule::Operators;
    }
    if REFERENCE_SHAPE_RE.is_match(query) {
        return IntentRule::ReferenceShape;
    }
    IntentRule::Default
}

/// Classify `query`
pub fn classify(query: &str) -> Intent {
    classify_rule(query).intent()
}
