//! Match highlighting for result verses
//!
//! The highlighter splits a verse into plain and matched spans using the same
//! word-boundary patterns the SQL predicate uses, so a verse returned by the
//! store shows exactly the words that made it match.

use crate::compiler::word_boundary_pattern;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use verse_core::{Error, Result};

/// Kind of a highlight span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    Plain,
    Match,
}

/// A piece of verse text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpan {
    pub kind: SpanKind,
    pub text: String,
}

impl HighlightSpan {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Plain,
            text: text.into(),
        }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Match,
            text: text.into(),
        }
    }

    pub fn is_match(&self) -> bool {
        self.kind == SpanKind::Match
    }
}

/// Concatenate span texts
pub fn join_spans(spans: &[HighlightSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

/// Splits verse text around whole-word matches of a term set
#[derive(Debug, Clone)]
pub struct Highlighter {
    regex: Option<Regex>,
}

impl Highlighter {
    /// Build a highlighter for `terms`; empty terms are ignored
    pub fn new<S: AsRef<str>>(terms: &[S], case_sensitive: bool) -> Result<Self> {
        let alternation = terms
            .iter()
            .map(AsRef::as_ref)
            .filter(|t| !t.is_empty())
            .map(word_boundary_pattern)
            .collect::<Vec<_>>()
            .join("|");

        if alternation.is_empty() {
            return Ok(Self::disabled());
        }

        let regex = RegexBuilder::new(&alternation)
            .case_insensitive(!case_sensitive)
            .build()
            .map_err(|e| Error::InvalidPattern(e.to_string()))?;

        Ok(Self { regex: Some(regex) })
    }

    /// Highlighter that never marks anything
    pub fn disabled() -> Self {
        Self { regex: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.regex.is_some()
    }

    /// Split `text` into spans whose concatenation is `text`
    pub fn spans(&self, text: &str) -> Vec<HighlightSpan> {
        let Some(regex) = &self.regex else {
            return vec![HighlightSpan::plain(text)];
        };

        let mut spans = Vec::new();
        let mut last = 0;
        for m in regex.find_iter(text) {
            if m.start() > last {
                spans.push(HighlightSpan::plain(&text[last..m.start()]));
            }
            spans.push(HighlightSpan::matched(m.as_str()));
            last = m.end();
        }
        if last < text.len() {
            spans.push(HighlightSpan::plain(&text[last..]));
        }
        spans
    }
}
