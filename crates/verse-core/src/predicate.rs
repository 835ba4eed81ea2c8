//! Parameterized SQL predicates and statements
//!
//! A [`Predicate`] is a boolean SQL fragment whose `?` placeholders are bound,
//! in order, to its values. Every constructor keeps the placeholder count
//! equal to the number of values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the verse text
pub const VERSE_COLUMN: &str = "verse";

/// Default name of the verse table
pub const DEFAULT_TABLE: &str = "bible";

/// Ordering applied to every generated statement
pub const VERSE_ORDER: &str = "ORDER BY Book, Chapter, Versecount";

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BindValue {
    Integer(i64),
    Text(String),
}

impl BindValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            BindValue::Text(s) => Some(s),
            BindValue::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            BindValue::Integer(i) => Some(*i),
            BindValue::Text(_) => None,
        }
    }
}

impl fmt::Display for BindValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindValue::Integer(i) => write!(f, "{}", i),
            BindValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<i64> for BindValue {
    fn from(value: i64) -> Self {
        BindValue::Integer(value)
    }
}

impl From<u32> for BindValue {
    fn from(value: u32) -> Self {
        BindValue::Integer(value as i64)
    }
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        BindValue::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        BindValue::Text(value.to_string())
    }
}

/// A boolean SQL condition and its ordered bound values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    pub sql: String,
    pub values: Vec<BindValue>,
}

impl Predicate {
    /// Predicate that matches no row (`1=0`)
    pub fn never() -> Self {
        Self {
            sql: "1=0".to_string(),
            values: Vec::new(),
        }
    }

    /// `<column> REGEXP ?` bound to `pattern`
    pub fn regexp(column: &str, pattern: impl Into<String>) -> Self {
        Self {
            sql: format!("{} REGEXP ?", column),
            values: vec![BindValue::Text(pattern.into())],
        }
    }

    /// `(<left> AND <right>)`
    pub fn and(left: Predicate, right: Predicate) -> Self {
        Self::combine(left, "AND", right)
    }

    /// `(<left> OR <right>)`
    pub fn or(left: Predicate, right: Predicate) -> Self {
        Self::combine(left, "OR", right)
    }

    fn combine(left: Predicate, op: &str, right: Predicate) -> Self {
        let sql = format!("({} {} {})", left.sql, op, right.sql);
        let mut values = left.values;
        values.extend(right.values);
        Self { sql, values }
    }

    /// Equality conjunction over `(column, value)` pairs, e.g.
    /// `Book = ? AND Chapter = ?`
    pub fn conjunction<I, V>(terms: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, &'static str, V)>,
        V: Into<BindValue>,
    {
        let mut parts = Vec::new();
        let mut values = Vec::new();
        for (column, op, value) in terms {
            parts.push(format!("{} {} ?", column, op));
            values.push(value.into());
        }
        if parts.is_empty() {
            return Self::never();
        }
        Self {
            sql: parts.join(" AND "),
            values,
        }
    }

    /// Number of `?` placeholders in the SQL fragment
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    /// True when placeholders and bound values line up
    pub fn is_consistent(&self) -> bool {
        self.placeholder_count() == self.values.len()
    }

    /// True for the no-match predicate
    pub fn is_never(&self) -> bool {
        self.sql == "1=0" && self.values.is_empty()
    }
}

/// A complete statement ready to execute against the verse store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub sql: String,
    pub values: Vec<BindValue>,
}

impl Statement {
    /// `SELECT * FROM <table> WHERE <predicate> ORDER BY Book, Chapter, Versecount`
    pub fn select(table: &str, predicate: &Predicate) -> Self {
        Self {
            sql: format!("SELECT * FROM {} WHERE {} {}", table, predicate.sql, VERSE_ORDER),
            values: predicate.values.clone(),
        }
    }

    /// A user-supplied statement passed through unchanged
    pub fn raw(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            values: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regexp_predicate() {
        let p = Predicate::regexp(VERSE_COLUMN, r"\blove\b");
        assert_eq!(p.sql, "verse REGEXP ?");
        assert_eq!(p.values, vec![BindValue::Text(r"\blove\b".to_string())]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_combine_preserves_value_order() {
        let left = Predicate::regexp(VERSE_COLUMN, "a");
        let right = Predicate::regexp(VERSE_COLUMN, "b");
        let p = Predicate::or(left, right);
        assert_eq!(p.sql, "(verse REGEXP ? OR verse REGEXP ?)");
        assert_eq!(p.values, vec![BindValue::from("a"), BindValue::from("b")]);
    }

    #[test]
    fn test_conjunction() {
        let p = Predicate::conjunction([("Book", "=", 42i64), ("Chapter", "=", 3i64)]);
        assert_eq!(p.sql, "Book = ? AND Chapter = ?");
        assert_eq!(p.values, vec![BindValue::Integer(42), BindValue::Integer(3)]);
        assert!(p.is_consistent());
    }

    #[test]
    fn test_never() {
        let p = Predicate::never();
        assert!(p.is_never());
        assert!(p.is_consistent());
        let empty: [(&str, &str, i64); 0] = [];
        assert!(Predicate::conjunction(empty).is_never());
    }

    #[test]
    fn test_select_statement() {
        let p = Predicate::regexp(VERSE_COLUMN, r"\bhope\b");
        let stmt = Statement::select(DEFAULT_TABLE, &p);
        assert_eq!(
            stmt.sql,
            "SELECT * FROM bible WHERE verse REGEXP ? ORDER BY Book, Chapter, Versecount"
        );
        assert_eq!(stmt.values.len(), 1);
    }

    #[test]
    fn test_bind_value_serializes_untagged() {
        let values = vec![BindValue::Integer(3), BindValue::from("x")];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[3,"x"]"#);
    }
}
