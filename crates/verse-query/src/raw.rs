//! Raw SELECT passthrough and its safety filter

use verse_core::{Error, Result};

/// Substrings that make a raw statement unsafe, matched ignoring case
pub const FORBIDDEN_TOKENS: [&str; 7] =
    ["DROP", "DELETE", "UPDATE", "INSERT", "ALTER", "TRUNCATE", ";"];

/// True when the input is written as a complete SELECT statement
pub fn is_raw_select(query: &str) -> bool {
    query
        .trim_start()
        .get(..7)
        .is_some_and(|head| head.eq_ignore_ascii_case("SELECT "))
}

/// Reject statements containing any forbidden token.
///
/// The check is a plain substring test, so a column or string literal that
/// merely contains a forbidden word is rejected too.
pub fn validate_raw_sql(sql: &str) -> Result<()> {
    if sql.trim().is_empty() {
        return Err(Error::MalformedExpression("empty statement".to_string()));
    }

    let upper = sql.to_uppercase();
    match FORBIDDEN_TOKENS.iter().find(|token| upper.contains(*token)) {
        Some(token) => Err(Error::UnsafeRawQuery {
            token: token.to_string(),
        }),
        None => Ok(()),
    }
}
