//! Routing prefixes that let a user force the query mode

/// Prefixes that route a query to the natural-language oracle
pub const ORACLE_PREFIXES: [&str; 2] = ["sql:", "ask:"];

/// Prefixes that force keyword (boolean expression) search
pub const KEYWORD_PREFIXES: [&str; 2] = ["key:", "search:"];

/// Returns the first prefix in `prefixes` that `query` starts with, ignoring
/// ASCII case.
pub fn matching_prefix<'p>(query: &str, prefixes: &[&'p str]) -> Option<&'p str> {
    prefixes.iter().copied().find(|p| {
        query
            .get(..p.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(p))
    })
}

/// Remove a leading routing prefix (and the whitespace after it), then trim.
pub fn strip_prefix<'q>(query: &'q str, prefixes: &[&str]) -> &'q str {
    let query = query.trim_start();
    match matching_prefix(query, prefixes) {
        Some(prefix) => query[prefix.len()..].trim(),
        None => query.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_prefix_ignores_case() {
        assert_eq!(matching_prefix("ASK: why", &ORACLE_PREFIXES), Some("ask:"));
        assert_eq!(matching_prefix("Search:love", &KEYWORD_PREFIXES), Some("search:"));
        assert_eq!(matching_prefix("asking", &ORACLE_PREFIXES), None);
        assert_eq!(matching_prefix("sq", &ORACLE_PREFIXES), None);
    }

    #[test]
    fn test_strip_prefix() {
        assert_eq!(strip_prefix("key:  love + hope ", &KEYWORD_PREFIXES), "love + hope");
        assert_eq!(strip_prefix("sql:forgiveness", &ORACLE_PREFIXES), "forgiveness");
        assert_eq!(strip_prefix(" faith ", &KEYWORD_PREFIXES), "faith");
    }

    #[test]
    fn test_prefix_on_multibyte_input() {
        // slicing must not split a character
        assert_eq!(matching_prefix("é:", &KEYWORD_PREFIXES), None);
        assert_eq!(strip_prefix("éé", &ORACLE_PREFIXES), "éé");
    }
}
