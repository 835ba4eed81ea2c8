//! The `REGEXP` function the verse store registers for generated predicates

use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Compiled patterns kept per function; the cache is cleared when full
const MAX_CACHED_PATTERNS: usize = 64;

/// `REGEXP(pattern, candidate)` with a fixed case mode.
///
/// Stores call [`RegexpFunction::call`] for every candidate row, so each
/// pattern is compiled once and reused. A `NULL` candidate never matches,
/// and neither does an invalid pattern.
#[derive(Debug, Default)]
pub struct RegexpFunction {
    pub case_sensitive: bool,
    // invalid patterns are stored as `None`
    cache: Mutex<HashMap<String, Option<Regex>>>,
}

impl Clone for RegexpFunction {
    fn clone(&self) -> Self {
        Self::new(self.case_sensitive)
    }
}

impl RegexpFunction {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            case_sensitive,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Search `candidate` for `pattern`
    pub fn call(&self, pattern: &str, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };

        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if !cache.contains_key(pattern) {
            if cache.len() >= MAX_CACHED_PATTERNS {
                cache.clear();
            }
            cache.insert(pattern.to_string(), self.compile(pattern));
        }

        cache
            .get(pattern)
            .and_then(Option::as_ref)
            .is_some_and(|re| re.is_match(candidate))
    }

    /// Number of distinct patterns compiled so far
    pub fn cached_patterns(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn compile(&self, pattern: &str) -> Option<Regex> {
        match RegexBuilder::new(pattern)
            .case_insensitive(!self.case_sensitive)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                warn!("Invalid REGEXP pattern {:?}: {}", pattern, e);
                None
            }
        }
    }
}

/// Case-insensitive `REGEXP` check
pub fn regexp_check(pattern: &str, candidate: &str) -> bool {
    RegexpFunction::default().call(pattern, Some(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_by_default() {
        assert!(regexp_check(r"\bgrace\b", "Amazing Grace"));
        assert!(regexp_check(r"\bgrace\b", "grace"));
        assert!(regexp_check(r"\bgrace\b", "State of grace"));
    }

    #[test]
    fn test_word_boundaries() {
        assert!(!regexp_check(r"\bgrace\b", "disgrace"));
        assert!(!regexp_check(r"\bgrace\b", "graceless"));
        assert!(regexp_check(r"\bgrace\b", "grace, and peace"));
    }

    #[test]
    fn test_case_sensitive_mode() {
        let f = RegexpFunction::new(true);
        assert!(!f.call(r"\bgrace\b", Some("Amazing Grace")));
        assert!(f.call(r"\bGrace\b", Some("Amazing Grace")));
    }

    #[test]
    fn test_null_and_invalid() {
        let f = RegexpFunction::default();
        assert!(!f.call(r"\bgrace\b", None));
        assert!(!f.call(r"(unclosed", Some("(unclosed")));
        assert!(!f.call(r"(unclosed", Some("(unclosed")));
        assert_eq!(f.cached_patterns(), 1);
    }

    #[test]
    fn test_patterns_compiled_once_per_function() {
        let f = RegexpFunction::default();
        let rows = ["In the beginning", "grace and truth", "Amazing Grace", "disgrace"];
        let matched = rows
            .iter()
            .filter(|row| f.call(r"\bgrace\b", Some(**row)))
            .count();
        assert_eq!(matched, 2);
        assert_eq!(f.cached_patterns(), 1);

        f.call(r"\btruth\b", Some("grace and truth"));
        assert_eq!(f.cached_patterns(), 2);

        // clones start empty but keep the case mode
        let strict = RegexpFunction::new(true);
        assert!(strict.call(r"\bGrace\b", Some("Amazing Grace")));
        let copy = strict.clone();
        assert!(copy.case_sensitive);
        assert_eq!(copy.cached_patterns(), 0);
        assert_eq!(strict.cached_patterns(), 1);
    }

    #[test]
    fn test_cache_is_bounded() {
        let f = RegexpFunction::default();
        for i in 0..(MAX_CACHED_PATTERNS * 2 + 5) {
            assert!(f.call(&format!(r"\bw{}\b", i), Some(&format!("w{}", i))));
        }
        assert!(f.cached_patterns() <= MAX_CACHED_PATTERNS);
    }
}
