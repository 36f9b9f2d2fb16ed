//! The canonical query-matching rule.
//!
//! The store's server-side name search is treated as an opaque pre-filter;
//! THIS is the rule that decides matches: the literal query string with
//! regex metacharacters escaped, compiled case-insensitive, tested against
//! each candidate field independently (OR across fields).

use regex::Regex;

/// A compiled query. Construction fails only for blank queries.
#[derive(Debug)]
pub struct QueryMatcher {
    pattern: Regex,
}

impl QueryMatcher {
    /// Builds the matcher from a raw query string.
    ///
    /// Returns `None` for an empty or whitespace-only query — the caller
    /// short-circuits without contacting the store in that case.
    #[must_use]
    pub fn new(query: &str) -> Option<Self> {
        let literal = query.trim();
        if literal.is_empty() {
            return None;
        }
        // An escaped literal always compiles.
        let pattern = Regex::new(&format!("(?i){}", regex::escape(literal))).ok()?;
        Some(Self { pattern })
    }

    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    #[must_use]
    pub fn matches_opt(&self, text: Option<&str>) -> bool {
        text.is_some_and(|t| self.pattern.is_match(t))
    }
}
