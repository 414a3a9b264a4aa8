//! Search terms
//!
//! A highlight call takes either one term or an ordered list of terms.
//! Free-form queries are split into terms here as well:
//! `foo "bar baz"` yields `foo` and `bar baz`.

use once_cell::sync::Lazy;
use regex::Regex;

/// Quoted phrase or run of non-whitespace
static QUERY_TERM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""([^"]*)"|(\S+)"#).expect("Invalid QUERY_TERM_RE regex"));

/// One term or many
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Terms {
    /// A single, possibly absent, term
    Single(Option<String>),
    /// Independent terms, in caller order (no deduplication)
    Many(Vec<String>),
}

impl Terms {
    /// Number of terms that can contribute matches
    pub fn len(&self) -> usize {
        match self {
            Terms::Single(Some(_)) => 1,
            Terms::Single(None) => 0,
            Terms::Many(terms) => terms.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<&str> for Terms {
    fn from(term: &str) -> Self {
        Terms::Single(Some(term.to_string()))
    }
}

impl From<String> for Terms {
    fn from(term: String) -> Self {
        Terms::Single(Some(term))
    }
}

impl From<Option<&str>> for Terms {
    fn from(term: Option<&str>) -> Self {
        Terms::Single(term.map(str::to_string))
    }
}

impl From<Option<String>> for Terms {
    fn from(term: Option<String>) -> Self {
        Terms::Single(term)
    }
}

impl<S: AsRef<str>> From<Vec<S>> for Terms {
    fn from(terms: Vec<S>) -> Self {
        Terms::Many(terms.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>> From<&[S]> for Terms {
    fn from(terms: &[S]) -> Self {
        Terms::Many(terms.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

impl<S: AsRef<str>, const N: usize> From<[S; N]> for Terms {
    fn from(terms: [S; N]) -> Self {
        Terms::Many(terms.iter().map(|t| t.as_ref().to_string()).collect())
    }
}

/// Split a free-form query into terms.
///
/// Double-quoted phrases stay together; everything else splits on
/// whitespace. Empty phrases are dropped. An unterminated quote is treated
/// as ordinary text.
pub fn parse_query(query: &str) -> Vec<String> {
    QUERY_TERM_RE
        .captures_iter(query)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
