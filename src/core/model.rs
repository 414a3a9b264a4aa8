//! Result model
//!
//! Match positions produced by the matcher, and the items every command maps
//! its output to before rendering.

use serde::{Deserialize, Serialize};

/// A located occurrence of a term, in original-text character offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Match {
    pub start: usize,
    pub len: usize,
}

impl Match {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Matches ordered ascending by start offset.
///
/// Matches coming from different terms may overlap or touch; nothing is
/// deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchSet(Vec<Match>);

impl MatchSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Build from matches in any order. Equal starts keep their relative order.
    pub fn from_unsorted(mut matches: Vec<Match>) -> Self {
        matches.sort_by_key(|m| m.start);
        Self(matches)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Match] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Error information attached to an item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// One highlighted text, as emitted by the CLI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighlightItem {
    /// Caller-supplied identifier (batch records)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Rendered output, safe to embed in markup
    pub rendered: String,

    /// Matches the rendering was built from
    #[serde(default)]
    pub matches: MatchSet,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl HighlightItem {
    pub fn new(rendered: impl Into<String>, matches: MatchSet) -> Self {
        Self {
            id: None,
            rendered: rendered.into(),
            matches,
            errors: Vec::new(),
        }
    }

    /// Create an error item with no rendered content
    pub fn error(error: ItemError) -> Self {
        Self {
            id: None,
            rendered: String::new(),
            matches: MatchSet::new(),
            errors: vec![error],
        }
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id;
        self
    }

    pub fn is_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Ordered collection of items
#[derive(Debug, Clone, Default)]
pub struct ResultSet {
    pub items: Vec<HighlightItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: HighlightItem) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<HighlightItem> for ResultSet {
    fn from_iter<I: IntoIterator<Item = HighlightItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
