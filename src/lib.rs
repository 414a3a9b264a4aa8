//! hilite - accent- and case-insensitive search-match highlighting
//!
//! Locates every occurrence of one or more terms in a text and renders the
//! text with each occurrence wrapped in a marker pair. Text outside the
//! markers is escaped, the markers themselves are emitted as markup.
//!
//! ```
//! let out = hilite::highlight("Café <b>society</b>", vec!["cafe", "SOCIETY"]);
//! assert_eq!(
//!     out.as_str(),
//!     "<mark>Café</mark> &lt;b&gt;<mark>society</mark>&lt;/b&gt;"
//! );
//! ```

pub mod core;
pub mod engine;

pub use crate::core::error::HighlightError;
pub use crate::core::model::{Match, MatchSet};
pub use engine::matcher::{find_matches, find_matches_multi};
pub use engine::render::{render, SafeMarkup};
pub use engine::terms::{parse_query, Terms};
pub use engine::{highlight, HighlightConfig, Highlighter};
