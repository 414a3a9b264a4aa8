//! Highlighting engine
//!
//! - matcher: accent- and case-insensitive term search
//! - render: marker insertion and escaping
//! - terms: single/multi term input and query parsing
//!
//! Every call is a pure function of its inputs; nothing is cached or shared,
//! so callers may highlight many texts in parallel.

pub mod matcher;
pub mod render;
pub mod terms;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::HighlightError;
use crate::core::model::{HighlightItem, MatchSet};

use matcher::{find_matches, find_matches_multi, is_blank};
use render::{render_with, AnsiStyle, HtmlStyle, MarkupStyle, SafeMarkup, BEGIN_MARK, END_MARK};
use terms::Terms;

/// Marker pair wrapped around every match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub begin_mark: String,
    pub end_mark: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            begin_mark: BEGIN_MARK.to_string(),
            end_mark: END_MARK.to_string(),
        }
    }
}

/// Highlighter bound to a marker configuration
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new(config: HighlightConfig) -> Result<Self, HighlightError> {
        if config.begin_mark.is_empty() {
            return Err(HighlightError::EmptyBeginMark);
        }
        if config.end_mark.is_empty() {
            return Err(HighlightError::EmptyEndMark);
        }
        Ok(Self { config })
    }

    /// Find the matches `terms` would highlight in `text`
    pub fn find<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
    ) -> MatchSet {
        let Some(text) = text.into() else {
            return MatchSet::new();
        };
        match terms.into() {
            Terms::Single(term) => find_matches(text, term.as_deref().unwrap_or_default()),
            Terms::Many(terms) => find_matches_multi(text, &terms),
        }
    }

    /// Highlight `terms` in `text`.
    ///
    /// With a single term, blank text renders as nothing and a blank term
    /// renders the escaped text. With a list, absent text renders as nothing
    /// and anything else renders whatever the terms matched.
    pub fn highlight<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
    ) -> SafeMarkup {
        self.highlight_styled(text, terms, &self.html_style())
            .map(|(rendered, _)| SafeMarkup(rendered))
            .unwrap_or_default()
    }

    /// Highlight and keep the matches alongside the output
    pub fn highlight_to_item<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
    ) -> HighlightItem {
        self.styled_item(text, terms, &self.html_style())
    }

    /// Highlight for a terminal: matches colored, nothing escaped.
    ///
    /// Empty and absent text follow the same rules as [`Highlighter::highlight`].
    pub fn highlight_ansi<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
    ) -> String {
        self.highlight_styled(text, terms, &AnsiStyle)
            .map(|(rendered, _)| rendered)
            .unwrap_or_default()
    }

    /// Terminal variant of [`Highlighter::highlight_to_item`]
    pub fn highlight_ansi_to_item<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
    ) -> HighlightItem {
        self.styled_item(text, terms, &AnsiStyle)
    }

    fn html_style(&self) -> HtmlStyle<'_> {
        HtmlStyle {
            begin_mark: &self.config.begin_mark,
            end_mark: &self.config.end_mark,
        }
    }

    fn styled_item<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
        style: &impl MarkupStyle,
    ) -> HighlightItem {
        match self.highlight_styled(text, terms, style) {
            Some((rendered, matches)) => HighlightItem::new(rendered, matches),
            None => HighlightItem::new(String::new(), MatchSet::new()),
        }
    }

    /// `None` when the text renders as nothing
    fn highlight_styled<'a>(
        &self,
        text: impl Into<Option<&'a str>>,
        terms: impl Into<Terms>,
        style: &impl MarkupStyle,
    ) -> Option<(String, MatchSet)> {
        let text = text.into();
        let terms = terms.into();

        let text = match (&terms, text) {
            (_, None) => return None,
            (Terms::Single(_), Some(text)) if is_blank(text) => return None,
            (_, Some(text)) => text,
        };

        let matches = self.find(text, terms);
        debug!(matches = matches.len(), chars = text.chars().count(), "highlighting text");
        Some((render_with(text, &matches, style), matches))
    }
}

/// Highlight `terms` in `text` with the default `<mark>` markers
pub fn highlight<'a>(text: impl Into<Option<&'a str>>, terms: impl Into<Terms>) -> SafeMarkup {
    Highlighter::default().highlight(text, terms)
}
