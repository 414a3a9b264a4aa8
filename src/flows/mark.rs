//! Mark flow - Highlight one text

use std::io;

use anyhow::{Context, Result};
use tracing::debug;

use hilite::core::model::{HighlightItem, ResultSet};
use hilite::core::render::{RenderConfig, Renderer};
use hilite::core::util::{read_input, trim_trailing_newline, InputSource};
use hilite::{Highlighter, Terms};

/// Collect CLI terms into the engine's term input.
///
/// Exactly one term takes the single-term path; anything else is a list.
pub fn collect_terms(terms: Vec<String>, query: Option<&str>) -> Terms {
    let mut all = terms;
    if let Some(query) = query {
        all.extend(hilite::parse_query(query));
    }
    if all.len() == 1 {
        Terms::from(all.remove(0))
    } else {
        Terms::Many(all)
    }
}

/// Highlight `text`, producing either markup or terminal text
pub fn mark_text<'a>(
    highlighter: &Highlighter,
    text: impl Into<Option<&'a str>>,
    terms: Terms,
    ansi: bool,
) -> HighlightItem {
    if ansi {
        highlighter.highlight_ansi_to_item(text, terms)
    } else {
        highlighter.highlight_to_item(text, terms)
    }
}

/// Run the mark command
pub fn run_mark(
    source: InputSource<'_>,
    terms: Terms,
    highlighter: &Highlighter,
    config: RenderConfig,
) -> Result<()> {
    let input =
        read_input(source).with_context(|| format!("Failed to read input: {:?}", source))?;
    let text = trim_trailing_newline(&input);
    debug!(terms = terms.len(), "marking text");

    let item = mark_text(highlighter, text, terms, config.format.is_ansi());

    let mut result_set = ResultSet::new();
    result_set.push(item);

    let renderer = Renderer::with_config(config);
    renderer
        .render_to(&result_set, io::stdout().lock())
        .context("Failed to write output")?;

    Ok(())
}
