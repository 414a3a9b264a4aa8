//! Batch flow - Highlight many texts
//!
//! Input is JSON Lines. Each line is either an object
//! `{"id": "...", "text": "..."}` (id optional, string or number) or a bare
//! JSON string. An object with a null or missing `text` is an absent text and
//! renders as nothing. Lines that are not one of these shapes become error
//! items in place; the rest of the batch still runs. Records are independent, so with the `parallel` feature they
//! are highlighted on the rayon pool (output order is kept).

use std::io;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use hilite::core::model::{HighlightItem, ItemError, ResultSet};
use hilite::core::render::{RenderConfig, Renderer};
use hilite::core::util::{read_input, InputSource};
use hilite::{Highlighter, Terms};

use crate::flows::mark::mark_text;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Raw line shape
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRecord {
    Bare(String),
    Object {
        #[serde(default)]
        id: Option<serde_json::Value>,
        #[serde(default)]
        text: Option<String>,
    },
}

/// A text to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRecord {
    pub id: Option<String>,
    /// `None` when the record carried no text
    pub text: Option<String>,
}

/// Statistics for a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub records: usize,
    pub invalid: usize,
    pub matched: usize,
    pub matches: usize,
}

fn id_to_string(id: serde_json::Value) -> Option<String> {
    match id {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Parse JSON Lines input. Blank lines are skipped.
pub fn parse_records(input: &str) -> Vec<Result<BatchRecord, ItemError>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| match serde_json::from_str::<RawRecord>(line) {
            Ok(RawRecord::Bare(text)) => Ok(BatchRecord {
                id: None,
                text: Some(text),
            }),
            Ok(RawRecord::Object { id, text }) => Ok(BatchRecord {
                id: id.and_then(id_to_string),
                text,
            }),
            Err(e) => Err(ItemError::new(
                "INVALID_RECORD",
                format!("line {}: {}", idx + 1, e),
            )),
        })
        .collect()
}

fn highlight_record(
    highlighter: &Highlighter,
    record: &Result<BatchRecord, ItemError>,
    terms: &Terms,
    ansi: bool,
) -> HighlightItem {
    match record {
        Ok(record) => mark_text(highlighter, record.text.as_deref(), terms.clone(), ansi)
            .with_id(record.id.clone()),
        Err(error) => HighlightItem::error(error.clone()),
    }
}

/// Highlight every record, keeping input order
pub fn highlight_records(
    highlighter: &Highlighter,
    records: &[Result<BatchRecord, ItemError>],
    terms: &Terms,
    ansi: bool,
) -> ResultSet {
    #[cfg(feature = "parallel")]
    let items: Vec<HighlightItem> = records
        .par_iter()
        .map(|record| highlight_record(highlighter, record, terms, ansi))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let items: Vec<HighlightItem> = records
        .iter()
        .map(|record| highlight_record(highlighter, record, terms, ansi))
        .collect();

    items.into_iter().collect()
}

/// Summarize a highlighted batch
pub fn batch_stats(result_set: &ResultSet) -> BatchStats {
    let mut stats = BatchStats::default();
    for item in &result_set.items {
        stats.records += 1;
        if item.is_error() {
            stats.invalid += 1;
            continue;
        }
        if !item.matches.is_empty() {
            stats.matched += 1;
            stats.matches += item.matches.len();
        }
    }
    stats
}

/// Run the batch command
pub fn run_batch(
    source: InputSource<'_>,
    terms: Terms,
    highlighter: &Highlighter,
    show_stats: bool,
    config: RenderConfig,
) -> Result<()> {
    let input =
        read_input(source).with_context(|| format!("Failed to read batch: {:?}", source))?;
    let records = parse_records(&input);
    debug!(records = records.len(), terms = terms.len(), "running batch");

    let result_set = highlight_records(highlighter, &records, &terms, config.format.is_ansi());
    let stats = batch_stats(&result_set);
    if stats.invalid > 0 {
        warn!(invalid = stats.invalid, "skipped invalid batch records");
    }

    let renderer = Renderer::with_config(config);
    renderer
        .render_to(&result_set, io::stdout().lock())
        .context("Failed to write output")?;

    if show_stats {
        eprintln!("Batch Statistics:");
        eprintln!("   Records: {}", stats.records);
        eprintln!("   Invalid: {}", stats.invalid);
        eprintln!("   With matches: {}", stats.matched);
        eprintln!("   Matches: {}", stats.matches);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_shapes() {
        let input = "{\"id\":\"a\",\"text\":\"cat\"}\n\"bare cat\"\n\n{\"id\":7,\"text\":\"x\"}\n{\"text\":\"no id\"}\n";
        let records = parse_records(input);
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            Ok(BatchRecord {
                id: Some("a".to_string()),
                text: Some("cat".to_string())
            })
        );
        assert_eq!(
            records[1],
            Ok(BatchRecord {
                id: None,
                text: Some("bare cat".to_string())
            })
        );
        assert_eq!(records[2].as_ref().unwrap().id.as_deref(), Some("7"));
        assert_eq!(records[3].as_ref().unwrap().id, None);
    }

    #[test]
    fn test_parse_records_invalid_line() {
        let records = parse_records("not json\n42\n\"ok\"");
        assert_eq!(records.len(), 3);
        let err = records[0].as_ref().unwrap_err();
        assert_eq!(err.code, "INVALID_RECORD");
        assert!(err.message.starts_with("line 1:"));
        assert!(records[1].is_err());
        assert!(records[2].is_ok());
    }

    #[test]
    fn test_parse_records_missing_or_null_text() {
        let records = parse_records("{\"id\":\"a\",\"text\":null}\n{\"id\":\"b\"}");
        assert_eq!(
            records,
            vec![
                Ok(BatchRecord {
                    id: Some("a".to_string()),
                    text: None
                }),
                Ok(BatchRecord {
                    id: Some("b".to_string()),
                    text: None
                }),
            ]
        );
    }

    #[test]
    fn test_highlight_records_absent_text_keeps_id() {
        let records = parse_records("{\"id\":\"a\",\"text\":null}\n{\"id\":\"b\"}");
        let result_set =
            highlight_records(&Highlighter::default(), &records, &Terms::from("cat"), false);

        assert_eq!(result_set.len(), 2);
        for (item, id) in result_set.items.iter().zip(["a", "b"]) {
            assert!(!item.is_error());
            assert_eq!(item.id.as_deref(), Some(id));
            assert_eq!(item.rendered, "");
            assert!(item.matches.is_empty());
        }
        assert_eq!(batch_stats(&result_set).invalid, 0);
    }

    #[test]
    fn test_highlight_records_keeps_order() {
        let records = parse_records("{\"id\":\"1\",\"text\":\"a cat\"}\nbad\n\"dog <b>\"");
        let terms = Terms::from(vec!["cat", "dog"]);
        let result_set = highlight_records(&Highlighter::default(), &records, &terms, false);

        assert_eq!(result_set.len(), 3);
        assert_eq!(result_set.items[0].id.as_deref(), Some("1"));
        assert_eq!(result_set.items[0].rendered, "a <mark>cat</mark>");
        assert!(result_set.items[1].is_error());
        assert_eq!(result_set.items[2].rendered, "<mark>dog</mark> &lt;b&gt;");
    }

    #[test]
    fn test_batch_stats() {
        let records = parse_records("\"cat cat\"\n\"none\"\n{");
        let result_set =
            highlight_records(&Highlighter::default(), &records, &Terms::from("cat"), false);
        assert_eq!(
            batch_stats(&result_set),
            BatchStats {
                records: 3,
                invalid: 1,
                matched: 1,
                matches: 2
            }
        );
    }
}
