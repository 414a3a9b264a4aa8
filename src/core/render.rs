//! Output renderer
//!
//! Renders a ResultSet to the CLI output formats: html, json, jsonl, ansi

use crate::core::model::{HighlightItem, ResultSet};
use std::io::Write;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Highlighted markup only
    #[default]
    Html,
    Json,
    Jsonl,
    /// Colored terminal text
    Ansi,
}

impl OutputFormat {
    /// Whether items carry terminal-styled text instead of markup
    pub fn is_ansi(&self) -> bool {
        matches!(self, OutputFormat::Ansi)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "json" => Ok(OutputFormat::Json),
            "jsonl" => Ok(OutputFormat::Jsonl),
            "ansi" | "term" => Ok(OutputFormat::Ansi),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }
}

/// Renderer for result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> String {
        match self.config.format {
            OutputFormat::Html | OutputFormat::Ansi => self.render_text(result_set),
            OutputFormat::Json => self.render_json(result_set),
            OutputFormat::Jsonl => self.render_jsonl(result_set),
        }
    }

    /// Render to a writer, ending with a newline
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set);
        writeln!(writer, "{}", output)?;
        writer.flush()
    }

    /// One rendered text per item, error items as empty lines, so line N is
    /// item N as long as no rendered text holds a newline of its own
    fn render_text(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .map(|item| {
                if item.is_error() {
                    ""
                } else {
                    item.rendered.as_str()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render as JSON Lines (one JSON object per line)
    fn render_jsonl(&self, result_set: &ResultSet) -> String {
        result_set
            .items
            .iter()
            .filter_map(|item| self.to_json(item))
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    /// Render as a single JSON array
    fn render_json(&self, result_set: &ResultSet) -> String {
        if self.config.pretty {
            serde_json::to_string_pretty(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&result_set.items).unwrap_or_else(|_| "[]".to_string())
        }
    }

    fn to_json(&self, item: &HighlightItem) -> Option<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(item).ok()
        } else {
            serde_json::to_string(item).ok()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ItemError, Match, MatchSet};

    fn sample() -> ResultSet {
        let mut result_set = ResultSet::new();
        result_set.push(HighlightItem::new(
            "a <mark>cat</mark>",
            MatchSet::from_unsorted(vec![Match::new(2, 3)]),
        ));
        result_set.push(HighlightItem::new("no match", MatchSet::new()));
        result_set
    }

    #[test]
    fn test_render_html() {
        let output = Renderer::new(OutputFormat::Html).render(&sample());
        assert_eq!(output, "a <mark>cat</mark>\nno match");
    }

    #[test]
    fn test_render_html_errors_keep_their_line() {
        let mut result_set = ResultSet::new();
        result_set.push(HighlightItem::new("first", MatchSet::new()));
        result_set.push(HighlightItem::error(ItemError::new("INVALID_RECORD", "bad")));
        result_set.push(HighlightItem::new("third", MatchSet::new()));
        let output = Renderer::new(OutputFormat::Html).render(&result_set);
        assert!(!output.contains("INVALID_RECORD"));
        assert_eq!(output.split('\n').collect::<Vec<_>>(), vec!["first", "", "third"]);
    }

    #[test]
    fn test_render_jsonl() {
        let output = Renderer::new(OutputFormat::Jsonl).render(&sample());
        assert_eq!(output.lines().count(), 2);
        let first: serde_json::Value = serde_json::from_str(output.lines().next().unwrap()).unwrap();
        assert_eq!(first["rendered"], "a <mark>cat</mark>");
        assert_eq!(first["matches"][0]["start"], 2);
        assert_eq!(first["matches"][0]["len"], 3);
    }

    #[test]
    fn test_render_json() {
        let output = Renderer::new(OutputFormat::Json).render(&sample());
        assert!(output.starts_with('['));
        assert!(output.ends_with(']'));
    }

    #[test]
    fn test_render_json_pretty() {
        let config = RenderConfig::with_pretty(OutputFormat::Json, true);
        let output = Renderer::with_config(config).render(&sample());
        assert!(output.contains("  "));
    }

    #[test]
    fn test_render_jsonl_pretty() {
        let config = RenderConfig::with_pretty(OutputFormat::Jsonl, true);
        let output = Renderer::with_config(config).render(&sample());
        assert!(output.contains("\n\n"));
    }

    #[test]
    fn test_render_empty() {
        let result_set = ResultSet::new();
        assert!(Renderer::new(OutputFormat::Html).render(&result_set).is_empty());
        assert_eq!(Renderer::new(OutputFormat::Json).render(&result_set), "[]");
    }

    #[test]
    fn test_render_to_writer() {
        let mut buffer = Vec::new();
        Renderer::new(OutputFormat::Html)
            .render_to(&sample(), &mut buffer)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        assert_eq!(output, "a <mark>cat</mark>\nno match\n");
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Jsonl".parse::<OutputFormat>().unwrap(), OutputFormat::Jsonl);
        assert_eq!("ansi".parse::<OutputFormat>().unwrap(), OutputFormat::Ansi);
        assert_eq!("term".parse::<OutputFormat>().unwrap(), OutputFormat::Ansi);
    }

    #[test]
    fn test_output_format_parse_invalid() {
        let result = "md".parse::<OutputFormat>();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Unknown format"));
    }

    #[test]
    fn test_render_config_default() {
        let config = RenderConfig::default();
        assert_eq!(config.format, OutputFormat::Html);
        assert!(!config.pretty);
        assert!(!config.format.is_ansi());
    }
}
