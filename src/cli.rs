//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use hilite::core::render::{OutputFormat, RenderConfig};
use hilite::core::util::InputSource;
use hilite::engine::render::{BEGIN_MARK, END_MARK};
use hilite::{HighlightConfig, Highlighter};

use crate::flows::mark::collect_terms;

/// hilite - highlight search terms in text, with markup-safe output.
#[derive(Parser, Debug)]
#[command(name = "hilite")]
#[command(
    author,
    version,
    about,
    long_about = r#"hilite finds every occurrence of the given terms (ignoring case and
accents) and wraps each one in a marker pair. Text outside the markers is
HTML-escaped, so the output can be embedded directly into a page.

Output formats:
- html: the highlighted markup only (default)
- json: a single JSON array of items with the match offsets
- jsonl: one JSON object per line
- ansi: colored terminal output (nothing escaped)

Examples:
    hilite mark cafe --text "Café society"
    echo "a dog and a cat" | hilite mark cat dog
    hilite mark --query 'black "big cat"' --input notes.txt
    hilite batch records.jsonl cat --format jsonl
"#
)]
pub struct Cli {
    /// Output format (html/json/jsonl/ansi).
    #[arg(
        long,
        global = true,
        default_value = "html",
        value_name = "FORMAT",
        long_help = "Select the output format.\n\n\
Supported values:\n\
- html (default)\n\
- json\n\
- jsonl\n\
- ansi"
    )]
    pub format: String,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(
        long,
        global = true,
        long_help = "Pretty-print JSON and JSONL output with indentation for human readability.\n\n\
Has no effect on html/ansi formats."
    )]
    pub pretty: bool,

    /// Marker inserted before every match.
    #[arg(long, global = true, default_value = BEGIN_MARK, value_name = "MARKUP")]
    pub begin_mark: String,

    /// Marker inserted after every match.
    #[arg(long, global = true, default_value = END_MARK, value_name = "MARKUP")]
    pub end_mark: String,

    /// Disable colored output (ansi format).
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        long_help = "Disable colored output. Matches in the ansi format are then printed\n\
without styling."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (more diagnostics).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Enable debug diagnostics on stderr. RUST_LOG overrides this when set."
    )]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Highlight terms in a single text.
    #[command(
        long_about = "Highlight TERMS in one text. The text comes from --text, --input or\n\
stdin (in that order of preference). One term uses single-term matching;\n\
several terms are matched independently and merged left to right.\n\n\
Examples:\n\
  hilite mark cat --text \"the cat sat\"\n\
  hilite mark --query 'dog \"black cat\"' --input page.txt\n"
    )]
    Mark {
        /// Terms to highlight.
        #[arg(value_name = "TERMS", num_args = 0..)]
        terms: Vec<String>,

        /// Text to highlight.
        #[arg(long, value_name = "TEXT", conflicts_with = "input")]
        text: Option<String>,

        /// File to read the text from.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Free-form query; quoted phrases stay one term.
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,
    },

    /// Highlight terms in every record of a JSON Lines file.
    #[command(
        long_about = "Read JSON Lines records ({\"id\": ..., \"text\": ...} or a bare JSON string)\n\
and highlight TERMS in each. A record with a null or missing text renders as\n\
nothing. Invalid lines are reported as error items and do not stop the batch.\n\
Use - to read stdin.\n\n\
The html and ansi formats print one line per record (blank input lines are\n\
skipped); invalid records print an empty line. Newlines inside a text are\n\
kept as is, so use jsonl when texts may span several lines.\n\n\
Examples:\n\
  hilite batch records.jsonl cat dog --format jsonl\n\
  cat records.jsonl | hilite batch - --query cafe --stats\n"
    )]
    Batch {
        /// JSON Lines file (- for stdin).
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Terms to highlight.
        #[arg(value_name = "TERMS", num_args = 0..)]
        terms: Vec<String>,

        /// Free-form query; quoted phrases stay one term.
        #[arg(long, value_name = "QUERY")]
        query: Option<String>,

        /// Show batch statistics on stderr.
        #[arg(long)]
        stats: bool,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let format: OutputFormat = cli.format.parse().map_err(anyhow::Error::msg)?;
    let render_config = RenderConfig::with_pretty(format, cli.pretty);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let highlighter = Highlighter::new(HighlightConfig {
        begin_mark: cli.begin_mark,
        end_mark: cli.end_mark,
    })
    .context("Invalid marker configuration")?;

    match cli.command {
        Commands::Mark {
            terms,
            text,
            input,
            query,
        } => {
            let source = InputSource::pick(text.as_deref(), input.as_deref());
            let terms = collect_terms(terms, query.as_deref());
            crate::flows::mark::run_mark(source, terms, &highlighter, render_config)
        }

        Commands::Batch {
            file,
            terms,
            query,
            stats,
        } => {
            let source = if file.as_os_str() == "-" {
                InputSource::Stdin
            } else {
                InputSource::File(&file)
            };
            let terms = collect_terms(terms, query.as_deref());
            crate::flows::batch::run_batch(source, terms, &highlighter, stats, render_config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_mark() {
        let cli = Cli::parse_from(["hilite", "mark", "cat", "dog", "--text", "x"]);
        assert_eq!(cli.format, "html");
        assert_eq!(cli.begin_mark, "<mark>");
        match cli.command {
            Commands::Mark { terms, text, .. } => {
                assert_eq!(terms, vec!["cat", "dog"]);
                assert_eq!(text.as_deref(), Some("x"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "hilite",
            "batch",
            "in.jsonl",
            "cat",
            "--format",
            "jsonl",
            "--begin-mark",
            "<b>",
        ]);
        assert_eq!(cli.format, "jsonl");
        assert_eq!(cli.begin_mark, "<b>");
        assert!(matches!(cli.command, Commands::Batch { .. }));
    }

    #[test]
    fn test_run_rejects_unknown_format() {
        let cli = Cli::parse_from(["hilite", "mark", "cat", "--text", "x", "--format", "bogus"]);
        let err = run(cli).unwrap_err();
        assert_eq!(err.to_string(), "Unknown format: bogus");
    }

    #[test]
    fn test_cli_text_conflicts_with_input() {
        let result = Cli::try_parse_from(["hilite", "mark", "--text", "x", "--input", "f.txt"]);
        assert!(result.is_err());
    }
}
