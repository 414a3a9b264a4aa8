//! hilite - highlight search terms in text
//!
//! hilite provides:
//! - Accent- and case-insensitive term matching
//! - Marker insertion with HTML escaping of everything else
//! - Single-text and JSON Lines batch commands
//! - Unified output formats (html/json/jsonl/ansi)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod flows;

/// Log to stderr; RUST_LOG wins over the verbosity flags
fn init_tracing(quiet: bool, verbose: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose);
    cli::run(cli)
}
