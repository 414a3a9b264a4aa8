//! Common utilities

use std::fs;
use std::io::Read;
use std::path::Path;

/// Where the text to highlight comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource<'a> {
    Inline(&'a str),
    File(&'a Path),
    Stdin,
}

impl<'a> InputSource<'a> {
    /// Inline text wins over a file; with neither, read stdin
    pub fn pick(text: Option<&'a str>, path: Option<&'a Path>) -> Self {
        match (text, path) {
            (Some(text), _) => InputSource::Inline(text),
            (None, Some(path)) => InputSource::File(path),
            (None, None) => InputSource::Stdin,
        }
    }
}

/// Read the whole input as text.
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn read_input(source: InputSource<'_>) -> std::io::Result<String> {
    match source {
        InputSource::Inline(text) => Ok(text.to_string()),
        InputSource::File(path) => {
            let bytes = fs::read(path)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        InputSource::Stdin => {
            let mut bytes = Vec::new();
            std::io::stdin().read_to_end(&mut bytes)?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
    }
}

/// Drop a single trailing newline (as left by `echo` or an editor)
pub fn trim_trailing_newline(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
