//! Match renderer
//!
//! Turns a text and its sorted matches into output with marks around every
//! matched span. Rendering runs in two passes:
//!
//! 1. split: match offsets (original character coordinates) become a token
//!    stream of literal slices and open/close marks. Output is always
//!    appended to, never inserted into, so no offset ever needs adjusting.
//! 2. emit: a small state machine walks the tokens, escaping literals and
//!    writing marks through a [`MarkupStyle`].

use std::fmt;

use colored::Colorize;
use serde::Serialize;
use tracing::{debug, trace};

use crate::core::escape::push_escaped;
use crate::core::model::MatchSet;

/// Default opening marker
pub const BEGIN_MARK: &str = "<mark>";

/// Default closing marker
pub const END_MARK: &str = "</mark>";

/// Rendered output that can be embedded in markup without further escaping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeMarkup(pub(crate) String);

impl SafeMarkup {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeMarkup {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SafeMarkup> for String {
    fn from(markup: SafeMarkup) -> Self {
        markup.0
    }
}

/// Whether the emitter is inside a marked span
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkState {
    OutsideMark,
    InsideMark,
}

/// How literals and marks are written
pub trait MarkupStyle {
    fn push_literal(&self, out: &mut String, text: &str, state: MarkState);
    fn push_open(&self, out: &mut String);
    fn push_close(&self, out: &mut String);
}

/// HTML output: literals escaped, marks written verbatim
#[derive(Debug, Clone, Copy)]
pub struct HtmlStyle<'a> {
    pub begin_mark: &'a str,
    pub end_mark: &'a str,
}

impl Default for HtmlStyle<'static> {
    fn default() -> Self {
        Self {
            begin_mark: BEGIN_MARK,
            end_mark: END_MARK,
        }
    }
}

impl MarkupStyle for HtmlStyle<'_> {
    fn push_literal(&self, out: &mut String, text: &str, _state: MarkState) {
        push_escaped(out, text);
    }

    fn push_open(&self, out: &mut String) {
        out.push_str(self.begin_mark);
    }

    fn push_close(&self, out: &mut String) {
        out.push_str(self.end_mark);
    }
}

/// Terminal output: marked literals colored, nothing escaped
#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyle;

impl MarkupStyle for AnsiStyle {
    fn push_literal(&self, out: &mut String, text: &str, state: MarkState) {
        match state {
            MarkState::OutsideMark => out.push_str(text),
            MarkState::InsideMark => {
                out.push_str(&text.black().on_yellow().bold().to_string());
            }
        }
    }

    fn push_open(&self, _out: &mut String) {}

    fn push_close(&self, _out: &mut String) {}
}

/// Token of the split pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'t> {
    Literal(&'t str),
    Open,
    Close,
}

/// Boundary kinds. Closes sort before opens at the same offset so that
/// adjacent matches come out back to back instead of nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Boundary {
    Close,
    Open,
}

/// Split `text` into literal slices and marks at the match boundaries
pub(crate) fn split<'t>(text: &'t str, matches: &MatchSet) -> Vec<Token<'t>> {
    // byte offset of every char boundary, including the end
    let bytes: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_len = bytes.len() - 1;

    let mut events = Vec::with_capacity(matches.len() * 2);
    for m in matches {
        let start = m.start.min(char_len);
        let end = m.start.saturating_add(m.len).min(char_len);
        if start >= end {
            trace!(start = m.start, len = m.len, "skipping empty or out-of-range match");
            continue;
        }
        events.push((start, Boundary::Open));
        events.push((end, Boundary::Close));
    }
    events.sort();

    let mut tokens = Vec::with_capacity(events.len() * 2 + 1);
    let mut cursor = 0;
    for (offset, boundary) in events {
        if offset > cursor {
            tokens.push(Token::Literal(&text[bytes[cursor]..bytes[offset]]));
            cursor = offset;
        }
        tokens.push(match boundary {
            Boundary::Open => Token::Open,
            Boundary::Close => Token::Close,
        });
    }
    if cursor < char_len {
        tokens.push(Token::Literal(&text[bytes[cursor]..]));
    }
    tokens
}

/// Emit tokens through a style.
///
/// Tolerates malformed streams: a close with nothing open is dropped, and
/// marks still open at the end are closed.
pub(crate) fn emit(tokens: &[Token<'_>], style: &impl MarkupStyle) -> String {
    let mut out = String::new();
    let mut depth = 0usize;

    for token in tokens {
        let state = if depth == 0 {
            MarkState::OutsideMark
        } else {
            MarkState::InsideMark
        };
        match *token {
            Token::Literal(text) => style.push_literal(&mut out, text, state),
            Token::Open => {
                style.push_open(&mut out);
                depth += 1;
            }
            Token::Close => match state {
                MarkState::InsideMark => {
                    style.push_close(&mut out);
                    depth -= 1;
                }
                MarkState::OutsideMark => trace!("dropping unmatched close mark"),
            },
        }
    }

    if depth > 0 {
        debug!(depth, "closing marks left open at end of text");
        for _ in 0..depth {
            style.push_close(&mut out);
        }
    }
    out
}

/// Render `text` with marks around `matches` in the given style
pub fn render_with(text: &str, matches: &MatchSet, style: &impl MarkupStyle) -> String {
    emit(&split(text, matches), style)
}

/// Render `text` as escaped HTML with `<mark>` around every match
pub fn render(text: &str, matches: &MatchSet) -> SafeMarkup {
    SafeMarkup(render_with(text, matches, &HtmlStyle::default()))
}

/// Render with custom markers
pub fn render_marked(
    text: &str,
    matches: &MatchSet,
    begin_mark: &str,
    end_mark: &str,
) -> SafeMarkup {
    let style = HtmlStyle {
        begin_mark,
        end_mark,
    };
    SafeMarkup(render_with(text, matches, &style))
}

/// Run `f` with terminal colors forced on or off. The override is process
/// global, so tests that touch it take this lock.
#[cfg(test)]
pub(crate) fn with_colors<R>(enabled: bool, f: impl FnOnce() -> R) -> R {
    static COLORS: std::sync::Mutex<()> = std::sync::Mutex::new(());
    let _guard = COLORS.lock().unwrap_or_else(|e| e.into_inner());
    colored::control::set_override(enabled);
    let out = f();
    colored::control::unset_override();
    out
}
