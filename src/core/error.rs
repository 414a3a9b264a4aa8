//! Configuration errors
//!
//! Highlighting itself never fails; only building a highlighter from bad
//! configuration does.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HighlightError {
    #[error("begin marker must not be empty")]
    EmptyBeginMark,

    #[error("end marker must not be empty")]
    EmptyEndMark,
}
