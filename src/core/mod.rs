//! Core module - Shared data structures and utilities
//!
//! This module provides:
//! - Result model (Match, MatchSet, HighlightItem)
//! - Output rendering for the CLI formats
//! - Markup escaping
//! - Accent/case folding with offset mapping
//! - Input helpers

pub mod error;
pub mod escape;
pub mod model;
pub mod normalize;
pub mod render;
pub mod util;
