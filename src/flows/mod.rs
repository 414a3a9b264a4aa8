//! Flows module - Commands built on the highlighting engine
//!
//! Provides:
//! - mark: Highlight a single text
//! - batch: Highlight many texts from a JSON Lines source

pub mod batch;
pub mod mark;
