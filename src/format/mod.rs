//! Output formatting and location tracking
//!
//! The generation engine renders into an [`OutputWriter`], which owns the text buffer, the
//! indentation state and the current [`Location`](crate::ir::Location). Layout decisions
//! (indent units, wrap threshold) come from [`GenerateOptions`].

mod config;
mod writer;

pub use config::{DEFAULT_SPLIT_LINES_LONGER_THAN, GenerateOptions};
pub use writer::OutputWriter;
