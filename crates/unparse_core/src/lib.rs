//! Provide shared, pure vocabulary and string helpers for the unparse engine and its backends.
//!
//! This crate is intentionally small and dependency-free. It holds data and deterministic helpers
//! that backends consult while rendering, but no IR types and no engine state.
//!
//! ## Notes
//!
//! - Reserved-word tables live in [`lang::keywords`]. They are backend *data*: the engine only ever
//!   sees them through a backend's keyword set.
//! - [`strings`] holds literal escaping and identifier-casing helpers.

pub mod lang;
pub mod strings;
