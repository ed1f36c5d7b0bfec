#![forbid(unsafe_code)]
//! Language-agnostic source IR and unparsing engine
//!
//! Callers build a tree of [`ir`] nodes (code unit, types, members, statements, expressions,
//! type references) and hand it to a [`codegen::CodeGenerator`] paired with a [`backend::Backend`].
//! The generator walks the tree, lets the backend render each node, and returns the text together
//! with a span table recording where every node landed.
//!
//! ## Panic Policy
//!
//! - **Production code**: every production returns [`codegen::GenResult`] and propagates with `?`.
//!   Constructs a backend cannot express follow the unsupported-construct policy; malformed input
//!   is always an error.
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! ## Module Organization
//!
//! - `ir` - the node types and the nullability model
//! - `escape` - keyword sets and identifier escaping
//! - `format` - generation options and the output writer
//! - `codegen` - the dispatch engine and the public generation API
//! - `backend` - the backend contract, shared C-family productions and the reference backends

pub mod backend;
pub mod codegen;
pub mod escape;
pub mod format;
pub mod ir;

pub use backend::{Backend, CSharpBackend, SwiftBackend};
pub use codegen::{CodeGenerator, GenResult, Generated, GenerateError, SpanTable};
pub use format::GenerateOptions;
