//! Errors raised by a generation pass.

use thiserror::Error;

/// Result of a backend production or engine operation.
pub type GenResult<T = ()> = Result<T, GenerateError>;

/// A generation pass failed; no usable output was produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The backend has no rendering for this construct in its target language.
    ///
    /// Raised only when `fail_on_asserts` is set; otherwise the engine emits an inline comment
    /// and continues.
    #[error("{production} is not supported by the {backend} backend{}", detail_suffix(.detail))]
    Unsupported {
        backend: String,
        production: &'static str,
        detail: Option<String>,
    },

    /// The input tree violates a structural invariant. Never downgraded to a comment.
    #[error("malformed input: {0}")]
    Malformed(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(" ({d})")).unwrap_or_default()
}

impl GenerateError {
    pub fn is_unsupported(&self) -> bool {
        matches!(self, GenerateError::Unsupported { .. })
    }
}
