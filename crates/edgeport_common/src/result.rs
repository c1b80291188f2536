//! Common result and error types for the Edgeport workspace.

/// The standard result type for operations that can only fail on a bug.
///
/// `Err` indicates a broken internal invariant, not a problem with the user's
/// block or connectivity input. Input problems are reported through the
/// diagnostics sink or the crate-specific error enums.
pub type EdgeportResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Edgeport, not a user input problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
