//! Internal error type for compiler bugs, as opposed to user input errors.

/// Result of an operation that only fails on an internal bug.
pub type VelaResult<T> = Result<T, InternalError>;

/// A bug inside Vela. User-facing problems are reported as elaboration
/// errors and diagnostics, never through this type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("internal compiler error: {message}")]
pub struct InternalError {
    /// What went wrong.
    pub message: String,
}

impl InternalError {
    /// Creates an internal error.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
