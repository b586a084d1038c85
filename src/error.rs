//! Error types for the Calla library.

use thiserror::Error;

/// The error type for all Calla operations.
#[derive(Debug, Error)]
pub enum CallaError {
    /// The caller supplied malformed input (empty identifier, duplicate field
    /// names). Raised synchronously before any store call.
    #[error("validation error: {0}")]
    Validation(String),

    /// The external document store failed to complete an operation. Surfaced
    /// verbatim; never retried by this library.
    #[error("store error: {0}")]
    Store(String),

    /// Text analysis or pattern compilation failed.
    #[error("analysis error: {0}")]
    Analysis(String),
}

impl CallaError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        CallaError::Validation(msg.into())
    }

    /// Create a store error.
    pub fn store(msg: impl Into<String>) -> Self {
        CallaError::Store(msg.into())
    }

    /// Create an analysis error.
    pub fn analysis(msg: impl Into<String>) -> Self {
        CallaError::Analysis(msg.into())
    }
}

/// A specialized `Result` type for Calla operations.
pub type Result<T> = std::result::Result<T, CallaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CallaError::validation("document id must not be empty");
        assert_eq!(
            err.to_string(),
            "validation error: document id must not be empty"
        );

        let err = CallaError::store("connection refused");
        assert_eq!(err.to_string(), "store error: connection refused");
    }
}
