//! Error types for trait operations.

use thiserror::Error;

/// A specialized Result type for trait operations.
pub type TraitResult<T> = Result<T, TraitError>;

/// Common error type for trait operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl TraitError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a parse error.
    #[must_use]
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<aurum_core::CoreError> for TraitError {
    fn from(e: aurum_core::CoreError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(TraitError::not_found("MSCI ACWI").to_string(), "not found: MSCI ACWI");
        assert_eq!(TraitError::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        assert!(matches!(TraitError::from(io), TraitError::IoError(msg) if msg.contains("missing.csv")));
    }

    #[test]
    fn test_from_core() {
        let err: TraitError = aurum_core::CoreError::invalid_input("bad score").into();
        assert!(matches!(err, TraitError::InvalidInput(_)));
    }
}
