//! Error types for the Aurum core crate.
//!
//! The analytics engines themselves are lenient and rarely fail; these errors
//! cover construction of validated values (identifiers, ESG score records).

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing core values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid security identifier.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// An ESG sub-score outside the accepted range.
    #[error("Invalid ESG score for '{identifier}': {field} = {value} (expected 0-100)")]
    InvalidScore {
        /// Identifier of the offending record.
        identifier: String,
        /// Name of the sub-score.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A return value that cannot be compounded.
    #[error("Invalid return at period {index}: {value}")]
    InvalidReturn {
        /// Zero-based period index.
        index: usize,
        /// The rejected value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input: {reason}")]
    InvalidInput {
        /// Description of the invalid input.
        reason: String,
    },
}

impl CoreError {
    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Errors raised while validating security identifiers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Wrong number of characters.
    #[error("Invalid {id_type} length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Identifier kind ("ISIN", "CUSIP").
        id_type: &'static str,
        /// Expected length.
        expected: usize,
        /// Actual length.
        actual: usize,
    },

    /// A character outside the permitted alphabet.
    #[error("Invalid character '{ch}' at position {position} in {id_type}")]
    InvalidCharacter {
        /// Identifier kind.
        id_type: &'static str,
        /// The offending character.
        ch: char,
        /// Zero-based position.
        position: usize,
    },

    /// Structural problem other than length or alphabet.
    #[error("Invalid {id_type} format: {reason}")]
    InvalidFormat {
        /// Identifier kind.
        id_type: &'static str,
        /// Description of the problem.
        reason: String,
    },

    /// Check digit does not match.
    #[error("Invalid {id_type} check digit: {value}")]
    InvalidCheckDigit {
        /// Identifier kind.
        id_type: &'static str,
        /// The full identifier.
        value: String,
    },

    /// Value is neither a valid ISIN nor a valid CUSIP.
    #[error("Unrecognized security identifier: {0}")]
    Unrecognized(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_input("empty universe");
        assert!(err.to_string().contains("empty universe"));

        let err = CoreError::InvalidScore {
            identifier: "US0378331005".to_string(),
            field: "social",
            value: 140.0,
        };
        assert!(err.to_string().contains("social"));
        assert!(err.to_string().contains("US0378331005"));
    }

    #[test]
    fn test_identifier_error_converts() {
        let err: CoreError = IdentifierError::Unrecognized("XYZ".to_string()).into();
        assert!(err.to_string().contains("XYZ"));
    }
}
