//! Error types for portfolio analytics.
//!
//! Aggregation itself never fails; these errors cover construction and
//! validation of holdings and configuration.

use aurum_core::IdentifierError;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding identifier.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Holding identifier is neither a valid ISIN nor a valid CUSIP.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// Invalid configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },
}

impl PortfolioError {
    /// Creates a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
