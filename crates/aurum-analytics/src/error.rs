//! Error types for the analytics engines.
//!
//! Most metrics degrade to a neutral value instead of failing. The variants
//! here cover the caller errors that remain.

use thiserror::Error;

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Error type for analytics operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalyticsError {
    /// Requested asset is not part of the return universe.
    #[error("unknown asset: {0}")]
    UnknownAsset(String),

    /// Invalid input parameter.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Series failed validation.
    #[error("invalid series: {0}")]
    InvalidSeries(#[from] aurum_core::CoreError),

    /// Math/statistics error.
    #[error("math error: {0}")]
    MathError(String),
}

impl AnalyticsError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Creates an unknown asset error.
    #[must_use]
    pub fn unknown_asset(asset: impl Into<String>) -> Self {
        Self::UnknownAsset(asset.into())
    }
}

impl From<aurum_math::MathError> for AnalyticsError {
    fn from(err: aurum_math::MathError) -> Self {
        AnalyticsError::MathError(err.to_string())
    }
}
