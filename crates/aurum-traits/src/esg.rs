//! ESG score table loaders.

use async_trait::async_trait;

use crate::error::TraitResult;
use aurum_core::EsgScoreTables;

/// Trait for sources of cached per-security ESG scores.
///
/// Loaders read both tables wholesale; the aggregator receives them by
/// reference and never calls back into the source.
#[async_trait]
pub trait EsgScoreSource: Send + Sync {
    /// Human-readable name of the source, for logs.
    fn name(&self) -> &str;

    /// Loads the ISIN- and CUSIP-keyed tables.
    ///
    /// Implementations reject records whose scores fall outside [0, 100].
    async fn load_tables(&self) -> TraitResult<EsgScoreTables>;
}
