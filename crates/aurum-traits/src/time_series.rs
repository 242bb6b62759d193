//! Return series providers.
//!
//! A provider supplies aligned periodic returns per asset. The analytics
//! engines trust it for alignment and never resample.

use async_trait::async_trait;

use crate::error::{TraitError, TraitResult};
use aurum_core::{AssetId, Periodicity, ReturnSeries, ReturnUniverse};

/// Trait for sources of aligned periodic return series.
#[async_trait]
pub trait TimeSeriesProvider: Send + Sync {
    /// Sampling frequency of every series this provider returns.
    fn periodicity(&self) -> Periodicity;

    /// Assets (and benchmarks) this provider can supply.
    async fn available_assets(&self) -> TraitResult<Vec<AssetId>>;

    /// Returns for one asset, or `None` if the provider does not know it.
    async fn return_series(&self, asset: &str) -> TraitResult<Option<ReturnSeries>>;

    /// Returns for several assets at once.
    ///
    /// Fails with [`TraitError::NotFound`] on the first unknown asset.
    async fn universe(&self, assets: &[AssetId]) -> TraitResult<ReturnUniverse> {
        let mut universe = ReturnUniverse::new();
        for asset in assets {
            let series = self
                .return_series(asset.as_str())
                .await?
                .ok_or_else(|| TraitError::not_found(asset.as_str()))?;
            universe.insert(asset.clone(), series);
        }
        Ok(universe)
    }

    /// Returns for every available asset.
    async fn full_universe(&self) -> TraitResult<ReturnUniverse> {
        let assets = self.available_assets().await?;
        self.universe(&assets).await
    }
}
