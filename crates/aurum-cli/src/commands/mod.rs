//! CLI command implementations.

pub mod beta;
pub mod config;
pub mod diversification;
pub mod esg;
pub mod performance;
pub mod simulate;

// Re-export submodules for convenience
pub use beta::BetaArgs;
pub use config::ConfigArgs;
pub use diversification::DiversificationArgs;
pub use esg::EsgArgs;
pub use performance::PerformanceArgs;
pub use simulate::SimulateArgs;

use std::path::Path;

use anyhow::Context;
use aurum_core::{Periodicity, ReturnSeries, ReturnUniverse};
use aurum_ext_file::CsvReturnSource;

use crate::error::{CliError, CliResult};

/// Loads every series from a wide return CSV.
pub fn load_universe(path: &Path) -> anyhow::Result<ReturnUniverse> {
    let source = CsvReturnSource::new(path)
        .with_context(|| format!("failed to read returns from {}", path.display()))?;
    tracing::info!(
        assets = source.loaded_universe().len(),
        periods = source.loaded_universe().min_length(),
        "loaded return file"
    );
    Ok(source.into_universe())
}

/// Looks up a series, failing with [`CliError::UnknownAsset`].
pub fn require_series<'a>(universe: &'a ReturnUniverse, asset: &str) -> CliResult<&'a ReturnSeries> {
    universe
        .get(asset)
        .ok_or_else(|| CliError::UnknownAsset(asset.to_string()))
}

/// Parses a periodicity name or code.
pub fn parse_periodicity(s: &str) -> CliResult<Periodicity> {
    Periodicity::from_code(s).ok_or_else(|| {
        CliError::InvalidArgument(format!(
            "unknown periodicity '{s}' (use daily, weekly, monthly, quarterly or annual)"
        ))
    })
}

/// Validates an annual rate given as a fraction.
pub fn validate_rate(rate: f64) -> CliResult<f64> {
    if !rate.is_finite() || !(-1.0..=1.0).contains(&rate) {
        return Err(CliError::InvalidArgument(format!(
            "rate {rate} must be a fraction between -1 and 1 (0.03 for 3%)"
        )));
    }
    Ok(rate)
}

/// Cuts two series to their common trailing window.
pub fn trailing_overlap<'a>(a: &'a [f64], b: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = a.len().min(b.len());
    (&a[a.len() - n..], &b[b.len() - n..])
}
