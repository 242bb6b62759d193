//! Beta (linear sensitivity) of assets to a benchmark series.
//!
//! `beta = Cov(asset, benchmark) / Var(benchmark)` using sample moments over
//! the overlapping history. Series are taken as already aligned; when lengths
//! differ the most recent common periods are used.

use std::cmp::Ordering;

use aurum_core::{maybe_parallel_map, AssetId, ReturnSeries, ReturnUniverse};
use aurum_math::{correlation, is_negligible_variance, sample_covariance, sample_variance};
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Trailing windows of equal length over two series.
fn overlap<'a>(asset: &'a [f64], benchmark: &'a [f64]) -> (&'a [f64], &'a [f64]) {
    let n = asset.len().min(benchmark.len());
    (&asset[asset.len() - n..], &benchmark[benchmark.len() - n..])
}

/// Beta of `asset` against `benchmark`.
///
/// `None` with fewer than two overlapping observations or when the benchmark
/// is constant over the window. The beta of a series against itself is
/// exactly 1.
///
/// ```rust
/// use aurum_analytics::beta::compute_beta;
///
/// let benchmark = [0.01, -0.02, 0.03, 0.005];
/// let levered: Vec<f64> = benchmark.iter().map(|r| 2.0 * r).collect();
///
/// assert!((compute_beta(&levered, &benchmark).unwrap() - 2.0).abs() < 1e-12);
/// assert_eq!(compute_beta(&benchmark, &benchmark), Some(1.0));
/// assert_eq!(compute_beta(&benchmark, &[0.01; 4]), None);
/// ```
#[must_use]
pub fn compute_beta(asset: &[f64], benchmark: &[f64]) -> Option<f64> {
    let (asset, benchmark) = overlap(asset, benchmark);
    let variance = sample_variance(benchmark).ok()?;
    if is_negligible_variance(variance) {
        return None;
    }
    let covariance = sample_covariance(asset, benchmark).ok()?;
    Some(covariance / variance)
}

/// Beta of one asset against the chosen benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaResult {
    /// The asset.
    pub asset: AssetId,
    /// Beta, or `None` when not computable.
    pub beta: Option<f64>,
    /// Number of overlapping periods used.
    pub observations: usize,
    /// Correlation with the benchmark, `None` when either side is constant.
    pub correlation: Option<f64>,
    /// Share of the asset's variance explained by the benchmark.
    pub r_squared: Option<f64>,
}

impl BetaResult {
    /// Computes beta and the companion statistics for one asset.
    #[must_use]
    pub fn compute(asset: AssetId, series: &[f64], benchmark: &[f64]) -> Self {
        let (window, bench) = overlap(series, benchmark);
        let correlation = correlation(window, bench).ok();

        Self {
            asset,
            beta: compute_beta(window, bench),
            observations: window.len(),
            correlation,
            r_squared: correlation.map(|c| c * c),
        }
    }
}

/// Ordering of rows in a [`BetaMatrix`].
///
/// Rows without a beta always sort last, then ties break on the asset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortPolicy {
    /// Largest absolute beta first.
    #[default]
    DescendingAbsBeta,
    /// Largest beta first.
    DescendingBeta,
    /// Smallest beta first.
    AscendingBeta,
    /// Alphabetical by asset id.
    Asset,
}

impl SortPolicy {
    fn compare(self, a: &BetaResult, b: &BetaResult) -> Ordering {
        let by_beta = match self {
            SortPolicy::Asset => Ordering::Equal,
            _ => match (a.beta, b.beta) {
                (Some(x), Some(y)) => match self {
                    SortPolicy::DescendingAbsBeta => y.abs().total_cmp(&x.abs()),
                    SortPolicy::DescendingBeta => y.total_cmp(&x),
                    _ => x.total_cmp(&y),
                },
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        };
        by_beta.then_with(|| a.asset.cmp(&b.asset))
    }
}

/// Betas of every asset in a universe against one benchmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetaMatrix {
    /// The benchmark the betas are measured against.
    pub benchmark: AssetId,
    /// One row per non-benchmark asset.
    pub results: Vec<BetaResult>,
}

impl BetaMatrix {
    /// Returns the matrix with rows reordered by `policy`.
    #[must_use]
    pub fn sorted(mut self, policy: SortPolicy) -> Self {
        self.sort(policy);
        self
    }

    /// Reorders rows in place.
    pub fn sort(&mut self, policy: SortPolicy) {
        self.results.sort_by(|a, b| policy.compare(a, b));
    }

    /// Looks up the row for one asset.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<&BetaResult> {
        self.results.iter().find(|r| r.asset.as_str() == asset)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns true if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over rows in their current order.
    pub fn iter(&self) -> std::slice::Iter<'_, BetaResult> {
        self.results.iter()
    }
}

/// Computes the beta of every other asset in `universe` against `benchmark`.
///
/// Rows come back in asset-id order; use [`BetaMatrix::sorted`] for display
/// ordering. Per-asset work runs in parallel under `config.parallel`.
///
/// # Errors
///
/// Returns [`AnalyticsError::UnknownAsset`] if the benchmark is not in the
/// universe.
pub fn compute_beta_matrix(
    universe: &ReturnUniverse,
    benchmark: &str,
    config: &AnalyticsConfig,
) -> AnalyticsResult<BetaMatrix> {
    let bench_series = universe
        .get(benchmark)
        .ok_or_else(|| AnalyticsError::unknown_asset(benchmark))?;

    if sample_variance(bench_series.as_slice()).map_or(true, is_negligible_variance) {
        log::warn!("benchmark {benchmark} has no variance; every beta is undefined");
    }

    let assets: Vec<(&AssetId, &ReturnSeries)> = universe
        .iter()
        .filter(|(id, _)| id.as_str() != benchmark)
        .collect();

    let results = maybe_parallel_map(&assets, &config.parallel, |(id, series)| {
        BetaResult::compute((*id).clone(), series.as_slice(), bench_series.as_slice())
    });

    log::debug!("computed {} betas against {benchmark}", results.len());

    Ok(BetaMatrix {
        benchmark: AssetId::new(benchmark),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn universe() -> ReturnUniverse {
        let global = vec![0.012, -0.021, 0.034, 0.008, -0.015, 0.022, 0.005, -0.009];
        let levered: Vec<f64> = global.iter().map(|r| 1.5 * r + 0.001).collect();
        let inverse: Vec<f64> = global.iter().map(|r| -0.5 * r).collect();
        ReturnUniverse::new()
            .with_series("GLOBAL", global)
            .with_series("LEVERED", levered)
            .with_series("INVERSE", inverse)
            .with_series("CASH", vec![0.002; 8])
    }

    #[test]
    fn test_self_beta_is_exactly_one() {
        let x = [0.013, -0.021, 0.004, 0.032, -0.007, 0.011];
        assert_eq!(compute_beta(&x, &x), Some(1.0));
    }

    #[test]
    fn test_beta_needs_two_observations() {
        assert_eq!(compute_beta(&[0.01], &[0.02]), None);
        assert_eq!(compute_beta(&[], &[]), None);
    }

    #[test]
    fn test_beta_uses_trailing_overlap() {
        let benchmark = [0.01, -0.02, 0.03, 0.005];
        let asset = [0.5, 0.02, -0.04, 0.06, 0.01];
        assert_relative_eq!(compute_beta(&asset, &benchmark).unwrap(), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_matrix_excludes_benchmark() {
        let matrix = compute_beta_matrix(&universe(), "GLOBAL", &AnalyticsConfig::default()).unwrap();
        assert_eq!(matrix.benchmark.as_str(), "GLOBAL");
        assert_eq!(matrix.len(), 3);
        assert!(matrix.get("GLOBAL").is_none());

        let levered = matrix.get("LEVERED").unwrap();
        assert_relative_eq!(levered.beta.unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(levered.r_squared.unwrap(), 1.0, epsilon = 1e-12);
        assert_eq!(levered.observations, 8);

        let cash = matrix.get("CASH").unwrap();
        assert_relative_eq!(cash.beta.unwrap(), 0.0, epsilon = 1e-12);
        assert!(cash.correlation.is_none());
    }

    #[test]
    fn test_constant_benchmark_gives_no_betas() {
        let matrix = compute_beta_matrix(&universe(), "CASH", &AnalyticsConfig::default()).unwrap();
        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|r| r.beta.is_none()));
    }

    #[test]
    fn test_unknown_benchmark() {
        let err = compute_beta_matrix(&universe(), "GOLD", &AnalyticsConfig::default()).unwrap_err();
        assert_eq!(err, AnalyticsError::UnknownAsset("GOLD".to_string()));
    }

    #[test]
    fn test_sort_policies() {
        let matrix = compute_beta_matrix(&universe(), "GLOBAL", &AnalyticsConfig::default()).unwrap();
        let order = |m: &BetaMatrix| -> Vec<String> {
            m.iter().map(|r| r.asset.to_string()).collect()
        };

        let by_abs = matrix.clone().sorted(SortPolicy::DescendingAbsBeta);
        assert_eq!(order(&by_abs), vec!["LEVERED", "INVERSE", "CASH"]);

        let ascending = matrix.clone().sorted(SortPolicy::AscendingBeta);
        assert_eq!(order(&ascending), vec!["INVERSE", "CASH", "LEVERED"]);

        let descending = matrix.clone().sorted(SortPolicy::DescendingBeta);
        assert_eq!(order(&descending), vec!["LEVERED", "CASH", "INVERSE"]);

        let by_asset = matrix.sorted(SortPolicy::Asset);
        assert_eq!(order(&by_asset), vec!["CASH", "INVERSE", "LEVERED"]);
    }

    #[test]
    fn test_missing_betas_sort_last() {
        let mut matrix = BetaMatrix {
            benchmark: AssetId::new("B"),
            results: vec![
                BetaResult {
                    asset: AssetId::new("A"),
                    beta: None,
                    observations: 1,
                    correlation: None,
                    r_squared: None,
                },
                BetaResult {
                    asset: AssetId::new("Z"),
                    beta: Some(-0.1),
                    observations: 12,
                    correlation: None,
                    r_squared: None,
                },
            ],
        };
        for policy in [
            SortPolicy::DescendingAbsBeta,
            SortPolicy::DescendingBeta,
            SortPolicy::AscendingBeta,
        ] {
            matrix.sort(policy);
            assert_eq!(matrix.results[0].asset.as_str(), "Z");
        }
    }
}
