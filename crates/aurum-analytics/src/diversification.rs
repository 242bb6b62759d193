//! Portfolio diversification metrics from the sample covariance matrix.

use aurum_core::{AssetId, ReturnUniverse};
use aurum_math::{covariance_matrix, is_negligible_variance};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};

use crate::config::AnalyticsConfig;
use crate::error::{AnalyticsError, AnalyticsResult};

/// How much volatility a weighted portfolio sheds through imperfect correlation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiversificationMetrics {
    /// Weighted-average volatility over portfolio volatility (1.0 when the
    /// portfolio has no volatility).
    pub diversification_ratio: f64,
    /// Volatility removed by diversification, in percent of the weighted
    /// average volatility.
    pub diversification_benefit_pct: f64,
    /// Pair-weighted average correlation between holdings (1.0 for a single
    /// asset).
    pub weighted_avg_correlation: f64,
    /// Annualized portfolio volatility.
    pub portfolio_volatility: f64,
    /// Annualized weighted average of the individual volatilities.
    pub weighted_avg_volatility: f64,
    /// Number of assets that took part.
    pub assets: usize,
}

/// Computes diversification metrics for a weighted set of assets.
///
/// Assets missing from the universe are ignored and the remaining weights
/// are normalized to sum to one. Series are truncated to their common
/// trailing window. Pairs involving a constant series have no correlation
/// and are left out of the average.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidInput`] if no weighted asset is in the
/// universe, the weights sum to zero or less, or fewer than two common
/// periods are available.
pub fn compute_diversification_metrics(
    universe: &ReturnUniverse,
    weights: &[(AssetId, f64)],
    config: &AnalyticsConfig,
) -> AnalyticsResult<DiversificationMetrics> {
    let present: Vec<(&[f64], f64)> = weights
        .iter()
        .filter_map(|(id, w)| universe.get(id.as_str()).map(|s| (s.as_slice(), *w)))
        .collect();

    if present.is_empty() {
        return Err(AnalyticsError::invalid_input(
            "none of the weighted assets are in the universe",
        ));
    }

    let weight_sum: f64 = present.iter().map(|(_, w)| w).sum();
    if !weight_sum.is_finite() || weight_sum <= 0.0 {
        return Err(AnalyticsError::invalid_input(format!(
            "weights must sum to a positive value, got {weight_sum}"
        )));
    }

    let window = present.iter().map(|(s, _)| s.len()).min().unwrap_or(0);
    if window < 2 {
        return Err(AnalyticsError::invalid_input(format!(
            "need at least 2 common periods, got {window}"
        )));
    }

    let columns: Vec<&[f64]> = present.iter().map(|(s, _)| &s[s.len() - window..]).collect();
    let w = DVector::from_iterator(present.len(), present.iter().map(|(_, w)| w / weight_sum));

    let cov = covariance_matrix(&columns)?;
    let vols: DVector<f64> = cov.diagonal().map(|v| v.max(0.0).sqrt());

    let weighted_avg_vol = w.dot(&vols);
    let portfolio_vol = w.dot(&(&cov * &w)).max(0.0).sqrt();

    let diversification_ratio = if portfolio_vol > 0.0 {
        weighted_avg_vol / portfolio_vol
    } else {
        1.0
    };
    let diversification_benefit_pct = if weighted_avg_vol > 0.0 {
        (1.0 - portfolio_vol / weighted_avg_vol) * 100.0
    } else {
        0.0
    };

    let k = present.len();
    let weighted_avg_correlation = if k > 1 {
        let mut pair_weight = 0.0;
        let mut weighted = 0.0;
        for i in 0..k {
            for j in (i + 1)..k {
                let (var_i, var_j) = (cov[(i, i)], cov[(j, j)]);
                if is_negligible_variance(var_i) || is_negligible_variance(var_j) {
                    continue;
                }
                let rho = (cov[(i, j)] / (var_i * var_j).sqrt()).clamp(-1.0, 1.0);
                weighted += w[i] * w[j] * rho;
                pair_weight += w[i] * w[j];
            }
        }
        if pair_weight > 0.0 {
            weighted / pair_weight
        } else {
            0.0
        }
    } else {
        1.0
    };

    let scale = config.periods_per_year().sqrt();
    Ok(DiversificationMetrics {
        diversification_ratio,
        diversification_benefit_pct,
        weighted_avg_correlation,
        portfolio_volatility: portfolio_vol * scale,
        weighted_avg_volatility: weighted_avg_vol * scale,
        assets: k,
    })
}
