//! Composite performance records.

use serde::{Deserialize, Serialize};

use super::drawdown::max_drawdown;
use super::ratios::{
    calmar_ratio, information_ratio_with, sharpe_ratio, sortino_ratio_with, tracking_error_with,
};
use super::returns::{annualized_return_with, annualized_volatility_with, total_return};
use crate::config::AnalyticsConfig;

/// Historical performance of a single return series.
///
/// A derived value, recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// Geometric annualized return.
    pub annualized_return: f64,
    /// Annualized sample volatility.
    pub annualized_volatility: f64,
    /// Sharpe ratio.
    pub sharpe_ratio: f64,
    /// Maximum drawdown as a positive fraction.
    pub max_drawdown: f64,
    /// Calmar ratio.
    pub calmar_ratio: f64,
    /// Sortino ratio.
    pub sortino_ratio: f64,
    /// Information ratio against the benchmark, when one was given and the
    /// ratio is defined.
    pub information_ratio: Option<f64>,
}

/// Performance metrics plus the extra figures shown alongside them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceSummary {
    /// The core metrics.
    #[serde(flatten)]
    pub metrics: PerformanceMetrics,
    /// Total compounded return over the whole series.
    pub total_return: f64,
    /// Tracking error against the benchmark.
    pub tracking_error: Option<f64>,
    /// Number of periods in the series.
    pub periods: usize,
}

/// Computes all historical metrics for a monthly series.
///
/// This is the main entry point of the performance engine. The benchmark,
/// when given, only feeds the information ratio.
///
/// # Example
///
/// ```rust
/// use aurum_analytics::performance::calculate_historical_metrics;
///
/// let returns = [0.02, -0.01, 0.015, 0.03, -0.02, 0.01];
/// let metrics = calculate_historical_metrics(&returns, None, 0.03);
///
/// assert!(metrics.annualized_volatility > 0.0);
/// assert!(metrics.max_drawdown >= 0.0);
/// assert!(metrics.information_ratio.is_none());
/// ```
#[must_use]
pub fn calculate_historical_metrics(
    returns: &[f64],
    benchmark: Option<&[f64]>,
    risk_free_rate: f64,
) -> PerformanceMetrics {
    metrics_for(returns, benchmark, risk_free_rate, 12.0)
}

/// Computes all historical metrics using the rate and periodicity in `config`.
#[must_use]
pub fn calculate_historical_metrics_with(
    returns: &[f64],
    benchmark: Option<&[f64]>,
    config: &AnalyticsConfig,
) -> PerformanceMetrics {
    metrics_for(
        returns,
        benchmark,
        config.risk_free_rate,
        config.periods_per_year(),
    )
}

/// Computes the metrics plus total return and tracking error.
#[must_use]
pub fn calculate_performance_summary(
    returns: &[f64],
    benchmark: Option<&[f64]>,
    config: &AnalyticsConfig,
) -> PerformanceSummary {
    let ppy = config.periods_per_year();
    PerformanceSummary {
        metrics: calculate_historical_metrics_with(returns, benchmark, config),
        total_return: total_return(returns),
        tracking_error: benchmark.and_then(|b| tracking_error_with(returns, b, ppy)),
        periods: returns.len(),
    }
}

fn metrics_for(
    returns: &[f64],
    benchmark: Option<&[f64]>,
    risk_free_rate: f64,
    periods_per_year: f64,
) -> PerformanceMetrics {
    let annualized_return = annualized_return_with(returns, periods_per_year);
    let annualized_volatility = annualized_volatility_with(returns, periods_per_year);
    let max_drawdown = max_drawdown(returns);

    PerformanceMetrics {
        annualized_return,
        annualized_volatility,
        sharpe_ratio: sharpe_ratio(annualized_return, annualized_volatility, risk_free_rate),
        max_drawdown,
        calmar_ratio: calmar_ratio(annualized_return, max_drawdown),
        sortino_ratio: sortino_ratio_with(returns, risk_free_rate, periods_per_year),
        information_ratio: benchmark
            .and_then(|b| information_ratio_with(returns, b, periods_per_year)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use aurum_core::Periodicity;

    const PORTFOLIO: [f64; 12] = [
        0.021, -0.013, 0.034, 0.008, -0.027, 0.015, 0.011, -0.004, 0.019, 0.026, -0.018, 0.007,
    ];
    const BENCHMARK: [f64; 12] = [
        0.015, -0.010, 0.025, 0.010, -0.020, 0.012, 0.009, -0.006, 0.014, 0.020, -0.015, 0.005,
    ];

    #[test]
    fn test_empty_series_is_neutral() {
        let m = calculate_historical_metrics(&[], None, 0.03);
        assert_eq!(m.annualized_return, 0.0);
        assert_eq!(m.annualized_volatility, 0.0);
        assert_eq!(m.sharpe_ratio, 0.0);
        assert_eq!(m.max_drawdown, 0.0);
        assert_eq!(m.calmar_ratio, 0.0);
        assert_eq!(m.sortino_ratio, 0.0);
        assert!(m.information_ratio.is_none());
    }

    #[test]
    fn test_metrics_are_consistent() {
        let m = calculate_historical_metrics(&PORTFOLIO, Some(&BENCHMARK), 0.03);

        assert_relative_eq!(
            m.sharpe_ratio,
            (m.annualized_return - 0.03) / m.annualized_volatility,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            m.calmar_ratio,
            m.annualized_return / m.max_drawdown,
            epsilon = 1e-12
        );
        assert!(m.sortino_ratio != 0.0);
        assert!(m.information_ratio.is_some());
    }

    #[test]
    fn test_benchmark_length_mismatch() {
        let m = calculate_historical_metrics(&PORTFOLIO, Some(&BENCHMARK[..6]), 0.03);
        assert!(m.information_ratio.is_none());
    }

    #[test]
    fn test_config_periodicity() {
        let config = AnalyticsConfig::default().with_periodicity(Periodicity::Quarterly);
        let m = calculate_historical_metrics_with(&PORTFOLIO, None, &config);
        assert_relative_eq!(
            m.annualized_return,
            annualized_return_with(&PORTFOLIO, 4.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_summary() {
        let config = AnalyticsConfig::default();
        let summary = calculate_performance_summary(&PORTFOLIO, Some(&BENCHMARK), &config);
        assert_eq!(summary.periods, 12);
        assert_relative_eq!(summary.total_return, total_return(&PORTFOLIO), epsilon = 1e-12);
        assert!(summary.tracking_error.unwrap() > 0.0);
        assert_eq!(
            summary.metrics,
            calculate_historical_metrics(&PORTFOLIO, Some(&BENCHMARK), 0.03)
        );
    }

    #[test]
    fn test_serialized_field_names() {
        let m = calculate_historical_metrics(&PORTFOLIO, None, 0.03);
        let json = serde_json::to_value(m).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 7);
        assert!(object["information_ratio"].is_null());
        assert!(object.contains_key("sortino_ratio"));
    }

    #[test]
    fn test_idempotent() {
        let a = calculate_historical_metrics(&PORTFOLIO, Some(&BENCHMARK), 0.03);
        let b = calculate_historical_metrics(&PORTFOLIO, Some(&BENCHMARK), 0.03);
        assert_eq!(a, b);
    }
}
