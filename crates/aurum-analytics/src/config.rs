//! Configuration shared by the performance and beta engines.

use aurum_core::{ParallelPolicy, Periodicity};
use serde::{Deserialize, Serialize};

/// Default annual risk-free rate (3%).
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.03;

/// Settings for the analytics engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate used by the Sharpe and Sortino ratios.
    pub risk_free_rate: f64,

    /// Sampling frequency of the input series.
    pub periodicity: Periodicity,

    /// When to compute per-asset results in parallel.
    pub parallel: ParallelPolicy,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            periodicity: Periodicity::Monthly,
            parallel: ParallelPolicy::default(),
        }
    }
}

impl AnalyticsConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the annual risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the periodicity.
    #[must_use]
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Sets the parallel policy.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    /// Periods per year as a float.
    #[must_use]
    pub fn periods_per_year(&self) -> f64 {
        self.periodicity.annualization_factor()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnalyticsConfig::default();
        assert_eq!(config.risk_free_rate, 0.03);
        assert_eq!(config.periodicity, Periodicity::Monthly);
        assert_eq!(config.periods_per_year(), 12.0);
    }

    #[test]
    fn test_builder() {
        let config = AnalyticsConfig::new()
            .with_risk_free_rate(0.045)
            .with_periodicity(Periodicity::Daily)
            .with_parallel(ParallelPolicy::sequential());
        assert_eq!(config.risk_free_rate, 0.045);
        assert_eq!(config.periods_per_year(), 252.0);
        assert!(!config.parallel.enabled);
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let config: AnalyticsConfig = serde_json::from_str(r#"{"risk_free_rate":0.01}"#).unwrap();
        assert_eq!(config.risk_free_rate, 0.01);
        assert_eq!(config.periodicity, Periodicity::Monthly);
        assert_eq!(config.parallel, ParallelPolicy::default());
    }
}
