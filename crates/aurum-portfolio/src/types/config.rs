//! Configuration for ESG aggregation.

use aurum_core::ParallelPolicy;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};
use crate::esg::LookupStep;

/// Treatment of holdings with a negative market value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeValuePolicy {
    /// Leave the holding out of both the matched and the total value and
    /// count it as excluded.
    #[default]
    Exclude,
    /// Keep the signed value, so short positions offset long ones.
    SignedWeight,
}

/// Configuration for ESG aggregation.
///
/// Controls identifier resolution, rounding, and parallelism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsgConfig {
    /// Treatment of negative holding values.
    pub negative_values: NegativeValuePolicy,

    /// Ordered lookup steps tried for each holding. The first hit wins.
    pub lookup_chain: Vec<LookupStep>,

    /// Decimal places kept on the coverage percentage.
    pub coverage_decimals: u32,

    /// When to resolve holdings in parallel.
    pub parallel: ParallelPolicy,
}

impl Default for EsgConfig {
    fn default() -> Self {
        Self {
            negative_values: NegativeValuePolicy::Exclude,
            lookup_chain: LookupStep::default_chain(),
            coverage_decimals: 1,
            parallel: ParallelPolicy::default(),
        }
    }
}

impl EsgConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: ParallelPolicy::sequential(),
            ..Self::default()
        }
    }

    /// Sets the negative value policy.
    #[must_use]
    pub fn with_negative_values(mut self, policy: NegativeValuePolicy) -> Self {
        self.negative_values = policy;
        self
    }

    /// Replaces the lookup chain.
    #[must_use]
    pub fn with_lookup_chain(mut self, chain: Vec<LookupStep>) -> Self {
        self.lookup_chain = chain;
        self
    }

    /// Appends the embedded-CUSIP fallback for ISIN holdings.
    #[must_use]
    pub fn with_cusip_from_isin(mut self) -> Self {
        if !self.lookup_chain.contains(&LookupStep::CusipFromIsin) {
            self.lookup_chain.push(LookupStep::CusipFromIsin);
        }
        self
    }

    /// Sets the coverage rounding precision.
    #[must_use]
    pub fn with_coverage_decimals(mut self, decimals: u32) -> Self {
        self.coverage_decimals = decimals;
        self
    }

    /// Sets the parallel policy.
    #[must_use]
    pub fn with_parallel(mut self, parallel: ParallelPolicy) -> Self {
        self.parallel = parallel;
        self
    }

    /// Checks the configuration for settings that cannot produce a result.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] for an empty lookup chain or
    /// a rounding precision above 10 decimals.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.lookup_chain.is_empty() {
            return Err(PortfolioError::invalid_config("lookup chain is empty"));
        }
        if self.coverage_decimals > 10 {
            return Err(PortfolioError::invalid_config(format!(
                "coverage_decimals must be at most 10, got {}",
                self.coverage_decimals
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = EsgConfig::default();
        assert_eq!(config.negative_values, NegativeValuePolicy::Exclude);
        assert_eq!(config.lookup_chain, vec![LookupStep::Isin, LookupStep::Cusip]);
        assert_eq!(config.coverage_decimals, 1);
        assert!(config.parallel.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sequential() {
        assert!(!EsgConfig::sequential().parallel.enabled);
    }

    #[test]
    fn test_cusip_from_isin_is_appended_once() {
        let config = EsgConfig::new().with_cusip_from_isin().with_cusip_from_isin();
        assert_eq!(
            config.lookup_chain,
            vec![LookupStep::Isin, LookupStep::Cusip, LookupStep::CusipFromIsin]
        );
    }

    #[test]
    fn test_validate() {
        assert!(EsgConfig::new().with_lookup_chain(vec![]).validate().is_err());
        assert!(EsgConfig::new().with_coverage_decimals(11).validate().is_err());
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EsgConfig =
            serde_json::from_str(r#"{"negative_values":"signed_weight"}"#).unwrap();
        assert_eq!(config.negative_values, NegativeValuePolicy::SignedWeight);
        assert_eq!(config.lookup_chain, LookupStep::default_chain());
    }
}
