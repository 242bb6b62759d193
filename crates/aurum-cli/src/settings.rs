//! Configuration file handling.
//!
//! The file is TOML with one table per engine:
//!
//! ```toml
//! [analytics]
//! risk_free_rate = 0.03
//! periodicity = "Monthly"
//!
//! [esg]
//! negative_values = "exclude"
//! lookup_chain = ["isin", "cusip"]
//! coverage_decimals = 1
//!
//! [simulation]
//! annual_return = 0.07
//! annual_volatility = 0.12
//! periods = 60
//! ```
//!
//! Missing tables and keys take their defaults.

use std::path::Path;

use aurum_analytics::{AnalyticsConfig, SimulationParams};
use aurum_portfolio::EsgConfig;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Performance, beta and diversification settings.
    pub analytics: AnalyticsConfig,
    /// ESG aggregation settings.
    pub esg: EsgConfig,
    /// Default simulation parameters.
    pub simulation: SimulationParams,
}

impl Settings {
    /// Loads settings from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        let settings = Self::from_toml(&content)?;
        tracing::info!("loaded configuration from {}", path.display());
        Ok(settings)
    }

    /// Parses and validates TOML settings.
    pub fn from_toml(content: &str) -> CliResult<Self> {
        let settings: Self = toml::from_str(content).map_err(|e| CliError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Renders the settings as TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }

    /// Checks every section.
    pub fn validate(&self) -> CliResult<()> {
        if !self.analytics.risk_free_rate.is_finite() {
            return Err(CliError::Config("analytics.risk_free_rate must be finite".into()));
        }
        self.esg
            .validate()
            .map_err(|e| CliError::Config(format!("esg: {e}")))?;
        self.simulation
            .validate()
            .map_err(|e| CliError::Config(format!("simulation: {e}")))?;
        Ok(())
    }
}
