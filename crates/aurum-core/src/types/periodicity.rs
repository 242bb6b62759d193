//! Sampling frequency of return series.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sampling frequency of a periodic return series.
///
/// Used to annualize per-period statistics. Monthly is the default because the
/// dashboard's series are month-end returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Periodicity {
    /// Daily returns (252 trading days per year)
    Daily,
    /// Weekly returns (52 per year)
    Weekly,
    /// Monthly returns (12 per year)
    #[default]
    Monthly,
    /// Quarterly returns (4 per year)
    Quarterly,
    /// Annual returns (1 per year)
    Annual,
}

impl Periodicity {
    /// Returns the number of periods per year.
    #[must_use]
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Periodicity::Daily => 252,
            Periodicity::Weekly => 52,
            Periodicity::Monthly => 12,
            Periodicity::Quarterly => 4,
            Periodicity::Annual => 1,
        }
    }

    /// Returns the periods per year as a float, for annualization.
    #[must_use]
    pub fn annualization_factor(&self) -> f64 {
        f64::from(self.periods_per_year())
    }

    /// Parses a short code ("d", "w", "m", "q", "a") or full name.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "d" | "daily" => Some(Periodicity::Daily),
            "w" | "weekly" => Some(Periodicity::Weekly),
            "m" | "monthly" => Some(Periodicity::Monthly),
            "q" | "quarterly" => Some(Periodicity::Quarterly),
            "a" | "y" | "annual" | "yearly" => Some(Periodicity::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for Periodicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Periodicity::Daily => "Daily",
            Periodicity::Weekly => "Weekly",
            Periodicity::Monthly => "Monthly",
            Periodicity::Quarterly => "Quarterly",
            Periodicity::Annual => "Annual",
        };
        write!(f, "{name}")
    }
}
