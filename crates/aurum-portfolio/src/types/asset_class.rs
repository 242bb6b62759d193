//! Broad asset-class classification of holdings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad asset class a holding belongs to.
///
/// Ordered so per-class breakdowns iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    /// Listed equities and equity funds.
    Equity,
    /// Bonds and other fixed income.
    FixedIncome,
    /// Cash and money-market instruments.
    Cash,
    /// Listed or direct real estate.
    RealEstate,
    /// Commodities, including gold.
    Commodities,
    /// Private markets, hedge funds and other alternatives.
    Alternatives,
    /// Anything not classified above.
    #[default]
    Other,
}

impl AssetClass {
    /// Classifies a free-text label such as "Fixed Income" or "PRIVATE EQUITY".
    ///
    /// Unknown labels map to [`AssetClass::Other`].
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase().replace(|c: char| c == '-' || c == '_', " ");
        match normalized.as_str() {
            "equity" | "equities" | "stock" | "stocks" => Self::Equity,
            "fixed income" | "bond" | "bonds" | "credit" => Self::FixedIncome,
            "cash" | "money market" => Self::Cash,
            "real estate" | "reit" | "reits" | "property" => Self::RealEstate,
            "commodity" | "commodities" | "gold" => Self::Commodities,
            "alternative" | "alternatives" | "private equity" | "private credit"
            | "hedge fund" | "hedge funds" | "venture" => Self::Alternatives,
            _ => Self::Other,
        }
    }

    /// Returns the display label for this class.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Equity => "Equity",
            Self::FixedIncome => "Fixed Income",
            Self::Cash => "Cash",
            Self::RealEstate => "Real Estate",
            Self::Commodities => "Commodities",
            Self::Alternatives => "Alternatives",
            Self::Other => "Other",
        }
    }

    /// Returns all classes in order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[
            Self::Equity,
            Self::FixedIncome,
            Self::Cash,
            Self::RealEstate,
            Self::Commodities,
            Self::Alternatives,
            Self::Other,
        ]
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(AssetClass::from_label("Fixed Income"), AssetClass::FixedIncome);
        assert_eq!(AssetClass::from_label("fixed_income"), AssetClass::FixedIncome);
        assert_eq!(AssetClass::from_label(" EQUITY "), AssetClass::Equity);
        assert_eq!(AssetClass::from_label("PRIVATE EQUITY"), AssetClass::Alternatives);
        assert_eq!(AssetClass::from_label("Gold"), AssetClass::Commodities);
        assert_eq!(AssetClass::from_label("crypto"), AssetClass::Other);
    }

    #[test]
    fn test_labels_round_trip() {
        for class in AssetClass::all() {
            assert_eq!(AssetClass::from_label(class.label()), *class);
        }
    }

    #[test]
    fn test_ordering_and_serde() {
        assert!(AssetClass::Equity < AssetClass::FixedIncome);
        assert_eq!(
            serde_json::to_string(&AssetClass::RealEstate).unwrap(),
            "\"real_estate\""
        );
    }
}
