//! Holding representation.

use aurum_core::SecurityId;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AssetClass;
use crate::error::{PortfolioError, PortfolioResult};

/// A single position in a portfolio.
///
/// The identifier is kept as the raw string the position came with (ISIN or
/// CUSIP); it is matched against score tables as-is, so holdings with
/// malformed identifiers simply go unmatched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Security identifier (ISIN or CUSIP).
    pub identifier: String,

    /// Market value in the portfolio's base currency. Expected non-negative.
    pub market_value: Decimal,

    /// Broad asset class.
    #[serde(default)]
    pub asset_class: AssetClass,
}

impl Holding {
    /// Creates a new holding.
    #[must_use]
    pub fn new(identifier: impl Into<String>, market_value: Decimal, asset_class: AssetClass) -> Self {
        Self {
            identifier: identifier.into(),
            market_value,
            asset_class,
        }
    }

    /// Creates a new holding builder.
    #[must_use]
    pub fn builder() -> HoldingBuilder {
        HoldingBuilder::new()
    }

    /// Market value as a float for weighting.
    #[must_use]
    pub fn market_value_f64(&self) -> f64 {
        self.market_value.to_f64().unwrap_or(0.0)
    }

    /// Returns true if the market value is below zero.
    #[must_use]
    pub fn is_short(&self) -> bool {
        self.market_value.is_sign_negative() && !self.market_value.is_zero()
    }

    /// Parses and validates the identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Identifier`] if the identifier is neither a
    /// valid ISIN nor a valid CUSIP.
    pub fn security_id(&self) -> PortfolioResult<SecurityId> {
        Ok(SecurityId::parse(&self.identifier)?)
    }
}

/// Builder for constructing a Holding.
#[derive(Debug, Clone, Default)]
pub struct HoldingBuilder {
    identifier: Option<String>,
    market_value: Option<Decimal>,
    asset_class: AssetClass,
}

impl HoldingBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the security identifier.
    #[must_use]
    pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Sets the market value.
    #[must_use]
    pub fn market_value(mut self, value: Decimal) -> Self {
        self.market_value = Some(value);
        self
    }

    /// Sets the asset class.
    #[must_use]
    pub fn asset_class(mut self, asset_class: AssetClass) -> Self {
        self.asset_class = asset_class;
        self
    }

    /// Builds the holding.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing or the identifier is
    /// blank.
    pub fn build(self) -> PortfolioResult<Holding> {
        let identifier = self
            .identifier
            .ok_or_else(|| PortfolioError::missing_field("identifier"))?;

        if identifier.trim().is_empty() {
            return Err(PortfolioError::invalid_holding(
                identifier,
                "identifier is blank",
            ));
        }

        let market_value = self
            .market_value
            .ok_or_else(|| PortfolioError::missing_field("market_value"))?;

        Ok(Holding {
            identifier,
            market_value,
            asset_class: self.asset_class,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder() {
        let holding = Holding::builder()
            .identifier("US0378331005")
            .market_value(dec!(250_000))
            .asset_class(AssetClass::Equity)
            .build()
            .unwrap();

        assert_eq!(holding.identifier, "US0378331005");
        assert_eq!(holding.market_value_f64(), 250_000.0);
        assert_eq!(holding.asset_class, AssetClass::Equity);
        assert!(!holding.is_short());
    }

    #[test]
    fn test_builder_missing_fields() {
        assert_eq!(
            Holding::builder().market_value(dec!(1)).build(),
            Err(PortfolioError::missing_field("identifier"))
        );
        assert_eq!(
            Holding::builder().identifier("037833100").build(),
            Err(PortfolioError::missing_field("market_value"))
        );
        assert!(matches!(
            Holding::builder().identifier("  ").market_value(dec!(1)).build(),
            Err(PortfolioError::InvalidHolding { .. })
        ));
    }

    #[test]
    fn test_security_id() {
        let isin = Holding::new("US0378331005", dec!(1), AssetClass::Equity);
        assert_eq!(isin.security_id().unwrap().kind(), "ISIN");

        let cusip = Holding::new("037833100", dec!(1), AssetClass::Equity);
        assert_eq!(cusip.security_id().unwrap().kind(), "CUSIP");

        let bad = Holding::new("912828Z22", dec!(1), AssetClass::FixedIncome);
        assert!(matches!(bad.security_id(), Err(PortfolioError::Identifier(_))));
    }

    #[test]
    fn test_short_position() {
        let short = Holding::new("037833100", dec!(-10), AssetClass::Equity);
        assert!(short.is_short());
        assert!(!Holding::new("037833100", Decimal::ZERO, AssetClass::Equity).is_short());
    }
}
