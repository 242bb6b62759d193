//! # Aurum Portfolio
//!
//! Holdings and ESG analytics for multi-asset portfolios.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Explicit tables**: ESG scores are passed in by reference, never global
//! - **Explicit precedence**: Identifier resolution follows a configurable chain
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Quick Start
//!
//! ```rust
//! use aurum_core::{EsgScoreRecord, EsgScoreTables};
//! use aurum_portfolio::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let tables = EsgScoreTables::from_records(
//!     vec![EsgScoreRecord::new("US0378331005", 65.0, 72.0, 80.0, 71.0)],
//!     vec![EsgScoreRecord::new("594918104", 88.0, 79.0, 75.0, 81.0)],
//! );
//!
//! let holdings = vec![
//!     Holding::new("US0378331005", dec!(600_000), AssetClass::Equity),
//!     Holding::new("594918104", dec!(400_000), AssetClass::Equity),
//! ];
//!
//! let esg = calculate_weighted_esg(&holdings, &tables, &EsgConfig::default());
//! assert_eq!(esg.coverage, 100.0);
//! assert!((esg.overall_score - 75.0).abs() < 1e-9);
//! ```
//!
//! ## Module Overview
//!
//! - [`esg`] - Identifier resolution, weighted scores, per-class breakdown
//! - [`types`] - Core types (Holding, AssetClass, EsgConfig)
//!
//! ## Feature Flags
//!
//! - `parallel`: Enable rayon-based parallel resolution for large portfolios

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod esg;
pub mod types;

pub use error::{PortfolioError, PortfolioResult};

pub use types::{AssetClass, EsgConfig, Holding, HoldingBuilder, NegativeValuePolicy};

pub use esg::{
    calculate_weighted_esg, esg_by_asset_class, resolve_score, LookupStep, WeightedEsgResult,
};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::esg::{
        calculate_weighted_esg, esg_by_asset_class, resolve_score, LookupStep, WeightedEsgResult,
    };
    pub use crate::types::{AssetClass, EsgConfig, Holding, HoldingBuilder, NegativeValuePolicy};
}
