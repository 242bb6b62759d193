//! Core types for portfolio analytics.
//!
//! - [`Holding`] - A position with identifier, market value and asset class
//! - [`AssetClass`] - Broad classification used for bucketing
//! - [`EsgConfig`] - Aggregation settings

mod asset_class;
mod config;
mod holding;

pub use asset_class::AssetClass;
pub use config::{EsgConfig, NegativeValuePolicy};
pub use holding::{Holding, HoldingBuilder};
