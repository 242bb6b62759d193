//! ESG weighting aggregator.
//!
//! Maps holdings to cached per-security ESG sub-scores and produces
//! value-weighted overall/E/S/G scores plus coverage.
//!
//! - [`resolve`] - Ordered identifier lookup (ISIN table, then CUSIP table)
//! - [`aggregate`] - Portfolio-level weighted scores
//! - [`bucketing`] - The same aggregation per asset class

pub mod aggregate;
pub mod bucketing;
pub mod resolve;

pub use aggregate::{calculate_weighted_esg, WeightedEsgResult};
pub use bucketing::esg_by_asset_class;
pub use resolve::{resolve_score, LookupStep};
