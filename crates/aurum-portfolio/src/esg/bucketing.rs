//! ESG scores broken down by asset class.

use std::collections::BTreeMap;

use aurum_core::EsgScoreTables;

use super::aggregate::{aggregate, WeightedEsgResult};
use crate::types::{AssetClass, EsgConfig, Holding};

/// Applies the ESG aggregator to each asset class separately.
///
/// Only classes with at least one holding appear. Coverage within a bucket
/// is relative to that bucket's own value.
#[must_use]
pub fn esg_by_asset_class(
    holdings: &[Holding],
    tables: &EsgScoreTables,
    config: &EsgConfig,
) -> BTreeMap<AssetClass, WeightedEsgResult> {
    let mut grouped: BTreeMap<AssetClass, Vec<&Holding>> = BTreeMap::new();
    for holding in holdings {
        grouped.entry(holding.asset_class).or_default().push(holding);
    }

    grouped
        .into_iter()
        .map(|(class, group)| (class, aggregate(&group, tables, config)))
        .collect()
}
