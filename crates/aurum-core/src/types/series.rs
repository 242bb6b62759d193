//! Periodic return series and named collections of them.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// Identifier of an asset or benchmark within a return universe.
///
/// Typically an asset-class name ("GLOBAL AGGREGATE") or a ticker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Creates a new asset identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AssetId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AssetId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl Borrow<str> for AssetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Ordered sequence of periodic returns as fractional decimals (0.01 = 1%).
///
/// Alignment with a companion series (e.g. a benchmark) is the caller's
/// precondition; nothing here resamples or fills gaps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnSeries(Vec<f64>);

impl ReturnSeries {
    /// Creates a series from raw returns.
    #[must_use]
    pub fn new(returns: Vec<f64>) -> Self {
        Self(returns)
    }

    /// Creates an empty series.
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the series has no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the returns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Iterates over the returns in period order.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Consumes the series, returning the raw returns.
    #[must_use]
    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Appends one period.
    pub fn push(&mut self, value: f64) {
        self.0.push(value);
    }

    /// Returns the most recent `n` periods (or the whole series if shorter).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[f64] {
        let start = self.0.len().saturating_sub(n);
        &self.0[start..]
    }

    /// Checks that every return is finite and not below -100%.
    pub fn validate(&self) -> CoreResult<()> {
        for (index, &value) in self.0.iter().enumerate() {
            if !value.is_finite() || value < -1.0 {
                return Err(CoreError::InvalidReturn { index, value });
            }
        }
        Ok(())
    }
}

impl AsRef<[f64]> for ReturnSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for ReturnSeries {
    fn from(value: Vec<f64>) -> Self {
        Self(value)
    }
}

impl From<&[f64]> for ReturnSeries {
    fn from(value: &[f64]) -> Self {
        Self(value.to_vec())
    }
}

impl FromIterator<f64> for ReturnSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ReturnSeries {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A named set of aligned return series (assets and benchmarks).
///
/// Keys are kept sorted so iteration order is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReturnUniverse {
    series: BTreeMap<AssetId, ReturnSeries>,
}

impl ReturnUniverse {
    /// Creates an empty universe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a series, replacing any existing series for the same asset.
    pub fn insert(&mut self, asset: impl Into<AssetId>, series: impl Into<ReturnSeries>) {
        self.series.insert(asset.into(), series.into());
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with_series(mut self, asset: impl Into<AssetId>, series: impl Into<ReturnSeries>) -> Self {
        self.insert(asset, series);
        self
    }

    /// Looks up a series by asset id.
    #[must_use]
    pub fn get(&self, asset: &str) -> Option<&ReturnSeries> {
        self.series.get(asset)
    }

    /// Returns true if the asset is present.
    #[must_use]
    pub fn contains(&self, asset: &str) -> bool {
        self.series.contains_key(asset)
    }

    /// Asset ids in sorted order.
    pub fn assets(&self) -> impl Iterator<Item = &AssetId> {
        self.series.keys()
    }

    /// Iterates over `(asset, series)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&AssetId, &ReturnSeries)> {
        self.series.iter()
    }

    /// Number of assets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns true if there are no assets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Length of the shortest series (0 for an empty universe).
    #[must_use]
    pub fn min_length(&self) -> usize {
        self.series.values().map(ReturnSeries::len).min().unwrap_or(0)
    }
}

impl FromIterator<(AssetId, ReturnSeries)> for ReturnUniverse {
    fn from_iter<I: IntoIterator<Item = (AssetId, ReturnSeries)>>(iter: I) -> Self {
        Self {
            series: iter.into_iter().collect(),
        }
    }
}
