//! File-based holdings.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

use aurum_portfolio::{AssetClass, Holding};
use aurum_traits::error::{TraitError, TraitResult};

use crate::{csv_error, normalize_headers};

/// CSV record for holdings.
#[derive(Debug, Deserialize)]
struct HoldingRecord {
    #[serde(alias = "isin", alias = "cusip", alias = "security_id")]
    identifier: String,
    #[serde(alias = "value", alias = "mv")]
    market_value: String,
    #[serde(default)]
    asset_class: Option<String>,
}

/// Reads holdings from a CSV file.
///
/// See [`read_holdings_from`] for the expected layout.
pub fn read_holdings(path: impl AsRef<Path>) -> TraitResult<Vec<Holding>> {
    let file = File::open(path.as_ref())?;
    read_holdings_from(file)
}

/// Reads holdings from any reader.
///
/// Expected columns: `identifier` (or `isin`/`cusip`), `market_value`, and an
/// optional free-text `asset_class` ("Fixed Income", "Equity", ...).
/// Market values may carry thousands separators or a leading `$`.
pub fn read_holdings_from<R: Read>(reader: R) -> TraitResult<Vec<Holding>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    normalize_headers(&mut reader)?;

    let mut holdings = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let record: HoldingRecord = result.map_err(csv_error)?;
        let line = index + 2;

        let market_value = parse_amount(&record.market_value).ok_or_else(|| {
            TraitError::parse(format!(
                "line {line}: '{}' is not a market value",
                record.market_value
            ))
        })?;
        let asset_class = record
            .asset_class
            .as_deref()
            .map_or(AssetClass::Other, AssetClass::from_label);

        let holding = Holding::builder()
            .identifier(record.identifier)
            .market_value(market_value)
            .asset_class(asset_class)
            .build()
            .map_err(|e| TraitError::InvalidInput(format!("line {line}: {e}")))?;
        if holding.is_short() {
            log::warn!("line {line}: {} has a negative market value", holding.identifier);
        }
        holdings.push(holding);
    }
    Ok(holdings)
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '$' | ' '))
        .collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}
