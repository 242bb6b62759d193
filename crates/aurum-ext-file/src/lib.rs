//! # Aurum Ext File
//!
//! File-based collaborators for the Aurum analytics core.
//!
//! This crate provides default implementations for batch runs, the CLI and tests:
//! - CSV-based return series source (one column per asset)
//! - CSV-based ESG score tables (ISIN- and CUSIP-keyed files)
//! - CSV holdings reader
//!
//! Header names are matched case-insensitively, with spaces and underscores
//! treated alike ("Market Value" reads as `market_value`).

#![warn(missing_docs)]
#![warn(clippy::all)]

mod esg;
mod holdings;
mod returns;

pub use esg::*;
pub use holdings::*;
pub use returns::*;

use aurum_traits::TraitError;

/// Maps a csv error onto the trait error kinds.
pub(crate) fn csv_error(e: csv::Error) -> TraitError {
    if e.is_io_error() {
        TraitError::IoError(e.to_string())
    } else {
        TraitError::ParseError(e.to_string())
    }
}

/// Lowercases headers and replaces spaces with underscores.
pub(crate) fn normalize_headers<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<csv::StringRecord, TraitError> {
    let headers: csv::StringRecord = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_lowercase().replace(' ', "_"))
        .collect();
    reader.set_headers(headers.clone());
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let data = "Identifier, Market Value ,ASSET_CLASS\nUS0378331005,100,Equity\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let headers = normalize_headers(&mut reader).unwrap();
        assert_eq!(
            headers.iter().collect::<Vec<_>>(),
            vec!["identifier", "market_value", "asset_class"]
        );
    }
}
