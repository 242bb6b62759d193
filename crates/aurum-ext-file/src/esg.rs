//! File-based ESG score tables.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;

use aurum_core::{EsgScoreRecord, EsgScoreTables};
use aurum_traits::error::{TraitError, TraitResult};
use aurum_traits::esg::EsgScoreSource;

use crate::{csv_error, normalize_headers};

/// CSV record for ESG scores.
#[derive(Debug, Deserialize)]
struct ScoreRecord {
    #[serde(alias = "isin", alias = "cusip")]
    identifier: String,
    #[serde(alias = "e_score")]
    environmental: f64,
    #[serde(alias = "s_score")]
    social: f64,
    #[serde(alias = "g_score")]
    governance: f64,
    #[serde(alias = "esg_score", alias = "overall_score")]
    overall: f64,
}

/// Reads and validates ESG score records.
///
/// Expected columns: `identifier` (or `isin`/`cusip`), `environmental`,
/// `social`, `governance`, `overall`. Any score outside [0, 100] rejects
/// the whole file.
pub fn read_score_records<R: Read>(reader: R) -> TraitResult<Vec<EsgScoreRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    normalize_headers(&mut reader)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: ScoreRecord = result.map_err(csv_error)?;
        let record = EsgScoreRecord::new(
            row.identifier,
            row.environmental,
            row.social,
            row.governance,
            row.overall,
        );
        record.validate()?;
        records.push(record);
    }
    Ok(records)
}

fn read_score_file(path: &Path) -> TraitResult<Vec<EsgScoreRecord>> {
    let file = File::open(path)?;
    read_score_records(file)
        .map_err(|e| TraitError::InvalidInput(format!("{}: {e}", path.display())))
}

// =============================================================================
// CSV ESG SCORE SOURCE
// =============================================================================

/// CSV-based ESG score source.
///
/// Reads one ISIN-keyed file and, optionally, one CUSIP-keyed file. A
/// duplicate identifier within a file keeps the last row.
#[derive(Debug, Clone)]
pub struct CsvEsgScoreSource {
    name: String,
    isin_path: PathBuf,
    cusip_path: Option<PathBuf>,
}

impl CsvEsgScoreSource {
    /// Create a new source over an ISIN-keyed file.
    pub fn new(isin_path: impl AsRef<Path>) -> Self {
        let isin_path = isin_path.as_ref().to_path_buf();
        Self {
            name: isin_path.display().to_string(),
            isin_path,
            cusip_path: None,
        }
    }

    /// Adds a CUSIP-keyed file.
    #[must_use]
    pub fn with_cusip_file(mut self, cusip_path: impl AsRef<Path>) -> Self {
        self.cusip_path = Some(cusip_path.as_ref().to_path_buf());
        self
    }

    /// Reads both files synchronously.
    pub fn read_tables(&self) -> TraitResult<EsgScoreTables> {
        let isin = read_score_file(&self.isin_path)?;
        let cusip = match &self.cusip_path {
            Some(path) => read_score_file(path)?,
            None => Vec::new(),
        };

        let tables = EsgScoreTables::from_records(isin, cusip);
        log::debug!(
            "loaded {} ISIN and {} CUSIP ESG records from {}",
            tables.isin_count(),
            tables.cusip_count(),
            self.name
        );
        Ok(tables)
    }
}

#[async_trait]
impl EsgScoreSource for CsvEsgScoreSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_tables(&self) -> TraitResult<EsgScoreTables> {
        self.read_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_records() {
        let data = "ISIN,Environmental,Social,Governance,ESG Score\n\
                    US0378331005,62,71,78,70\n\
                    US5949181045,85.5,77,74,79\n";
        let records = read_score_records(data.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].identifier, "US5949181045");
        assert_eq!(records[1].environmental, 85.5);
        assert_eq!(records[0].overall, 70.0);
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let data = "identifier,environmental,social,governance,overall\n\
                    US0378331005,62,171,78,70\n";
        assert!(matches!(
            read_score_records(data.as_bytes()),
            Err(TraitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_missing_column_rejected() {
        let data = "identifier,environmental,social\nUS0378331005,62,71\n";
        assert!(matches!(
            read_score_records(data.as_bytes()),
            Err(TraitError::ParseError(_))
        ));
    }
}
