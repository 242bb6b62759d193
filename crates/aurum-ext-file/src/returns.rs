//! File-based return series source.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use aurum_core::{AssetId, Periodicity, ReturnSeries, ReturnUniverse};
use aurum_traits::error::{TraitError, TraitResult};
use aurum_traits::time_series::TimeSeriesProvider;

use crate::csv_error;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d"];

// =============================================================================
// CSV RETURN SOURCE
// =============================================================================

/// CSV-based return series source.
///
/// The file is wide: an optional `date` column, then one column of periodic
/// returns per asset, headed by the asset id.
///
/// ```text
/// date,MSCI ACWI,GLOBAL AGGREGATE,GOLD
/// 2024-01-31,0.012,-0.003,
/// 2024-02-29,0.041,0.002,0.018
/// ```
///
/// - Rows are sorted by date when a date column is present.
/// - Rows with no values at all are dropped.
/// - A column may start late (leading blanks); once it has started, a blank
///   cell is an error.
#[derive(Debug)]
pub struct CsvReturnSource {
    file_path: Option<PathBuf>,
    periodicity: Periodicity,
    dates: Vec<NaiveDate>,
    universe: ReturnUniverse,
}

impl CsvReturnSource {
    /// Loads a return source from a CSV file.
    pub fn new(file_path: impl AsRef<Path>) -> TraitResult<Self> {
        let path = file_path.as_ref();
        let file = File::open(path)?;
        let mut source = Self::from_reader(file)?;
        source.file_path = Some(path.to_path_buf());
        log::debug!(
            "loaded {} series from {}",
            source.universe.len(),
            path.display()
        );
        Ok(source)
    }

    /// Loads a return source from any reader.
    pub fn from_reader<R: Read>(reader: R) -> TraitResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers().map_err(csv_error)?.clone();
        let date_column = headers.iter().position(|h| h.eq_ignore_ascii_case("date"));
        let columns: Vec<(usize, AssetId)> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != date_column)
            .map(|(i, h)| (i, AssetId::new(h)))
            .collect();

        if columns.is_empty() {
            return Err(TraitError::parse("return file has no asset columns"));
        }

        let mut rows: Vec<(Option<NaiveDate>, Vec<Option<f64>>)> = Vec::new();
        for (index, record) in reader.records().enumerate() {
            let record = record.map_err(csv_error)?;
            let line = index + 2;

            let values = columns
                .iter()
                .map(|(i, asset)| parse_cell(record.get(*i).unwrap_or(""), asset, line))
                .collect::<TraitResult<Vec<_>>>()?;
            if values.iter().all(Option::is_none) {
                continue;
            }

            let date = date_column
                .map(|c| parse_date(record.get(c).unwrap_or(""), line))
                .transpose()?;
            rows.push((date, values));
        }

        if date_column.is_some() {
            rows.sort_by_key(|(date, _)| *date);
        }

        let mut universe = ReturnUniverse::new();
        for (column, (_, asset)) in columns.iter().enumerate() {
            let mut series = ReturnSeries::empty();
            for (position, (_, values)) in rows.iter().enumerate() {
                match values[column] {
                    Some(value) => series.push(value),
                    None if series.is_empty() => {}
                    None => {
                        return Err(TraitError::parse(format!(
                            "gap in '{asset}' at data row {}",
                            position + 1
                        )));
                    }
                }
            }
            if series.is_empty() {
                log::warn!("column '{asset}' has no values");
            }
            universe.insert(asset.clone(), series);
        }

        Ok(Self {
            file_path: None,
            periodicity: Periodicity::default(),
            dates: rows.into_iter().filter_map(|(date, _)| date).collect(),
            universe,
        })
    }

    /// Sets the sampling frequency reported to callers.
    #[must_use]
    pub fn with_periodicity(mut self, periodicity: Periodicity) -> Self {
        self.periodicity = periodicity;
        self
    }

    /// Path the source was loaded from, if any.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Row dates in ascending order (empty if the file had no date column).
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Every loaded series.
    pub fn loaded_universe(&self) -> &ReturnUniverse {
        &self.universe
    }

    /// Consumes the source, returning every loaded series.
    pub fn into_universe(self) -> ReturnUniverse {
        self.universe
    }
}

fn parse_cell(cell: &str, asset: &AssetId, line: usize) -> TraitResult<Option<f64>> {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    cell.parse::<f64>()
        .map(Some)
        .map_err(|_| TraitError::parse(format!("line {line}: '{cell}' is not a number ({asset})")))
}

fn parse_date(cell: &str, line: usize) -> TraitResult<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
        .ok_or_else(|| TraitError::parse(format!("line {line}: '{cell}' is not a date")))
}

#[async_trait]
impl TimeSeriesProvider for CsvReturnSource {
    fn periodicity(&self) -> Periodicity {
        self.periodicity
    }

    async fn available_assets(&self) -> TraitResult<Vec<AssetId>> {
        Ok(self.universe.assets().cloned().collect())
    }

    async fn return_series(&self, asset: &str) -> TraitResult<Option<ReturnSeries>> {
        Ok(self.universe.get(asset).cloned())
    }
}
