//! Cached ESG score records and the identifier-keyed lookup tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, CoreResult};

/// Upper bound of the ESG score scale.
pub const MAX_ESG_SCORE: f64 = 100.0;

/// Per-security ESG sub-scores (0-100 scale).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgScoreRecord {
    /// Identifier the record is keyed by (ISIN or CUSIP).
    pub identifier: String,
    /// Environmental pillar score.
    pub environmental: f64,
    /// Social pillar score.
    pub social: f64,
    /// Governance pillar score.
    pub governance: f64,
    /// Overall (composite) score.
    pub overall: f64,
}

impl EsgScoreRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        identifier: impl Into<String>,
        environmental: f64,
        social: f64,
        governance: f64,
        overall: f64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            environmental,
            social,
            governance,
            overall,
        }
    }

    /// Creates a record where every pillar has the same score.
    #[must_use]
    pub fn uniform(identifier: impl Into<String>, score: f64) -> Self {
        Self::new(identifier, score, score, score, score)
    }

    /// Checks that every sub-score is finite and within [0, 100].
    pub fn validate(&self) -> CoreResult<()> {
        let fields = [
            ("environmental", self.environmental),
            ("social", self.social),
            ("governance", self.governance),
            ("overall", self.overall),
        ];
        for (field, value) in fields {
            if !value.is_finite() || !(0.0..=MAX_ESG_SCORE).contains(&value) {
                return Err(CoreError::InvalidScore {
                    identifier: self.identifier.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

fn key(identifier: &str) -> String {
    identifier.trim().to_uppercase()
}

/// Read-only ESG score lookup tables.
///
/// ISIN-keyed and CUSIP-keyed records live in distinct namespaces. The tables
/// are loaded wholesale by an external source and passed to the aggregator by
/// reference.
/// Deserialized tables are re-keyed so lookups behave the same as for tables
/// built with [`EsgScoreTables::from_records`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTables")]
pub struct EsgScoreTables {
    isin: HashMap<String, EsgScoreRecord>,
    cusip: HashMap<String, EsgScoreRecord>,
}

/// Wire shape of [`EsgScoreTables`], keys as received.
#[derive(Deserialize)]
struct RawTables {
    #[serde(default)]
    isin: HashMap<String, EsgScoreRecord>,
    #[serde(default)]
    cusip: HashMap<String, EsgScoreRecord>,
}

impl From<RawTables> for EsgScoreTables {
    fn from(raw: RawTables) -> Self {
        Self {
            isin: raw.isin.into_iter().map(|(k, v)| (key(&k), v)).collect(),
            cusip: raw.cusip.into_iter().map(|(k, v)| (key(&k), v)).collect(),
        }
    }
}

impl EsgScoreTables {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds tables from two record lists.
    #[must_use]
    pub fn from_records(
        isin_records: impl IntoIterator<Item = EsgScoreRecord>,
        cusip_records: impl IntoIterator<Item = EsgScoreRecord>,
    ) -> Self {
        let mut tables = Self::new();
        for record in isin_records {
            tables.insert_isin(record);
        }
        for record in cusip_records {
            tables.insert_cusip(record);
        }
        tables
    }

    /// Adds a record to the ISIN-keyed table.
    pub fn insert_isin(&mut self, record: EsgScoreRecord) {
        self.isin.insert(key(&record.identifier), record);
    }

    /// Adds a record to the CUSIP-keyed table.
    pub fn insert_cusip(&mut self, record: EsgScoreRecord) {
        self.cusip.insert(key(&record.identifier), record);
    }

    /// Looks up a record in the ISIN-keyed table.
    #[must_use]
    pub fn by_isin(&self, identifier: &str) -> Option<&EsgScoreRecord> {
        self.isin.get(&key(identifier))
    }

    /// Looks up a record in the CUSIP-keyed table.
    #[must_use]
    pub fn by_cusip(&self, identifier: &str) -> Option<&EsgScoreRecord> {
        self.cusip.get(&key(identifier))
    }

    /// Number of ISIN-keyed records.
    #[must_use]
    pub fn isin_count(&self) -> usize {
        self.isin.len()
    }

    /// Number of CUSIP-keyed records.
    #[must_use]
    pub fn cusip_count(&self) -> usize {
        self.cusip.len()
    }

    /// Returns true if both tables are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.isin.is_empty() && self.cusip.is_empty()
    }
}
