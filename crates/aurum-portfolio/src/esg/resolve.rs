//! Identifier resolution against the ESG score tables.

use aurum_core::{EsgScoreRecord, EsgScoreTables, Isin};
use serde::{Deserialize, Serialize};

/// One step of the identifier lookup chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStep {
    /// Look the identifier up in the ISIN-keyed table.
    Isin,
    /// Look the identifier up in the CUSIP-keyed table.
    Cusip,
    /// If the identifier is a valid US or Canadian ISIN, look up its embedded
    /// CUSIP in the CUSIP-keyed table.
    CusipFromIsin,
}

impl LookupStep {
    /// The standard chain: ISIN table first, then CUSIP table.
    #[must_use]
    pub fn default_chain() -> Vec<Self> {
        vec![Self::Isin, Self::Cusip]
    }

    /// Tries this step alone.
    #[must_use]
    pub fn lookup<'a>(self, identifier: &str, tables: &'a EsgScoreTables) -> Option<&'a EsgScoreRecord> {
        match self {
            Self::Isin => tables.by_isin(identifier),
            Self::Cusip => tables.by_cusip(identifier),
            Self::CusipFromIsin => {
                let cusip = Isin::new(identifier).ok()?.embedded_cusip()?;
                tables.by_cusip(cusip.as_str())
            }
        }
    }
}

/// Finds the score record for a holding identifier.
///
/// Steps are tried in order and the first hit wins. Returns the step that
/// matched with the record.
///
/// ```rust
/// use aurum_core::{EsgScoreRecord, EsgScoreTables};
/// use aurum_portfolio::esg::{resolve_score, LookupStep};
///
/// let tables = EsgScoreTables::from_records(
///     vec![EsgScoreRecord::uniform("US0378331005", 72.0)],
///     vec![EsgScoreRecord::uniform("594918104", 81.0)],
/// );
/// let chain = LookupStep::default_chain();
///
/// let (step, record) = resolve_score("594918104", &tables, &chain).unwrap();
/// assert_eq!(step, LookupStep::Cusip);
/// assert_eq!(record.overall, 81.0);
/// assert!(resolve_score("GB0002634946", &tables, &chain).is_none());
/// ```
#[must_use]
pub fn resolve_score<'a>(
    identifier: &str,
    tables: &'a EsgScoreTables,
    chain: &[LookupStep],
) -> Option<(LookupStep, &'a EsgScoreRecord)> {
    chain
        .iter()
        .find_map(|step| step.lookup(identifier, tables).map(|record| (*step, record)))
}
