//! Value-weighted ESG scores and coverage.
//!
//! ## Formula
//!
//! ```text
//! score    = Σ(value_i × subscore_i) / matched_value
//! coverage = 100 × matched_value / total_value
//! ```
//!
//! Where `matched_value` sums the holdings that resolved to a score record
//! and `total_value` sums every holding the negative value policy keeps.
//!
//! Weighted sums are taken in `Decimal` and converted to `f64` once, so a
//! portfolio scored uniformly at `s` comes out at exactly `s`.

use aurum_core::{maybe_parallel_map, EsgScoreRecord, EsgScoreTables};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;
use serde::{Deserialize, Serialize};

use super::resolve::resolve_score;
use crate::types::{EsgConfig, Holding, NegativeValuePolicy};

/// Portfolio-level ESG scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeightedEsgResult {
    /// Value-weighted overall score over matched holdings.
    pub overall_score: f64,
    /// Value-weighted environmental score.
    pub environmental_score: f64,
    /// Value-weighted social score.
    pub social_score: f64,
    /// Value-weighted governance score.
    pub governance_score: f64,
    /// Percentage of value with a score (0-100), rounded.
    pub coverage: f64,

    /// Holdings that resolved to a score record.
    pub matched_holdings: usize,
    /// Holdings considered, including excluded ones.
    pub total_holdings: usize,
    /// Holdings left out by the negative value policy.
    pub excluded_holdings: usize,
    /// Identifiers with no score record, in input order.
    pub unmatched: Vec<String>,

    /// Value of matched holdings.
    pub matched_value: Decimal,
    /// Value of all holdings kept by the negative value policy.
    pub total_value: Decimal,
}

impl WeightedEsgResult {
    /// Returns true if no holding was matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched_holdings == 0
    }
}

/// Outcome of resolving one holding.
enum Resolution<'a> {
    Excluded,
    Unmatched,
    Matched(&'a EsgScoreRecord),
}

fn resolve_holding<'a>(
    holding: &Holding,
    tables: &'a EsgScoreTables,
    config: &EsgConfig,
) -> Resolution<'a> {
    if holding.is_short() && config.negative_values == NegativeValuePolicy::Exclude {
        return Resolution::Excluded;
    }
    match resolve_score(&holding.identifier, tables, &config.lookup_chain) {
        Some((_, record)) => Resolution::Matched(record),
        None => Resolution::Unmatched,
    }
}

/// Shortest round-trip text keeps a score such as 56.09 exact.
fn score_to_decimal(score: f64) -> Option<Decimal> {
    Decimal::from_str(&score.to_string())
        .ok()
        .or_else(|| Decimal::try_from(score).ok())
}

fn decimal_to_f64(value: Decimal) -> f64 {
    f64::from_str(&value.normalize().to_string())
        .ok()
        .or_else(|| value.to_f64())
        .unwrap_or(0.0)
}

/// Running `Σ(value × subscore)` for the four scores.
///
/// Falls back to `f64` for the rest of the pass if a `Decimal` product or
/// sum would overflow.
struct WeightedSums {
    exact: Option<[Decimal; 4]>,
    approx: [f64; 4],
}

impl WeightedSums {
    fn new() -> Self {
        Self {
            exact: Some([Decimal::ZERO; 4]),
            approx: [0.0; 4],
        }
    }

    fn add(&mut self, value: Decimal, record: &EsgScoreRecord) {
        let scores = [
            record.overall,
            record.environmental,
            record.social,
            record.governance,
        ];
        let value_f64 = value.to_f64().unwrap_or(0.0);
        for (sum, score) in self.approx.iter_mut().zip(scores) {
            *sum += value_f64 * score;
        }

        if let Some(exact) = self.exact.as_mut() {
            let mut next = *exact;
            let ok = next.iter_mut().zip(scores).all(|(sum, score)| {
                match score_to_decimal(score)
                    .and_then(|s| value.checked_mul(s))
                    .and_then(|p| sum.checked_add(p))
                {
                    Some(updated) => {
                        *sum = updated;
                        true
                    }
                    None => false,
                }
            });
            if ok {
                *exact = next;
            } else {
                log::debug!("decimal ESG sums overflowed; continuing in f64");
                self.exact = None;
            }
        }
    }

    /// Divides each sum by `matched_value` (which must be positive).
    fn scores(&self, matched_value: Decimal) -> [f64; 4] {
        if let Some(exact) = self.exact {
            let quotients = exact.map(|sum| sum.checked_div(matched_value));
            if quotients.iter().all(Option::is_some) {
                return quotients.map(|q| q.map_or(0.0, decimal_to_f64));
            }
        }
        let matched = matched_value.to_f64().unwrap_or(0.0);
        if matched > 0.0 {
            self.approx.map(|sum| sum / matched)
        } else {
            [0.0; 4]
        }
    }
}

fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(i32::try_from(decimals.min(15)).unwrap_or(15));
    (value * factor).round() / factor
}

/// Calculates value-weighted ESG scores and coverage for a set of holdings.
///
/// Each holding is resolved through `config.lookup_chain`. Sub-scores are
/// weighted by market value over the matched holdings only; coverage is the
/// matched share of total value. Every score is 0 when nothing matched and
/// coverage is 0 when the total value is 0.
///
/// Resolution may run in parallel; sums are always taken in input order.
///
/// # Example
///
/// ```rust
/// use aurum_core::{EsgScoreRecord, EsgScoreTables};
/// use aurum_portfolio::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let tables = EsgScoreTables::from_records(
///     vec![EsgScoreRecord::new("US0378331005", 60.0, 70.0, 80.0, 70.0)],
///     vec![],
/// );
/// let holdings = vec![
///     Holding::new("US0378331005", dec!(300), AssetClass::Equity),
///     Holding::new("GB0002634946", dec!(100), AssetClass::Equity),
/// ];
///
/// let result = calculate_weighted_esg(&holdings, &tables, &EsgConfig::default());
/// assert_eq!(result.overall_score, 70.0);
/// assert_eq!(result.coverage, 75.0);
/// assert_eq!(result.unmatched, vec!["GB0002634946".to_string()]);
/// ```
#[must_use]
pub fn calculate_weighted_esg(
    holdings: &[Holding],
    tables: &EsgScoreTables,
    config: &EsgConfig,
) -> WeightedEsgResult {
    let refs: Vec<&Holding> = holdings.iter().collect();
    aggregate(&refs, tables, config)
}

pub(crate) fn aggregate(
    holdings: &[&Holding],
    tables: &EsgScoreTables,
    config: &EsgConfig,
) -> WeightedEsgResult {
    let resolutions = maybe_parallel_map(holdings, &config.parallel, |h| {
        resolve_holding(h, tables, config)
    });

    let mut result = WeightedEsgResult {
        total_holdings: holdings.len(),
        ..WeightedEsgResult::default()
    };
    let mut sums = WeightedSums::new();

    for (holding, resolution) in holdings.iter().zip(resolutions) {
        match resolution {
            Resolution::Excluded => {
                log::warn!(
                    "excluding {} with negative market value {}",
                    holding.identifier,
                    holding.market_value
                );
                result.excluded_holdings += 1;
            }
            Resolution::Unmatched => {
                result.total_value += holding.market_value;
                result.unmatched.push(holding.identifier.clone());
            }
            Resolution::Matched(record) => {
                result.total_value += holding.market_value;
                result.matched_value += holding.market_value;
                result.matched_holdings += 1;
                sums.add(holding.market_value, record);
            }
        }
    }

    if result.matched_value > Decimal::ZERO {
        let [overall, environmental, social, governance] = sums.scores(result.matched_value);
        result.overall_score = overall;
        result.environmental_score = environmental;
        result.social_score = social;
        result.governance_score = governance;
    } else if result.matched_holdings > 0 {
        log::debug!("matched value is {}; scores left at 0", result.matched_value);
    }

    if result.total_value > Decimal::ZERO {
        let coverage = result
            .matched_value
            .checked_div(result.total_value)
            .and_then(|share| share.to_f64())
            .map_or(0.0, |share| (share * 100.0).clamp(0.0, 100.0));
        result.coverage = round_to(coverage, config.coverage_decimals);
    }

    if !result.unmatched.is_empty() {
        log::debug!(
            "{} of {} holdings have no ESG score",
            result.unmatched.len(),
            result.total_holdings
        );
    }

    result
}
