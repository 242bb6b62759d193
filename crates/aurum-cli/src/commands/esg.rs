//! ESG command implementation.
//!
//! Value-weighted ESG scores for a holdings file, optionally split by asset
//! class.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use aurum_ext_file::{read_holdings, CsvEsgScoreSource};
use aurum_portfolio::{
    calculate_weighted_esg, esg_by_asset_class, AssetClass, NegativeValuePolicy, WeightedEsgResult,
};
use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::output::{print_header, print_json, print_output, print_warning};
use crate::settings::Settings;

/// Arguments for the esg command.
#[derive(Args, Debug)]
pub struct EsgArgs {
    /// Holdings CSV (identifier, market_value, optional asset_class)
    #[arg(long)]
    pub holdings: PathBuf,

    /// ISIN-keyed score CSV (identifier, environmental, social, governance, overall)
    #[arg(long)]
    pub isin_scores: PathBuf,

    /// CUSIP-keyed score CSV
    #[arg(long)]
    pub cusip_scores: Option<PathBuf>,

    /// Also report each asset class separately
    #[arg(long)]
    pub by_asset_class: bool,

    /// Retry unmatched ISINs with their embedded CUSIP
    #[arg(long)]
    pub cusip_from_isin: bool,

    /// Let short positions offset long ones instead of excluding them
    #[arg(long)]
    pub include_short: bool,

    /// List holdings that had no score
    #[arg(long)]
    pub show_unmatched: bool,
}

/// One output row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct EsgRow {
    #[tabled(rename = "Scope")]
    pub scope: String,
    #[tabled(rename = "Overall", display_with = "fmt_score")]
    pub overall: f64,
    #[tabled(rename = "E", display_with = "fmt_score")]
    pub environmental: f64,
    #[tabled(rename = "S", display_with = "fmt_score")]
    pub social: f64,
    #[tabled(rename = "G", display_with = "fmt_score")]
    pub governance: f64,
    #[tabled(rename = "Coverage", display_with = "fmt_coverage")]
    pub coverage: f64,
    #[tabled(rename = "Matched")]
    pub matched_holdings: usize,
    #[tabled(rename = "Holdings")]
    pub total_holdings: usize,
    #[tabled(rename = "Matched Value")]
    pub matched_value: Decimal,
    #[tabled(rename = "Total Value")]
    pub total_value: Decimal,
}

impl EsgRow {
    fn new(scope: impl Into<String>, result: &WeightedEsgResult) -> Self {
        Self {
            scope: scope.into(),
            overall: result.overall_score,
            environmental: result.environmental_score,
            social: result.social_score,
            governance: result.governance_score,
            coverage: result.coverage,
            matched_holdings: result.matched_holdings,
            total_holdings: result.total_holdings,
            matched_value: result.matched_value,
            total_value: result.total_value,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn fmt_score(value: &f64) -> String {
    format!("{value:.2}")
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn fmt_coverage(value: &f64) -> String {
    format!("{value:.1}%")
}

#[derive(Serialize)]
struct EsgReport<'a> {
    portfolio: &'a WeightedEsgResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    by_asset_class: Option<&'a BTreeMap<AssetClass, WeightedEsgResult>>,
}

/// Execute the esg command.
pub fn execute(args: EsgArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let mut config = settings.esg.clone();
    if args.cusip_from_isin {
        config = config.with_cusip_from_isin();
    }
    if args.include_short {
        config = config.with_negative_values(NegativeValuePolicy::SignedWeight);
    }

    let mut source = CsvEsgScoreSource::new(&args.isin_scores);
    if let Some(path) = &args.cusip_scores {
        source = source.with_cusip_file(path);
    }
    let tables = source.read_tables().context("failed to load ESG scores")?;
    let holdings = read_holdings(&args.holdings)
        .with_context(|| format!("failed to read holdings from {}", args.holdings.display()))?;
    tracing::info!(
        holdings = holdings.len(),
        isin_records = tables.isin_count(),
        cusip_records = tables.cusip_count(),
        "loaded ESG inputs"
    );

    let result = calculate_weighted_esg(&holdings, &tables, &config);
    let buckets = args
        .by_asset_class
        .then(|| esg_by_asset_class(&holdings, &tables, &config));

    if result.excluded_holdings > 0 {
        tracing::warn!(excluded = result.excluded_holdings, "short positions left out");
    }

    if format == OutputFormat::Json {
        return print_json(&EsgReport {
            portfolio: &result,
            by_asset_class: buckets.as_ref(),
        });
    }

    let mut rows = vec![EsgRow::new("Portfolio", &result)];
    if let Some(buckets) = &buckets {
        rows.extend(buckets.iter().map(|(class, r)| EsgRow::new(class.to_string(), r)));
    }

    if format == OutputFormat::Table {
        print_header("ESG Scores");
    }
    print_output(&rows, format)?;

    if !result.unmatched.is_empty() {
        print_warning(&format!(
            "{} of {} holdings have no ESG score",
            result.unmatched.len(),
            result.total_holdings
        ));
        if args.show_unmatched {
            for identifier in &result.unmatched {
                eprintln!("  {identifier}");
            }
        }
    }
    Ok(())
}
