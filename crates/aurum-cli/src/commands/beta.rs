//! Beta command implementation.

use std::path::PathBuf;

use anyhow::Result;
use aurum_analytics::{compute_beta_matrix, BetaResult, SortPolicy};
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{load_universe, require_series};
use crate::output::{fmt_opt_ratio, print_header, print_output};
use crate::settings::Settings;

/// Arguments for the beta command.
#[derive(Args, Debug)]
pub struct BetaArgs {
    /// Wide CSV of periodic returns (optional date column, one column per asset)
    #[arg(short, long)]
    pub returns: PathBuf,

    /// Benchmark column
    #[arg(short, long)]
    pub benchmark: String,

    /// Row order
    #[arg(short, long, value_enum, default_value = "abs")]
    pub sort: SortArg,
}

/// Row order options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Largest absolute beta first
    Abs,
    /// Highest beta first
    Desc,
    /// Lowest beta first
    Asc,
    /// Alphabetical by asset
    Asset,
}

impl From<SortArg> for SortPolicy {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Abs => SortPolicy::DescendingAbsBeta,
            SortArg::Desc => SortPolicy::DescendingBeta,
            SortArg::Asc => SortPolicy::AscendingBeta,
            SortArg::Asset => SortPolicy::Asset,
        }
    }
}

/// One output row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BetaRow {
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Beta", display_with = "fmt_opt_ratio")]
    pub beta: Option<f64>,
    #[tabled(rename = "Correlation", display_with = "fmt_opt_ratio")]
    pub correlation: Option<f64>,
    #[tabled(rename = "R²", display_with = "fmt_opt_ratio")]
    pub r_squared: Option<f64>,
    #[tabled(rename = "Obs")]
    pub observations: usize,
}

impl From<&BetaResult> for BetaRow {
    fn from(result: &BetaResult) -> Self {
        Self {
            asset: result.asset.to_string(),
            beta: result.beta,
            correlation: result.correlation,
            r_squared: result.r_squared,
            observations: result.observations,
        }
    }
}

/// Execute the beta command.
pub fn execute(args: BetaArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let universe = load_universe(&args.returns)?;
    require_series(&universe, &args.benchmark)?;

    let matrix = compute_beta_matrix(&universe, &args.benchmark, &settings.analytics)?
        .sorted(args.sort.into());
    let rows: Vec<BetaRow> = matrix.iter().map(BetaRow::from).collect();
    tracing::info!(assets = rows.len(), benchmark = %args.benchmark, "computed betas");

    if format == OutputFormat::Table {
        print_header(&format!("Beta vs {}", args.benchmark));
    }
    print_output(&rows, format)
}
