//! Diversification command implementation.

use std::path::PathBuf;

use anyhow::Result;
use aurum_analytics::{compute_diversification_metrics, DiversificationMetrics};
use aurum_core::AssetId;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{load_universe, require_series};
use crate::error::{CliError, CliResult};
use crate::output::{fmt_percent, fmt_ratio, print_header, print_json, print_output, KeyValue};
use crate::settings::Settings;

/// Arguments for the diversification command.
#[derive(Args, Debug)]
pub struct DiversificationArgs {
    /// Wide CSV of periodic returns (optional date column, one column per asset)
    #[arg(short, long)]
    pub returns: PathBuf,

    /// Portfolio weight as ASSET=WEIGHT; repeat per asset (default: equal weights)
    #[arg(short, long = "weight", value_parser = parse_weight)]
    pub weights: Vec<(AssetId, f64)>,
}

/// Parses `ASSET=WEIGHT`. The last `=` separates the weight.
pub fn parse_weight(s: &str) -> CliResult<(AssetId, f64)> {
    let (asset, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| CliError::InvalidArgument(format!("expected ASSET=WEIGHT, got '{s}'")))?;
    let asset = asset.trim();
    if asset.is_empty() {
        return Err(CliError::InvalidArgument(format!("missing asset in '{s}'")));
    }
    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| CliError::InvalidArgument(format!("'{weight}' is not a weight")))?;
    if !weight.is_finite() {
        return Err(CliError::InvalidArgument(format!("weight for {asset} must be finite")));
    }
    Ok((AssetId::new(asset), weight))
}

fn metric_rows(metrics: &DiversificationMetrics) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Assets", metrics.assets.to_string()),
        KeyValue::new("Diversification Ratio", fmt_ratio(&metrics.diversification_ratio)),
        KeyValue::new(
            "Diversification Benefit",
            format!("{:.2}%", metrics.diversification_benefit_pct),
        ),
        KeyValue::new("Avg. Correlation", fmt_ratio(&metrics.weighted_avg_correlation)),
        KeyValue::new("Portfolio Volatility", fmt_percent(&metrics.portfolio_volatility)),
        KeyValue::new("Avg. Asset Volatility", fmt_percent(&metrics.weighted_avg_volatility)),
    ]
}

/// Execute the diversification command.
pub fn execute(args: DiversificationArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let universe = load_universe(&args.returns)?;

    let weights = if args.weights.is_empty() {
        let w = 1.0 / universe.len().max(1) as f64;
        universe.assets().map(|a| (a.clone(), w)).collect()
    } else {
        for (asset, _) in &args.weights {
            require_series(&universe, asset.as_str())?;
        }
        args.weights
    };

    let metrics = compute_diversification_metrics(&universe, &weights, &settings.analytics)?;
    tracing::info!(
        assets = metrics.assets,
        ratio = metrics.diversification_ratio,
        "computed diversification"
    );

    match format {
        OutputFormat::Json => print_json(&metrics),
        OutputFormat::Table => {
            print_header("Diversification");
            print_output(&metric_rows(&metrics), format)
        }
        OutputFormat::Csv => print_output(&metric_rows(&metrics), format),
    }
}
