//! Performance command implementation.
//!
//! Historical return, risk and drawdown metrics per asset.

use std::path::PathBuf;

use anyhow::Result;
use aurum_analytics::{calculate_performance_summary, PerformanceSummary};
use aurum_core::Periodicity;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::{
    load_universe, parse_periodicity, require_series, trailing_overlap, validate_rate,
};
use crate::output::{fmt_opt_percent, fmt_opt_ratio, fmt_percent, fmt_ratio, print_header, print_output};
use crate::settings::Settings;

/// Arguments for the performance command.
#[derive(Args, Debug)]
pub struct PerformanceArgs {
    /// Wide CSV of periodic returns (optional date column, one column per asset)
    #[arg(short, long)]
    pub returns: PathBuf,

    /// Asset to analyze; repeat for several (default: every non-benchmark column)
    #[arg(short, long = "asset")]
    pub assets: Vec<String>,

    /// Benchmark column for tracking error and information ratio
    #[arg(short, long)]
    pub benchmark: Option<String>,

    /// Annual risk-free rate as a fraction (overrides the config file)
    #[arg(long)]
    pub risk_free_rate: Option<f64>,

    /// Return periodicity: daily, weekly, monthly, quarterly, annual
    #[arg(short, long, value_parser = parse_periodicity)]
    pub periodicity: Option<Periodicity>,
}

/// One output row.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PerformanceRow {
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Periods")]
    pub periods: usize,
    #[tabled(rename = "Total", display_with = "fmt_percent")]
    pub total_return: f64,
    #[tabled(rename = "Ann. Return", display_with = "fmt_percent")]
    pub annualized_return: f64,
    #[tabled(rename = "Ann. Vol", display_with = "fmt_percent")]
    pub annualized_volatility: f64,
    #[tabled(rename = "Sharpe", display_with = "fmt_ratio")]
    pub sharpe_ratio: f64,
    #[tabled(rename = "Sortino", display_with = "fmt_ratio")]
    pub sortino_ratio: f64,
    #[tabled(rename = "Max DD", display_with = "fmt_percent")]
    pub max_drawdown: f64,
    #[tabled(rename = "Calmar", display_with = "fmt_ratio")]
    pub calmar_ratio: f64,
    #[tabled(rename = "TE", display_with = "fmt_opt_percent")]
    pub tracking_error: Option<f64>,
    #[tabled(rename = "IR", display_with = "fmt_opt_ratio")]
    pub information_ratio: Option<f64>,
}

impl PerformanceRow {
    fn new(asset: &str, summary: &PerformanceSummary) -> Self {
        let m = &summary.metrics;
        Self {
            asset: asset.to_string(),
            periods: summary.periods,
            total_return: summary.total_return,
            annualized_return: m.annualized_return,
            annualized_volatility: m.annualized_volatility,
            sharpe_ratio: m.sharpe_ratio,
            sortino_ratio: m.sortino_ratio,
            max_drawdown: m.max_drawdown,
            calmar_ratio: m.calmar_ratio,
            tracking_error: summary.tracking_error,
            information_ratio: m.information_ratio,
        }
    }
}

/// Execute the performance command.
///
/// With a benchmark, each asset and the benchmark are cut to their common
/// trailing window before any metric is computed.
pub fn execute(args: PerformanceArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let mut config = settings.analytics;
    if let Some(rate) = args.risk_free_rate {
        config = config.with_risk_free_rate(validate_rate(rate)?);
    }
    if let Some(periodicity) = args.periodicity {
        config = config.with_periodicity(periodicity);
    }

    let universe = load_universe(&args.returns)?;
    let benchmark = args
        .benchmark
        .as_deref()
        .map(|name| require_series(&universe, name))
        .transpose()?;

    let assets: Vec<String> = if args.assets.is_empty() {
        universe
            .assets()
            .filter(|a| Some(a.as_str()) != args.benchmark.as_deref())
            .map(|a| a.as_str().to_string())
            .collect()
    } else {
        args.assets
    };

    let mut rows = Vec::with_capacity(assets.len());
    for asset in &assets {
        let series = require_series(&universe, asset)?;
        let summary = match benchmark {
            Some(bench) => {
                let (s, b) = trailing_overlap(series.as_slice(), bench.as_slice());
                calculate_performance_summary(s, Some(b), &config)
            }
            None => calculate_performance_summary(series.as_slice(), None, &config),
        };
        rows.push(PerformanceRow::new(asset, &summary));
    }
    tracing::info!(assets = rows.len(), risk_free_rate = config.risk_free_rate, "computed performance");

    if format == OutputFormat::Table {
        let title = match &args.benchmark {
            Some(bench) => format!("Performance vs {bench} ({})", config.periodicity),
            None => format!("Performance ({})", config.periodicity),
        };
        print_header(&title);
    }
    print_output(&rows, format)
}
