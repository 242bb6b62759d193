//! Simulate command implementation.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use aurum_analytics::performance::{
    annualized_return_with, annualized_volatility_with, max_drawdown,
};
use aurum_analytics::{simulate_universe, SimulationParams};
use aurum_core::{AssetId, Periodicity, ReturnUniverse};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::parse_periodicity;
use crate::output::{fmt_percent, print_header, print_json, print_output, print_success};
use crate::settings::Settings;

/// Arguments for the simulate command.
#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Asset name; repeat to simulate several independent paths
    #[arg(short, long = "asset", default_value = "SIMULATED")]
    pub assets: Vec<String>,

    /// Target annualized return as a fraction (overrides the config file)
    #[arg(long, allow_hyphen_values = true)]
    pub annual_return: Option<f64>,

    /// Target annualized volatility as a fraction (overrides the config file)
    #[arg(long)]
    pub annual_volatility: Option<f64>,

    /// Number of periods per path
    #[arg(short = 'n', long)]
    pub periods: Option<usize>,

    /// Period length: daily, weekly, monthly, quarterly, annual
    #[arg(short, long, value_parser = parse_periodicity)]
    pub periodicity: Option<Periodicity>,

    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    pub seed: u64,

    /// Write the paths to a CSV file instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Realized statistics of one simulated path.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct PathStats {
    #[tabled(rename = "Asset")]
    pub asset: String,
    #[tabled(rename = "Periods")]
    pub periods: usize,
    #[tabled(rename = "Ann. Return", display_with = "fmt_percent")]
    pub annualized_return: f64,
    #[tabled(rename = "Ann. Vol", display_with = "fmt_percent")]
    pub annualized_volatility: f64,
    #[tabled(rename = "Max DD", display_with = "fmt_percent")]
    pub max_drawdown: f64,
}

/// Writes a universe as a wide CSV, one column per asset, readable by the
/// return loader.
fn write_wide_csv<W: Write>(universe: &ReturnUniverse, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(universe.assets().map(AssetId::as_str))?;
    for row in 0..universe.min_length() {
        wtr.write_record(
            universe
                .iter()
                .map(|(_, series)| series.as_slice()[row].to_string()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}

/// Execute the simulate command.
pub fn execute(args: SimulateArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    let mut params = settings.simulation;
    if let Some(annual_return) = args.annual_return {
        params.annual_return = annual_return;
    }
    if let Some(annual_volatility) = args.annual_volatility {
        params.annual_volatility = annual_volatility;
    }
    if let Some(periods) = args.periods {
        params.periods = periods;
    }
    if let Some(periodicity) = args.periodicity {
        params.periodicity = periodicity;
    }

    let assets: Vec<(AssetId, SimulationParams)> = args
        .assets
        .iter()
        .map(|name| (AssetId::new(name.as_str()), params))
        .collect();
    let universe = simulate_universe(&assets, args.seed)?;
    tracing::info!(
        assets = universe.len(),
        periods = params.periods,
        seed = args.seed,
        "simulated return paths"
    );

    if let Some(path) = &args.output {
        let file = std::fs::File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        write_wide_csv(&universe, file)?;
        print_success(&format!(
            "Wrote {} paths of {} periods to {}",
            universe.len(),
            params.periods,
            path.display()
        ));
        return Ok(());
    }

    match format {
        OutputFormat::Json => print_json(&universe),
        OutputFormat::Csv => write_wide_csv(&universe, std::io::stdout()),
        OutputFormat::Table => {
            let ppy = f64::from(params.periodicity.periods_per_year());
            let stats: Vec<PathStats> = universe
                .iter()
                .map(|(asset, series)| PathStats {
                    asset: asset.to_string(),
                    periods: series.len(),
                    annualized_return: annualized_return_with(series.as_slice(), ppy),
                    annualized_volatility: annualized_volatility_with(series.as_slice(), ppy),
                    max_drawdown: max_drawdown(series.as_slice()),
                })
                .collect();
            print_header(&format!(
                "Simulated {} ({:.2}% return, {:.2}% volatility, seed {})",
                params.periodicity,
                params.annual_return * 100.0,
                params.annual_volatility * 100.0,
                args.seed
            ));
            print_output(&stats, format)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_csv_layout() {
        let universe = ReturnUniverse::new()
            .with_series("B", vec![0.5, -0.25])
            .with_series("A", vec![0.01, 0.02]);
        let mut buffer = Vec::new();
        write_wide_csv(&universe, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "A,B\n0.01,0.5\n0.02,-0.25\n");
    }
}
