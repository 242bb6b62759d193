//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{
    BetaArgs, ConfigArgs, DiversificationArgs, EsgArgs, PerformanceArgs, SimulateArgs,
};

/// Aurum - Portfolio performance, beta and ESG analytics
#[derive(Parser)]
#[command(name = "aurum")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(short, long, env = "AURUM_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Historical performance metrics (return, volatility, ratios, drawdown)
    Performance(PerformanceArgs),

    /// Beta of each asset against a benchmark
    Beta(BetaArgs),

    /// Diversification ratio and average correlation of a weighted portfolio
    Diversification(DiversificationArgs),

    /// Value-weighted ESG scores and coverage of a holdings file
    Esg(EsgArgs),

    /// Generate simulated return paths
    Simulate(SimulateArgs),

    /// Show or create the configuration file
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}
