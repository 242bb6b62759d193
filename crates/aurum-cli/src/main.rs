//! Aurum CLI - Command-line interface for portfolio analytics.
//!
//! # Usage
//!
//! ```bash
//! # Performance metrics for every asset in a return file
//! aurum performance --returns returns.csv --benchmark "MSCI ACWI"
//!
//! # Beta of each asset against a benchmark
//! aurum beta --returns returns.csv --benchmark "MSCI ACWI" --sort desc
//!
//! # Value-weighted ESG scores
//! aurum esg --holdings holdings.csv --isin-scores esg_isin.csv --cusip-scores esg_cusip.csv
//!
//! # Simulated monthly returns
//! aurum simulate --asset EQUITY --annual-return 0.07 --annual-volatility 0.12 --seed 7
//!
//! # Write a default configuration file
//! aurum config init --path aurum.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;
mod settings;

use cli::{Cli, Commands};
use settings::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let settings = Settings::load(cli.config.as_deref())?;
    let format = cli.format;

    // Execute command
    match cli.command {
        Commands::Performance(args) => commands::performance::execute(args, &settings, format)?,
        Commands::Beta(args) => commands::beta::execute(args, &settings, format)?,
        Commands::Diversification(args) => {
            commands::diversification::execute(args, &settings, format)?;
        }
        Commands::Esg(args) => commands::esg::execute(args, &settings, format)?,
        Commands::Simulate(args) => commands::simulate::execute(args, &settings, format)?,
        Commands::Config(args) => commands::config::execute(args, &settings, format)?,
    }

    Ok(())
}

/// Logs go to stderr so JSON and CSV output stay clean. `RUST_LOG` wins over
/// the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if verbose {
        "info"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
