//! Config command implementation.
//!
//! Shows the effective settings and writes starter files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{flatten_json, print_header, print_json, print_output, print_success};
use crate::settings::Settings;

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration (defaults merged with --config)
    Show,

    /// Write a configuration file with every default spelled out
    Init(InitArgs),

    /// Check a configuration file without running anything
    Validate(ValidateArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination file
    #[arg(long, default_value = "aurum.toml")]
    pub path: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// File to check
    pub path: PathBuf,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, settings: &Settings, format: OutputFormat) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(settings, format),
        ConfigCommand::Init(init) => {
            if init.path.exists() && !init.force {
                return Err(CliError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    init.path.display()
                ))
                .into());
            }
            std::fs::write(&init.path, Settings::default().to_toml()?).map_err(CliError::from)?;
            print_success(&format!("Wrote default configuration to {}", init.path.display()));
            Ok(())
        }
        ConfigCommand::Validate(validate) => {
            Settings::load(Some(validate.path.as_path()))?;
            print_success(&format!("{} is valid", validate.path.display()));
            Ok(())
        }
    }
}

fn show(settings: &Settings, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(settings);
    }

    let mut rows = Vec::new();
    flatten_json("", &serde_json::to_value(settings)?, &mut rows);
    if format == OutputFormat::Table {
        print_header("Configuration");
    }
    print_output(&rows, format)
}
