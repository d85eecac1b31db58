//! Foreman - Catalog Tool for Cable Accessories
//!
//! Builds separable-connector and termination part numbers from the
//! reference tables, and audits the cable database for constructions the
//! catalog cannot cover.

mod audit;
mod config;
mod resolve;
mod tables;

use crate::config::ForemanConfig;
use anyhow::Result;
use catalog_store::CatalogLoader;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "foreman")]
#[command(about = "Foreman - cable accessory catalog tool")]
#[command(long_about = "Foreman - cable accessory catalog tool

Part-number resolution:
  resolve elbow200    Build a 200A loadbreak elbow part number
  resolve tbody600    Build a 600A deadbreak T-body part number

Catalog maintenance:
  audit       Audit the cable database against the termination windows
  tables      List reference tables and their load status

Examples:
  foreman resolve elbow200 15-LE200 -v 15 -d 18.5 \\
      --conductor-type Copper --conductor-size 50 --material copper -t
  foreman audit --detailed
  foreman tables

Use 'foreman <command> --help' for more information on a specific command.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Data directory with the reference CSVs (default: ./data)
    #[arg(short = 'p', long = "data-path", global = true)]
    data_path: Option<PathBuf>,

    /// Configuration file (default: ./foreman.toml)
    #[arg(short = 'c', long = "config-file", global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a part number from catalog attributes
    #[command(about = "Build a part number from catalog attributes")]
    Resolve {
        #[command(subcommand)]
        command: resolve::ResolveCommands,
    },

    /// Audit cable database coverage
    #[command(about = "Audit the cable database against termination OD windows")]
    Audit {
        /// Report file (default: from configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every finding, not just the summary
        #[arg(short, long)]
        detailed: bool,
    },

    /// List reference tables
    #[command(about = "List reference tables and their load status")]
    Tables,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure colored output
    if cli.no_color {
        colored::control::set_override(false);
    }

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    let mut config = ForemanConfig::load(cli.config_file.as_deref())?;
    if let Some(data_path) = cli.data_path {
        config.data_dir = data_path;
    }

    match cli.command {
        Commands::Resolve { command } => {
            let ctx = CatalogLoader::new(&config.data_dir).load()?;
            resolve::handle_command(command, &ctx)?;
        },
        Commands::Audit { output, detailed } => {
            let report_file = output.unwrap_or(config.report_file);
            audit::handle_audit(&config.data_dir, &report_file, detailed)?;
        },
        Commands::Tables => {
            let ctx = CatalogLoader::new(&config.data_dir).load()?;
            tables::handle_tables(&ctx)?;
        },
    }

    Ok(())
}
