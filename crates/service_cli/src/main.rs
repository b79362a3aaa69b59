//! Asian CLI - Command Line Operations for Asian Option Pricing and Hedging
//!
//! This is the operational entry point for the Asian option engine.
//!
//! # Commands
//!
//! - `asian price` - Price an Asian option by Monte Carlo and closed form
//! - `asian convergence` - Standard-error decay over a ladder of path counts
//! - `asian hedge` - Simulate self-financing delta hedges and compare P&L
//! - `asian backtest --input <file>` - Rolling hedges over a historical series
//! - `asian check` - Print the effective configuration and run self-checks
//!
//! # Architecture
//!
//! As the service layer of the workspace, this crate loads configuration,
//! reads user-supplied files and drives `asian_pricing` and `asian_hedging`.
//! It performs no data retrieval and no plotting.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod args;
mod commands;
mod config;
mod error;
mod output;

pub use error::{CliError, Result};

use args::{BacktestArgs, ConvergenceArgs, HedgeArgs, PriceArgs};
use config::CliConfig;
use output::OutputFormat;

/// Asian option pricing and hedging CLI
#[derive(Parser)]
#[command(name = "asian")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (forces debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path; defaults apply when it does not exist
    #[arg(short, long, global = true, default_value = "asian.toml")]
    config: PathBuf,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an Asian option
    Price(PriceArgs),

    /// Study Monte Carlo convergence over increasing path counts
    Convergence(ConvergenceArgs),

    /// Simulate delta hedging over GBM paths
    Hedge(HedgeArgs),

    /// Backtest hedging over a historical `date,price` CSV series
    Backtest(BacktestArgs),

    /// Check configuration and run engine self-checks
    Check,
}

fn init_tracing(filter: EnvFilter) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)?;

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter_str()))
    };
    init_tracing(filter);

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(config = ?config, path = %cli.config.display(), "Configuration loaded");

    match cli.command {
        Commands::Price(args) => commands::price::run(config, &args, cli.format),
        Commands::Convergence(args) => commands::convergence::run(config, &args, cli.format),
        Commands::Hedge(args) => commands::hedge::run(config, &args, cli.format),
        Commands::Backtest(args) => commands::backtest::run(config, &args, cli.format),
        Commands::Check => commands::check::run(&config, cli.format),
    }
}
