//! Convergence command implementation
//!
//! Runs the Monte Carlo pricer over a ladder of path counts and reports how
//! the standard error decays.

use asian_core::types::{AverageType, MarketParameters};
use asian_pricing::analytical::GeometricPricer;
use asian_pricing::mc::{AsianMonteCarloPricer, ConvergenceReport, ConvergenceStudy, DEFAULT_PATH_LADDER};
use serde::Serialize;
use tracing::info;

use crate::args::ConvergenceArgs;
use crate::config::CliConfig;
use crate::output::{fmt4, print_json, OutputFormat, Table};
use crate::{CliError, Result};

/// Smallest rung of the default ladder.
const MIN_DEFAULT_PATHS: usize = 100;

#[derive(Debug, Serialize)]
struct ConvergenceOutput {
    market: MarketParameters,
    n_steps: usize,
    /// Base seed of the study, drawn when none was configured.
    seed: u64,
    /// Closed-form reference, present for geometric averages.
    reference: Option<f64>,
    report: ConvergenceReport,
}

/// Decades of [`DEFAULT_PATH_LADDER`] between 100 and `max_paths`.
fn default_ladder(max_paths: usize) -> Vec<usize> {
    DEFAULT_PATH_LADDER
        .iter()
        .copied()
        .filter(|&m| (MIN_DEFAULT_PATHS..=max_paths).contains(&m))
        .collect()
}

/// Run the convergence command
pub fn run(mut config: CliConfig, args: &ConvergenceArgs, format: OutputFormat) -> Result<()> {
    args.market.apply(&mut config);
    args.simulation.apply(&mut config);
    let market = config.market_parameters()?;
    let simulation = config.simulation_config()?;

    let ladder = if args.ladder.is_empty() {
        default_ladder(simulation.n_paths())
    } else {
        args.ladder.clone()
    };
    if ladder.is_empty() {
        return Err(CliError::InvalidArgument(format!(
            "no default rung between {} and {} paths; pass --ladder",
            MIN_DEFAULT_PATHS,
            simulation.n_paths()
        )));
    }
    info!(ladder = ?ladder, n_steps = simulation.n_steps(), "Starting convergence study");

    let pricer = AsianMonteCarloPricer::new(
        market.strike,
        market.rate,
        args.option_type,
        Some(args.average),
    );
    let report = ConvergenceStudy::new(market, simulation.n_steps())
        .with_seed(simulation.seed())
        .run(&pricer, &ladder)?;
    let reference = match args.average {
        AverageType::Geometric => Some(GeometricPricer::quote(&market, args.option_type)?.price),
        AverageType::Arithmetic => None,
    };

    let output = ConvergenceOutput {
        market,
        n_steps: simulation.n_steps(),
        seed: report.seed,
        reference,
        report,
    };
    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Table => print_table(&output),
    }
    Ok(())
}

fn print_table(output: &ConvergenceOutput) {
    let mut table = Table::new(["Paths", "Price", "Std Error", "SE x sqrt(M)", "|Error|"]);
    for p in &output.report.points {
        let error = output
            .reference
            .map(|r| fmt4((p.price - r).abs()))
            .unwrap_or_default();
        table.row([
            p.n_paths.to_string(),
            fmt4(p.price),
            fmt4(p.std_error),
            fmt4(p.scaled_error),
            error,
        ]);
    }
    table.print();

    if let Some(last) = output.report.last() {
        println!("estimate at {} paths: {} +/- {}", last.n_paths, fmt4(last.price), fmt4(last.std_error));
    }
    if let Some(reference) = output.reference {
        println!("closed form: {}", fmt4(reference));
    }
    println!(
        "standard error monotone: {}, scaling spread: {:.3}",
        output.report.is_error_monotone(),
        output.report.scaling_spread()
    );
    println!("seed: {}", output.seed);
}
