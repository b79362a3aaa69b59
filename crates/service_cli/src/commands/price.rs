//! Price command implementation
//!
//! Prices one Asian option by Monte Carlo and, where it exists, by the
//! geometric closed form.

use asian_core::types::{AverageType, MarketParameters, OptionQuote};
use asian_pricing::analytical::GeometricPricer;
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::generate_gbm_paths;
use serde::Serialize;
use tracing::info;

use crate::args::PriceArgs;
use crate::config::CliConfig;
use crate::output::{fmt4, print_json, OutputFormat, Table};
use crate::Result;

#[derive(Debug, Serialize)]
struct PriceOutput {
    market: MarketParameters,
    n_steps: usize,
    seed: Option<u64>,
    monte_carlo: OptionQuote,
    /// Geometric closed form, exact for geometric averages and a lower
    /// bound for arithmetic calls.
    geometric_closed_form: OptionQuote,
}

/// Run the price command
pub fn run(mut config: CliConfig, args: &PriceArgs, format: OutputFormat) -> Result<()> {
    args.market.apply(&mut config);
    args.simulation.apply(&mut config);
    let market = config.market_parameters()?;
    let simulation = config.simulation_config()?;

    info!(
        option_type = %args.option_type,
        average = %args.average,
        n_paths = simulation.n_paths(),
        n_steps = simulation.n_steps(),
        "Starting pricing"
    );

    let batch = generate_gbm_paths(&market, &simulation)?;
    let pricer = AsianMonteCarloPricer::new(
        market.strike,
        market.rate,
        args.option_type,
        Some(args.average),
    );
    let output = PriceOutput {
        market,
        n_steps: simulation.n_steps(),
        seed: batch.seed(),
        monte_carlo: pricer.price(&batch)?,
        geometric_closed_form: GeometricPricer::quote(&market, args.option_type)?,
    };

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Table => print_table(&output, args.average),
    }

    info!("Pricing complete");
    Ok(())
}

fn print_table(output: &PriceOutput, average: AverageType) {
    let mut table = Table::new(["Method", "Price", "Std Error", "95% CI"]);
    let mc = &output.monte_carlo;
    let half = mc.confidence_95();
    table.row([
        format!("monte carlo ({})", average),
        fmt4(mc.price),
        fmt4(mc.std_error),
        format!("[{}, {}]", fmt4(mc.price - half), fmt4(mc.price + half)),
    ]);
    table.row([
        "geometric closed form".to_string(),
        fmt4(output.geometric_closed_form.price),
        fmt4(0.0),
        String::new(),
    ]);
    table.print();

    if let Some(seed) = output.seed {
        println!("seed: {} (replay with --seed {})", seed, seed);
    }
}
