//! Hedge command implementation
//!
//! Simulates one batch and hedges it under each requested strategy, next to
//! the unhedged position (premium in, payoff out, no shares).

use asian_core::math::statistics::SampleStatistics;
use asian_hedging::{HedgeContract, HedgeReport, HedgedPayoff, HedgingStrategy, SelfFinancingHedger};
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::generate_gbm_paths;
use serde::Serialize;
use tracing::info;

use crate::args::HedgeArgs;
use crate::config::CliConfig;
use crate::output::{fmt4, print_json, OutputFormat, Table};
use crate::Result;

/// P&L dispersion of one strategy, discounted to inception.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct StrategySummary {
    /// Strategy name, `unhedged` for the naked position.
    strategy: String,
    premium: f64,
    mean_pnl: f64,
    std_pnl: f64,
    std_error: f64,
    mean_abs_pnl: f64,
}

impl StrategySummary {
    fn from_report(report: &HedgeReport) -> Self {
        Self {
            strategy: report.strategy.to_string(),
            premium: report.premium,
            mean_pnl: report.mean(),
            std_pnl: report.std_dev(),
            std_error: report.std_error(),
            mean_abs_pnl: report.mean_abs(),
        }
    }

    fn unhedged(premium: f64, discounted_payoffs: &[f64]) -> Self {
        let pnl: Vec<f64> = discounted_payoffs.iter().map(|p| premium - p).collect();
        let stats = SampleStatistics::from_slice(&pnl);
        let mean_abs = if pnl.is_empty() {
            0.0
        } else {
            pnl.iter().map(|p| p.abs()).sum::<f64>() / pnl.len() as f64
        };
        Self {
            strategy: "unhedged".to_string(),
            premium,
            mean_pnl: stats.mean(),
            std_pnl: stats.std_dev(),
            std_error: stats.std_error(),
            mean_abs_pnl: mean_abs,
        }
    }
}

#[derive(Debug, Serialize)]
struct HedgeOutput {
    payoff: String,
    n_paths: usize,
    n_steps: usize,
    seed: Option<u64>,
    strategies: Vec<StrategySummary>,
}

/// Strategies compared when none is requested.
fn default_strategies(payoff: HedgedPayoff) -> Vec<HedgingStrategy> {
    match payoff {
        HedgedPayoff::Asian(_) => vec![HedgingStrategy::Conditional, HedgingStrategy::Naive],
        HedgedPayoff::European => vec![HedgingStrategy::BlackScholes],
    }
}

/// Run the hedge command
pub fn run(mut config: CliConfig, args: &HedgeArgs, format: OutputFormat) -> Result<()> {
    args.market.apply(&mut config);
    args.simulation.apply(&mut config);
    let market = config.market_parameters()?;
    let simulation = config.simulation_config()?;
    let contract = HedgeContract::from_market(&market, args.option_type, args.payoff)?;

    let strategies = if args.strategy.is_empty() {
        default_strategies(args.payoff)
    } else {
        args.strategy.clone()
    };
    info!(
        payoff = %args.payoff,
        strategies = ?strategies,
        n_paths = simulation.n_paths(),
        n_steps = simulation.n_steps(),
        "Starting hedging simulation"
    );

    let batch = generate_gbm_paths(&market, &simulation)?;
    let mut summaries = Vec::with_capacity(strategies.len() + 1);
    let mut premium = None;
    for strategy in strategies {
        let mut hedger = SelfFinancingHedger::new(contract, strategy)?;
        if let Some(p) = args.premium {
            hedger = hedger.with_premium(p)?;
        }
        let report = hedger.hedge_batch(&batch)?;
        premium.get_or_insert(report.premium);
        summaries.push(StrategySummary::from_report(&report));
    }

    let premium = match premium {
        Some(p) => p,
        None => contract.closed_form_premium(market.spot)?,
    };
    let payoffs = AsianMonteCarloPricer::new(
        contract.strike,
        contract.rate,
        contract.option_type,
        contract.payoff.average_type(),
    )
    .discounted_payoffs(&batch)?;
    summaries.push(StrategySummary::unhedged(premium, &payoffs));

    let output = HedgeOutput {
        payoff: args.payoff.to_string(),
        n_paths: batch.n_paths(),
        n_steps: batch.n_steps(),
        seed: batch.seed(),
        strategies: summaries,
    };
    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Table => print_table(&output),
    }

    info!("Hedging simulation complete");
    Ok(())
}

fn print_table(output: &HedgeOutput) {
    println!(
        "{} hedge, {} paths x {} steps (discounted P&L)",
        output.payoff, output.n_paths, output.n_steps
    );
    let mut table = Table::new(["Strategy", "Premium", "Mean", "Std Dev", "Std Error", "Mean |P&L|"]);
    for s in &output.strategies {
        table.row([
            s.strategy.clone(),
            fmt4(s.premium),
            fmt4(s.mean_pnl),
            fmt4(s.std_pnl),
            fmt4(s.std_error),
            fmt4(s.mean_abs_pnl),
        ]);
    }
    table.print();
    if let Some(seed) = output.seed {
        println!("seed: {}", seed);
    }
}
