//! Backtest command implementation
//!
//! Reads a `date,price` CSV series and runs rolling-window hedging
//! backtests over it. Retrieval of the series is left to the caller.

use std::io::Read;
use std::path::Path;

use asian_hedging::{BacktestEngine, BacktestReport, PremiumSource, PricePoint};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::args::{BacktestArgs, PremiumArg};
use crate::config::CliConfig;
use crate::output::{fmt4, print_json, OutputFormat, Table};
use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct Row {
    date: NaiveDate,
    price: f64,
}

/// Reads `date,price` rows with a header line.
pub fn read_series<R: Read>(reader: R) -> Result<Vec<PricePoint>> {
    let mut csv = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut series = Vec::new();
    for row in csv.deserialize::<Row>() {
        let row = row?;
        series.push(PricePoint::new(row.date, row.price));
    }
    Ok(series)
}

fn read_series_file(path: &Path) -> Result<Vec<PricePoint>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    read_series(std::fs::File::open(path)?)
}

/// Run the backtest command
pub fn run(mut config: CliConfig, args: &BacktestArgs, format: OutputFormat) -> Result<()> {
    args.simulation.apply(&mut config);
    if let Some(window) = args.window {
        config.backtest.window_steps = window;
    }
    if args.stride.is_some() {
        config.backtest.stride = args.stride;
    }
    if let Some(moneyness) = args.moneyness {
        config.backtest.moneyness = moneyness;
    }

    let mut backtest = config.backtest_config(args.rate.unwrap_or(config.market.rate));
    backtest.option_type = args.option_type;
    backtest.payoff = args.payoff;
    backtest.strategy = args.strategy;
    backtest.premium_source = match args.premium {
        PremiumArg::ClosedForm => PremiumSource::ClosedForm,
        PremiumArg::MonteCarlo => PremiumSource::MonteCarlo {
            n_paths: config.simulation.n_paths,
            seed: config.simulation.seed,
        },
    };
    let engine = BacktestEngine::new(backtest)?;

    let series = read_series_file(&args.input)?;
    info!(
        input = %args.input.display(),
        n_points = series.len(),
        window_steps = backtest.window_steps,
        strategy = %backtest.strategy,
        "Starting backtest"
    );

    let report = engine.run(&series)?;
    match format {
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Table => print_table(&report),
    }

    info!("Backtest complete");
    Ok(())
}

fn print_table(report: &BacktestReport) {
    let mut table = Table::new([
        "Start", "End", "Spot", "Strike", "Vol", "Premium", "Payoff", "P&L",
    ]);
    for w in &report.windows {
        table.row([
            w.start.to_string(),
            w.end.to_string(),
            fmt4(w.spot),
            fmt4(w.strike),
            format!("{:.2}%", 100.0 * w.volatility),
            fmt4(w.premium),
            fmt4(w.payoff),
            fmt4(w.pnl),
        ]);
    }
    table.print();

    let s = &report.summary;
    println!(
        "windows: {}, mean P&L: {}, std P&L: {}, profitable: {:.1}%",
        s.n_windows,
        fmt4(s.mean_pnl),
        fmt4(s.std_pnl),
        100.0 * s.profitable_fraction
    );
}
