//! Command-line argument groups shared by several commands.
//!
//! Every flag is optional; an absent flag keeps the configured value.

use std::path::PathBuf;

use asian_core::types::{AverageType, OptionType};
use asian_hedging::{HedgedPayoff, HedgingStrategy};
use clap::{Args, ValueEnum};

use crate::config::CliConfig;

/// Overrides for the `[market]` section.
#[derive(Debug, Clone, Default, Args)]
pub struct MarketArgs {
    /// Initial price S0
    #[arg(long)]
    pub spot: Option<f64>,

    /// Strike K
    #[arg(long)]
    pub strike: Option<f64>,

    /// Risk-free rate r (continuously compounded)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Volatility σ
    #[arg(long, alias = "vol")]
    pub volatility: Option<f64>,

    /// Maturity t in years
    #[arg(long)]
    pub maturity: Option<f64>,

    /// Real-world drift μ for path generation (defaults to the rate)
    #[arg(long)]
    pub drift: Option<f64>,
}

/// Overrides for the `[simulation]` section.
#[derive(Debug, Clone, Default, Args)]
pub struct SimulationArgs {
    /// Number of Monte Carlo paths M
    #[arg(short = 'n', long = "paths")]
    pub n_paths: Option<usize>,

    /// Number of time steps N
    #[arg(long = "steps")]
    pub n_steps: Option<usize>,

    /// Base seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,
}

impl MarketArgs {
    pub fn apply(&self, config: &mut CliConfig) {
        let m = &mut config.market;
        if let Some(v) = self.spot {
            m.spot = v;
        }
        if let Some(v) = self.strike {
            m.strike = v;
        }
        if let Some(v) = self.rate {
            m.rate = v;
        }
        if let Some(v) = self.volatility {
            m.volatility = v;
        }
        if let Some(v) = self.maturity {
            m.maturity = v;
        }
        if self.drift.is_some() {
            m.drift = self.drift;
        }
    }
}

impl SimulationArgs {
    pub fn apply(&self, config: &mut CliConfig) {
        let s = &mut config.simulation;
        if let Some(v) = self.n_paths {
            s.n_paths = v;
        }
        if let Some(v) = self.n_steps {
            s.n_steps = v;
        }
        if self.seed.is_some() {
            s.seed = self.seed;
        }
    }
}

/// `asian price`
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Averaging rule (arithmetic, geometric)
    #[arg(short, long, default_value = "arithmetic")]
    pub average: AverageType,
}

/// `asian convergence`
#[derive(Debug, Clone, Args)]
pub struct ConvergenceArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Averaging rule (arithmetic, geometric)
    #[arg(short, long, default_value = "arithmetic")]
    pub average: AverageType,

    /// Path counts, comma separated (default: decades from 100 up to --paths)
    #[arg(long, value_delimiter = ',')]
    pub ladder: Vec<usize>,
}

/// `asian hedge`
#[derive(Debug, Clone, Args)]
pub struct HedgeArgs {
    #[command(flatten)]
    pub market: MarketArgs,

    #[command(flatten)]
    pub simulation: SimulationArgs,

    /// Call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Hedged payoff (arithmetic, geometric, european)
    #[arg(long, default_value = "arithmetic")]
    pub payoff: HedgedPayoff,

    /// Strategies to compare (conditional, naive, black_scholes);
    /// defaults to every strategy suited to the payoff
    #[arg(short, long, value_delimiter = ',')]
    pub strategy: Vec<HedgingStrategy>,

    /// Fixed premium instead of the closed form
    #[arg(long)]
    pub premium: Option<f64>,
}

/// Where backtest premiums come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PremiumArg {
    /// Closed form at each window start
    #[default]
    ClosedForm,
    /// Monte Carlo with the configured path count and seed
    MonteCarlo,
}

/// `asian backtest`
#[derive(Debug, Clone, Args)]
pub struct BacktestArgs {
    /// CSV file with `date,price` rows (ISO dates, header required)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Observations per hedged window
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Distance between window starts
    #[arg(long)]
    pub stride: Option<usize>,

    /// Strike as a multiple of the window's initial price
    #[arg(long)]
    pub moneyness: Option<f64>,

    /// Risk-free rate (defaults to the configured market rate)
    #[arg(long)]
    pub rate: Option<f64>,

    /// Call or put
    #[arg(short = 't', long = "type", default_value = "call")]
    pub option_type: OptionType,

    /// Hedged payoff (arithmetic, geometric, european)
    #[arg(long, default_value = "arithmetic")]
    pub payoff: HedgedPayoff,

    /// Hedging strategy
    #[arg(short, long, default_value = "conditional")]
    pub strategy: HedgingStrategy,

    /// Premium source
    #[arg(long, value_enum, default_value_t = PremiumArg::ClosedForm)]
    pub premium: PremiumArg,

    #[command(flatten)]
    pub simulation: SimulationArgs,
}
