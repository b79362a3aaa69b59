//! Rolling-window hedging backtests over a historical price series.
//!
//! Each window sells one at-the-money (or `moneyness`-scaled) option at the
//! window start, priced with the trailing realised volatility, and hedges
//! it through the realised prices until the window ends. Windows are
//! independent and run in parallel.
//!
//! ```text
//! index:  0 ........ s-vol_window ........ s ............ s+window_steps
//!                    └── vol estimate ──────┘└──── hedged path ─────┘
//! ```

use asian_core::math::statistics::{
    realized_volatility, SampleStatistics, REALIZED_VOL_WINDOW, TRADING_DAYS_PER_YEAR,
};
use asian_core::types::error::{ensure_finite, ensure_positive};
use asian_core::types::{MarketParameters, OptionType, PricingError, PricingResult};
use asian_pricing::mc::AsianMonteCarloPricer;
use asian_pricing::paths::{generate_gbm_paths, PricePath, SimulationConfig, TimeGrid};
use asian_pricing::rng::derive_stream_seed;
use chrono::NaiveDate;
use rayon::prelude::*;
use tracing::debug;

use crate::simulator::SelfFinancingHedger;
use crate::strategy::{HedgeContract, HedgedPayoff, HedgingStrategy};

/// One observation of the historical series.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Closing price.
    pub price: f64,
}

impl PricePoint {
    /// Creates a point.
    pub fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// How the premium of each window is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PremiumSource {
    /// Geometric closed form (Black-Scholes for European payoffs).
    #[default]
    ClosedForm,
    /// Monte Carlo estimate of the hedged payoff itself.
    MonteCarlo {
        /// Paths per window.
        n_paths: usize,
        /// Base seed; window `w` uses a seed derived from `(seed, w)`.
        seed: Option<u64>,
    },
}

/// Backtest settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestConfig {
    /// Observations per hedged window; also the number of rebalancing steps.
    pub window_steps: usize,
    /// Log returns used for the trailing volatility estimate.
    pub vol_window: usize,
    /// Observations per year, for annualising volatility and maturity.
    pub periods_per_year: f64,
    /// Distance between window starts; `None` means `window_steps`.
    pub stride: Option<usize>,
    /// Strike as a multiple of the window's initial price.
    pub moneyness: f64,
    /// Risk-free rate.
    pub rate: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Payoff sold in each window.
    pub payoff: HedgedPayoff,
    /// Hedging strategy.
    pub strategy: HedgingStrategy,
    /// Premium computation.
    pub premium_source: PremiumSource,
}

impl BacktestConfig {
    /// Daily defaults for windows of `window_steps` observations:
    /// arithmetic Asian call, at the money, zero rate, conditional hedge,
    /// closed-form premium.
    pub fn new(window_steps: usize) -> Self {
        Self {
            window_steps,
            vol_window: REALIZED_VOL_WINDOW,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            stride: None,
            moneyness: 1.0,
            rate: 0.0,
            option_type: OptionType::Call,
            payoff: HedgedPayoff::default(),
            strategy: HedgingStrategy::default(),
            premium_source: PremiumSource::default(),
        }
    }

    /// Effective stride.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride.unwrap_or(self.window_steps)
    }

    /// Hedged window length in years.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.window_steps as f64 / self.periods_per_year
    }

    /// Shortest series that yields one window.
    #[inline]
    pub fn min_series_len(&self) -> usize {
        self.vol_window + self.window_steps + 1
    }

    /// Checks every field.
    pub fn validate(&self) -> PricingResult<()> {
        if self.window_steps == 0 {
            return Err(PricingError::invalid_parameter(
                "window_steps",
                "must be at least 1",
            ));
        }
        if self.vol_window < 2 {
            return Err(PricingError::invalid_parameter(
                "vol_window",
                format!("need at least 2 returns, got {}", self.vol_window),
            ));
        }
        if self.stride == Some(0) {
            return Err(PricingError::invalid_parameter("stride", "must be at least 1"));
        }
        ensure_positive("periods_per_year", self.periods_per_year)?;
        ensure_positive("moneyness", self.moneyness)?;
        ensure_finite("rate", self.rate)?;
        if let PremiumSource::MonteCarlo { n_paths, .. } = self.premium_source {
            if n_paths == 0 {
                return Err(PricingError::invalid_parameter(
                    "n_paths",
                    "Monte Carlo premium needs at least 1 path",
                ));
            }
        }
        Ok(())
    }
}

/// Outcome of one hedged window.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowResult {
    /// Date the option is sold.
    pub start: NaiveDate,
    /// Date the option expires.
    pub end: NaiveDate,
    /// Price at `start`.
    pub spot: f64,
    /// Strike.
    pub strike: f64,
    /// Trailing realised volatility used for pricing and hedging.
    pub volatility: f64,
    /// Premium received.
    pub premium: f64,
    /// Payoff paid at `end`.
    pub payoff: f64,
    /// Hedging P&L at `end`.
    pub pnl: f64,
    /// P&L discounted to `start`.
    pub discounted_pnl: f64,
}

/// Aggregate over all windows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestSummary {
    /// Number of windows.
    pub n_windows: usize,
    /// Mean P&L.
    pub mean_pnl: f64,
    /// Sample standard deviation of the P&L.
    pub std_pnl: f64,
    /// Share of windows with positive P&L.
    pub profitable_fraction: f64,
}

impl BacktestSummary {
    fn from_windows(windows: &[WindowResult]) -> Self {
        let stats: SampleStatistics = windows.iter().map(|w| w.pnl).collect();
        let profitable = windows.iter().filter(|w| w.pnl > 0.0).count();
        Self {
            n_windows: windows.len(),
            mean_pnl: stats.mean(),
            std_pnl: stats.std_dev(),
            profitable_fraction: if windows.is_empty() {
                0.0
            } else {
                profitable as f64 / windows.len() as f64
            },
        }
    }
}

/// Per-window results in chronological order plus their summary.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BacktestReport {
    /// Windows ordered by start date.
    pub windows: Vec<WindowResult>,
    /// Aggregate figures.
    pub summary: BacktestSummary,
}

/// Runs rolling-window backtests.
///
/// # Examples
///
/// ```rust
/// use asian_hedging::{BacktestConfig, BacktestEngine, PricePoint};
/// use chrono::{Days, NaiveDate};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let series: Vec<PricePoint> = (0..80u64)
///     .map(|i| {
///         let price = 100.0 * (1.0 + 0.01 * ((i as f64) * 0.7).sin());
///         PricePoint::new(start.checked_add_days(Days::new(i)).unwrap(), price)
///     })
///     .collect();
///
/// let engine = BacktestEngine::new(BacktestConfig::new(20)).unwrap();
/// let report = engine.run(&series).unwrap();
/// assert_eq!(report.summary.n_windows, 2);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    /// Creates an engine after validating `config`.
    pub fn new(config: BacktestConfig) -> PricingResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Settings in use.
    #[inline]
    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    /// Start indices of every complete window in a series of `len` points.
    pub fn window_starts(&self, len: usize) -> Vec<usize> {
        let cfg = &self.config;
        (cfg.vol_window..)
            .step_by(cfg.stride())
            .take_while(|&s| s + cfg.window_steps < len)
            .collect()
    }

    /// Backtests `series`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the series is shorter than one window or its
    /// dates are not strictly increasing; `NumericDegeneracy` on a
    /// non-positive price or zero realised volatility.
    pub fn run(&self, series: &[PricePoint]) -> PricingResult<BacktestReport> {
        let cfg = &self.config;
        if series.len() < cfg.min_series_len() {
            return Err(PricingError::invalid_parameter(
                "series",
                format!(
                    "need at least {} points for one window, got {}",
                    cfg.min_series_len(),
                    series.len()
                ),
            ));
        }
        if let Some(w) = series.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(PricingError::invalid_parameter(
                "series",
                format!("dates must be strictly increasing: {} then {}", w[0].date, w[1].date),
            ));
        }
        if let Some(p) = series.iter().find(|p| !(p.price > 0.0 && p.price.is_finite())) {
            return Err(PricingError::numeric_degeneracy(format!(
                "price {} on {} is not strictly positive",
                p.price, p.date
            )));
        }

        let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
        let starts = self.window_starts(series.len());
        let windows = starts
            .par_iter()
            .enumerate()
            .map(|(index, &start)| self.run_window(series, &prices, index, start))
            .collect::<PricingResult<Vec<_>>>()?;
        let summary = BacktestSummary::from_windows(&windows);

        debug!(
            n_points = series.len(),
            n_windows = summary.n_windows,
            strategy = %cfg.strategy,
            mean_pnl = summary.mean_pnl,
            std_pnl = summary.std_pnl,
            "backtest finished"
        );

        Ok(BacktestReport { windows, summary })
    }

    fn run_window(
        &self,
        series: &[PricePoint],
        prices: &[f64],
        index: usize,
        start: usize,
    ) -> PricingResult<WindowResult> {
        let cfg = &self.config;
        let end = start + cfg.window_steps;
        let volatility =
            realized_volatility(&prices[start - cfg.vol_window..=start], cfg.periods_per_year)?;

        let spot = prices[start];
        let contract = HedgeContract {
            strike: cfg.moneyness * spot,
            rate: cfg.rate,
            volatility,
            maturity: cfg.maturity(),
            option_type: cfg.option_type,
            payoff: cfg.payoff,
        };
        let premium = self.premium(&contract, spot, index)?;
        let hedger = SelfFinancingHedger::new(contract, cfg.strategy)?.with_premium(premium)?;

        let grid = TimeGrid::new(contract.maturity, cfg.window_steps)?;
        let path = PricePath::new(&prices[start..=end])?;
        let outcome = hedger.hedge_path(&path, &grid)?;

        Ok(WindowResult {
            start: series[start].date,
            end: series[end].date,
            spot,
            strike: contract.strike,
            volatility,
            premium,
            payoff: outcome.payoff,
            pnl: outcome.pnl,
            discounted_pnl: outcome.discounted_pnl,
        })
    }

    fn premium(&self, contract: &HedgeContract, spot: f64, index: usize) -> PricingResult<f64> {
        match self.config.premium_source {
            PremiumSource::ClosedForm => contract.closed_form_premium(spot),
            PremiumSource::MonteCarlo { n_paths, seed } => {
                let market = MarketParameters::new(
                    spot,
                    contract.strike,
                    contract.rate,
                    contract.volatility,
                    contract.maturity,
                )?;
                let sim = SimulationConfig::builder()
                    .n_paths(n_paths)
                    .n_steps(self.config.window_steps)
                    .maybe_seed(seed.map(|s| derive_stream_seed(s, index as u64)))
                    .build()?;
                let batch = generate_gbm_paths(&market, &sim)?;
                let pricer = AsianMonteCarloPricer::new(
                    contract.strike,
                    contract.rate,
                    contract.option_type,
                    contract.payoff.average_type(),
                );
                Ok(pricer.price(&batch)?.price)
            }
        }
    }
}
