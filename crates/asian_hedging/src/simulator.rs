//! Self-financing delta-hedging simulator.
//!
//! The seller receives the premium at `t_0`, holds `Δ_i` shares after
//! rebalancing at each grid point, and keeps the rest in a bond account
//! accruing at the risk-free rate:
//!
//! ```text
//! B_0 = premium - Δ_0·S_0
//! B_i = B_{i-1}·e^{r·dt} - (Δ_i - Δ_{i-1})·S_i        i = 1..=N
//! V_i = Δ_i·S_i + B_i
//! ```
//!
//! No other cash enters or leaves until maturity. With `Δ_N = 0` the
//! terminal value is the liquidated bond balance `B_N`, and the hedging
//! P&L is `B_N - payoff`.

use asian_core::math::statistics::SampleStatistics;
use asian_core::types::error::ensure_finite;
use asian_core::types::{PricingError, PricingResult};
use asian_pricing::path_dependent::PathObserver;
use asian_pricing::paths::{PathBatch, PricePath, TimeGrid};
use rayon::prelude::*;
use tracing::debug;

use crate::strategy::{HedgeContract, HedgedPayoff, HedgingStrategy, StepObservation};

/// Portfolio after rebalancing at one grid point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgePortfolioState {
    /// Step index `i`.
    pub step: usize,
    /// Time `t_i`.
    pub time: f64,
    /// Observed price `S_i`.
    pub spot: f64,
    /// Running geometric average `G_i`.
    pub geometric_average: f64,
    /// Shares held `Δ_i`.
    pub delta: f64,
    /// Bond balance `B_i`.
    pub bond: f64,
    /// Mark-to-market value `V_i = Δ_i·S_i + B_i`.
    pub value: f64,
}

/// Full record of one hedged path.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeOutcome {
    /// States for `i = 0..=N`.
    pub states: Vec<HedgePortfolioState>,
    /// Premium received at inception.
    pub premium: f64,
    /// Portfolio value at maturity.
    pub terminal_value: f64,
    /// Option payoff paid at maturity.
    pub payoff: f64,
    /// `terminal_value - payoff`.
    pub pnl: f64,
    /// P&L discounted to inception.
    pub discounted_pnl: f64,
    rate: f64,
    dt: f64,
}

impl HedgeOutcome {
    /// Largest deviation of the recorded bond balances from the
    /// self-financing recurrence.
    ///
    /// Rebuilds every `B_i` from the premium, the recorded deltas and
    /// prices, and the risk-free accrual alone; any other cash flow shows
    /// up as a non-zero residual.
    pub fn self_financing_residual(&self) -> f64 {
        let growth = (self.rate * self.dt).exp();
        let mut prev: Option<&HedgePortfolioState> = None;
        let mut worst = 0.0_f64;
        for state in &self.states {
            let expected = match prev {
                None => self.premium - state.delta * state.spot,
                Some(p) => p.bond * growth - (state.delta - p.delta) * state.spot,
            };
            worst = worst.max((state.bond - expected).abs());
            prev = Some(state);
        }
        worst
    }
}

/// P&L distribution of a hedged batch.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeReport {
    /// Strategy used.
    pub strategy: HedgingStrategy,
    /// Premium received on the first path.
    pub premium: f64,
    /// Per-path P&L at maturity, in path order.
    pub pnl: Vec<f64>,
    /// Per-path P&L discounted to inception.
    pub discounted_pnl: Vec<f64>,
    stats: SampleStatistics,
}

impl HedgeReport {
    /// Number of hedged paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.pnl.len()
    }

    /// Mean discounted P&L.
    #[inline]
    pub fn mean(&self) -> f64 {
        self.stats.mean()
    }

    /// Sample standard deviation of the discounted P&L.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.stats.std_dev()
    }

    /// Standard error of the mean discounted P&L.
    #[inline]
    pub fn std_error(&self) -> f64 {
        self.stats.std_error()
    }

    /// Mean absolute discounted P&L.
    pub fn mean_abs(&self) -> f64 {
        if self.discounted_pnl.is_empty() {
            return 0.0;
        }
        self.discounted_pnl.iter().map(|p| p.abs()).sum::<f64>() / self.discounted_pnl.len() as f64
    }
}

/// Terminal figures of one path.
struct PathResult {
    premium: f64,
    terminal_value: f64,
    payoff: f64,
}

/// Simulates a self-financing hedge of one contract under one strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelfFinancingHedger {
    contract: HedgeContract,
    strategy: HedgingStrategy,
    premium: Option<f64>,
}

impl SelfFinancingHedger {
    /// Creates a hedger that charges the closed-form premium at each
    /// path's initial price.
    pub fn new(contract: HedgeContract, strategy: HedgingStrategy) -> PricingResult<Self> {
        contract.validate()?;
        Ok(Self {
            contract,
            strategy,
            premium: None,
        })
    }

    /// Charges a fixed premium instead of the closed form.
    pub fn with_premium(mut self, premium: f64) -> PricingResult<Self> {
        self.premium = Some(ensure_finite("premium", premium)?);
        Ok(self)
    }

    /// Contract being hedged.
    #[inline]
    pub fn contract(&self) -> &HedgeContract {
        &self.contract
    }

    /// Strategy in use.
    #[inline]
    pub fn strategy(&self) -> HedgingStrategy {
        self.strategy
    }

    /// Premium received when the path starts at `spot`.
    pub fn premium_at(&self, spot: f64) -> PricingResult<f64> {
        match self.premium {
            Some(premium) => Ok(premium),
            None => self.contract.closed_form_premium(spot),
        }
    }

    fn check_grid(&self, grid: &TimeGrid) -> PricingResult<()> {
        if grid.matches_maturity(self.contract.maturity) {
            Ok(())
        } else {
            Err(PricingError::invalid_parameter(
                "maturity",
                format!(
                    "contract maturity {} does not match grid maturity {}",
                    self.contract.maturity,
                    grid.maturity()
                ),
            ))
        }
    }

    /// Hedges one path, keeping every portfolio state.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the path length or the grid maturity does not
    /// match the contract; `NumericDegeneracy` on degenerate prices.
    pub fn hedge_path(&self, path: &PricePath<'_>, grid: &TimeGrid) -> PricingResult<HedgeOutcome> {
        self.check_grid(grid)?;
        let mut states = Vec::with_capacity(grid.n_points());
        let result = self.simulate(path, grid, |state| states.push(state))?;

        let pnl = result.terminal_value - result.payoff;
        Ok(HedgeOutcome {
            states,
            premium: result.premium,
            terminal_value: result.terminal_value,
            payoff: result.payoff,
            pnl,
            discounted_pnl: pnl * self.discount_factor(),
            rate: self.contract.rate,
            dt: grid.dt(),
        })
    }

    /// Hedges every path of a batch in parallel, keeping only the P&L.
    pub fn hedge_batch(&self, batch: &PathBatch) -> PricingResult<HedgeReport> {
        let grid = batch.grid();
        self.check_grid(grid)?;
        let discount = self.discount_factor();

        let pnl: Vec<f64> = batch
            .par_paths()
            .map(|path| {
                self.simulate(&path, grid, |_| {})
                    .map(|r| r.terminal_value - r.payoff)
            })
            .collect::<PricingResult<_>>()?;
        let discounted_pnl: Vec<f64> = pnl.iter().map(|p| p * discount).collect();
        let stats = SampleStatistics::from_slice(&discounted_pnl);
        let premium = match batch.path(0) {
            Some(first) => self.premium_at(first.spot())?,
            None => 0.0,
        };

        debug!(
            n_paths = pnl.len(),
            strategy = %self.strategy,
            payoff = %self.contract.payoff,
            premium,
            mean_pnl = stats.mean(),
            std_pnl = stats.std_dev(),
            "hedged path batch"
        );

        Ok(HedgeReport {
            strategy: self.strategy,
            premium,
            pnl,
            discounted_pnl,
            stats,
        })
    }

    #[inline]
    fn discount_factor(&self) -> f64 {
        (-self.contract.rate * self.contract.maturity).exp()
    }

    /// Runs the bond recurrence along `path`, passing each state to `record`.
    fn simulate<F>(&self, path: &PricePath<'_>, grid: &TimeGrid, mut record: F) -> PricingResult<PathResult>
    where
        F: FnMut(HedgePortfolioState),
    {
        if path.n_steps() != grid.n_steps() {
            return Err(PricingError::invalid_parameter(
                "path",
                format!(
                    "path has {} steps, grid has {}",
                    path.n_steps(),
                    grid.n_steps()
                ),
            ));
        }

        let premium = self.premium_at(path.spot())?;
        let growth = (self.contract.rate * grid.dt()).exp();
        let mut observer: PathObserver<f64> = PathObserver::new();
        let mut delta_prev = 0.0;
        let mut bond = premium;
        let mut value = premium;

        for (step, &spot) in path.prices().iter().enumerate() {
            observer.observe(spot)?;
            if step > 0 {
                bond *= growth;
            }
            let obs = StepObservation {
                step,
                n_steps: grid.n_steps(),
                time: grid.time(step),
                remaining: grid.remaining(step),
                spot,
                geometric_average: observer.geometric_average(),
            };
            let delta = self.strategy.compute_delta(&self.contract, &obs)?;
            bond -= (delta - delta_prev) * spot;
            value = delta * spot + bond;
            record(HedgePortfolioState {
                step,
                time: obs.time,
                spot,
                geometric_average: obs.geometric_average,
                delta,
                bond,
                value,
            });
            delta_prev = delta;
        }

        let reference = match self.contract.payoff {
            HedgedPayoff::Asian(average_type) => observer.average(average_type),
            HedgedPayoff::European => path.terminal(),
        };
        let payoff = self.contract.option_type.payoff(reference, self.contract.strike);

        if !value.is_finite() {
            return Err(PricingError::numeric_degeneracy(format!(
                "terminal portfolio value is {}",
                value
            )));
        }

        Ok(PathResult {
            premium,
            terminal_value: value,
            payoff,
        })
    }
}
