//! Convergence diagnostics for the Monte Carlo estimator.
//!
//! Prices one market over an increasing ladder of path counts, generating a
//! fresh batch at every rung, and records `std_error · √M`. For a healthy
//! estimator that product is roughly constant (the payoff's standard
//! deviation) while the standard error itself decreases monotonically.

use asian_core::types::{MarketParameters, PricingError, PricingResult};
use tracing::debug;

use super::pricer::AsianMonteCarloPricer;
use crate::paths::{generate_gbm_paths, SimulationConfig};
use crate::rng::{derive_stream_seed, PricerRng};

/// Path counts from 10 to 1,000,000 in decades.
pub const DEFAULT_PATH_LADDER: [usize; 6] = [10, 100, 1_000, 10_000, 100_000, 1_000_000];

/// One rung of a convergence study.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergencePoint {
    /// Number of paths `M`.
    pub n_paths: usize,
    /// Price estimate.
    pub price: f64,
    /// Standard error of the estimate.
    pub std_error: f64,
    /// `std_error · √M`, an estimate of the payoff standard deviation.
    pub scaled_error: f64,
}

/// Result of a convergence study, ordered by increasing path count.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvergenceReport {
    /// Base seed of the study; rung `l` was simulated with
    /// `derive_stream_seed(seed, l)`.
    pub seed: u64,
    /// Rungs in ladder order.
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceReport {
    /// `true` when the standard error strictly decreases along the ladder.
    pub fn is_error_monotone(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].std_error < w[0].std_error)
    }

    /// Ratio of the largest to the smallest `std_error · √M`.
    ///
    /// Close to 1 when the error decays as `1/√M`; infinite if any rung has
    /// a zero standard error.
    pub fn scaling_spread(&self) -> f64 {
        let (min, max) = self
            .points
            .iter()
            .map(|p| p.scaled_error)
            .fold((f64::INFINITY, 0.0_f64), |(lo, hi), x| (lo.min(x), hi.max(x)));
        if self.points.is_empty() {
            1.0
        } else if min > 0.0 {
            max / min
        } else {
            f64::INFINITY
        }
    }

    /// The rung with the most paths.
    pub fn last(&self) -> Option<&ConvergencePoint> {
        self.points.last()
    }
}

/// Convergence study over one market and grid.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::{MarketParameters, OptionType};
/// use asian_pricing::mc::{AsianMonteCarloPricer, ConvergenceStudy};
///
/// let market = MarketParameters::new(100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let pricer = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call);
///
/// let report = ConvergenceStudy::new(market, 12)
///     .with_seed(Some(3))
///     .run(&pricer, &[100, 1_000, 10_000])
///     .unwrap();
///
/// assert_eq!(report.points.len(), 3);
/// assert!(report.is_error_monotone());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ConvergenceStudy {
    market: MarketParameters,
    n_steps: usize,
    seed: Option<u64>,
}

impl ConvergenceStudy {
    /// Creates an unseeded study; [`run`](Self::run) draws and records a
    /// base seed.
    pub fn new(market: MarketParameters, n_steps: usize) -> Self {
        Self {
            market,
            n_steps,
            seed: None,
        }
    }

    /// Sets the base seed; rung `l` uses a seed derived from `(seed, l)`.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Prices the market at each path count in `path_counts`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the ladder is empty or not strictly increasing,
    /// plus any error from path generation or pricing.
    pub fn run(
        &self,
        pricer: &AsianMonteCarloPricer,
        path_counts: &[usize],
    ) -> PricingResult<ConvergenceReport> {
        if path_counts.is_empty() {
            return Err(PricingError::invalid_parameter(
                "path_counts",
                "ladder must not be empty",
            ));
        }
        if path_counts.windows(2).any(|w| w[1] <= w[0]) {
            return Err(PricingError::invalid_parameter(
                "path_counts",
                format!("ladder must be strictly increasing, got {:?}", path_counts),
            ));
        }

        let seed = self
            .seed
            .unwrap_or_else(|| PricerRng::from_entropy().seed());
        let mut points = Vec::with_capacity(path_counts.len());
        for (level, &n_paths) in path_counts.iter().enumerate() {
            let config = SimulationConfig::builder()
                .n_paths(n_paths)
                .n_steps(self.n_steps)
                .seed(derive_stream_seed(seed, level as u64))
                .build()?;
            let batch = generate_gbm_paths(&self.market, &config)?;
            let quote = pricer.price(&batch)?;
            let point = ConvergencePoint {
                n_paths,
                price: quote.price,
                std_error: quote.std_error,
                scaled_error: quote.std_error * (n_paths as f64).sqrt(),
            };
            debug!(
                n_paths,
                price = point.price,
                std_error = point.std_error,
                "convergence rung"
            );
            points.push(point);
        }

        Ok(ConvergenceReport { seed, points })
    }
}
