//! Geometric Brownian motion path generation.
//!
//! Exact log-space discretisation:
//!
//! ```text
//! S_{i+1} = S_i · exp((μ - σ²/2)·dt + σ·√dt·Z_i),   Z_i ~ N(0, 1)
//! ```
//!
//! Each path draws from its own RNG stream, so a seeded batch is identical
//! regardless of how rayon schedules the rows.

use asian_core::types::error::{PricingError, PricingResult};
use asian_core::types::MarketParameters;
use rayon::prelude::*;
use tracing::debug;

use super::batch::PathBatch;
use super::config::SimulationConfig;
use super::grid::TimeGrid;
use crate::rng::PricerRng;

/// Simulates one path into `out` (`grid.n_points()` slots).
///
/// `out[0]` is set to the spot; the remaining slots are overwritten.
pub fn simulate_gbm_path(
    market: &MarketParameters,
    grid: &TimeGrid,
    rng: &mut PricerRng,
    out: &mut [f64],
) {
    debug_assert_eq!(out.len(), grid.n_points());

    let dt = grid.dt();
    let drift_dt = (market.drift - 0.5 * market.volatility * market.volatility) * dt;
    let vol_sqrt_dt = market.volatility * dt.sqrt();

    // Accumulate in log space; S_i = S_0 · exp(Σ increments).
    let mut ln_s = market.spot.ln();
    out[0] = market.spot;
    for slot in out.iter_mut().skip(1) {
        ln_s += drift_dt + vol_sqrt_dt * rng.gen_normal();
        *slot = ln_s.exp();
    }
}

/// Generates a batch of GBM paths.
///
/// With `config.seed()` set the batch is reproducible bit-for-bit;
/// otherwise a base seed is drawn from OS entropy and recorded on the
/// returned batch.
///
/// # Errors
///
/// - `InvalidParameter` for invalid market parameters or path/step counts
/// - `NumericDegeneracy` if a simulated price overflows or underflows
///
/// # Examples
///
/// ```rust
/// use asian_core::types::MarketParameters;
/// use asian_pricing::paths::{generate_gbm_paths, SimulationConfig};
///
/// let market = MarketParameters::new(100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
/// let config = SimulationConfig::builder().n_paths(100).n_steps(12).seed(1).build().unwrap();
///
/// let batch = generate_gbm_paths(&market, &config).unwrap();
/// assert_eq!(batch.n_paths(), 100);
/// assert!(batch.paths().all(|p| p.spot() == 100.0));
/// assert_eq!(batch, generate_gbm_paths(&market, &config).unwrap());
/// ```
pub fn generate_gbm_paths(
    market: &MarketParameters,
    config: &SimulationConfig,
) -> PricingResult<PathBatch> {
    market.validate()?;
    config.validate()?;

    let grid = TimeGrid::new(market.maturity, config.n_steps())?;
    let base_seed = config
        .seed()
        .unwrap_or_else(|| PricerRng::from_entropy().seed());
    let n_points = grid.n_points();

    let mut data = vec![0.0; config.n_paths() * n_points];
    data.par_chunks_mut(n_points)
        .enumerate()
        .try_for_each(|(path_idx, row)| {
            let mut rng = PricerRng::for_path(base_seed, path_idx);
            simulate_gbm_path(market, &grid, &mut rng, row);
            match row.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
                Some(step) => Err(PricingError::numeric_degeneracy(format!(
                    "simulated price {} at path {} step {}",
                    row[step], path_idx, step
                ))),
                None => Ok(()),
            }
        })?;

    debug!(
        n_paths = config.n_paths(),
        n_steps = config.n_steps(),
        seed = base_seed,
        drift = market.drift,
        risk_neutral = market.is_risk_neutral(),
        "generated GBM path batch"
    );

    Ok(PathBatch::from_raw(grid, config.n_paths(), data, base_seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market() -> MarketParameters {
        MarketParameters::new(100.0, 100.0, 0.05, 0.2, 1.0).unwrap()
    }

    fn config(n_paths: usize, n_steps: usize, seed: Option<u64>) -> SimulationConfig {
        SimulationConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .maybe_seed(seed)
            .build()
            .unwrap()
    }

    #[test]
    fn test_seeded_batches_identical() {
        let a = generate_gbm_paths(&market(), &config(64, 16, Some(11))).unwrap();
        let b = generate_gbm_paths(&market(), &config(64, 16, Some(11))).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_eq!(a.seed(), Some(11));
    }

    #[test]
    fn test_unseeded_batch_records_seed() {
        let a = generate_gbm_paths(&market(), &config(8, 4, None)).unwrap();
        let seed = a.seed().unwrap();
        let replay = generate_gbm_paths(&market(), &config(8, 4, Some(seed))).unwrap();
        assert_eq!(a.as_slice(), replay.as_slice());
    }

    #[test]
    fn test_batch_shape() {
        let batch = generate_gbm_paths(&market(), &config(10, 5, Some(1))).unwrap();
        assert_eq!(batch.as_slice().len(), 10 * 6);
        assert_eq!(batch.n_steps(), 5);
        assert_relative_eq!(batch.grid().maturity(), 1.0);
        for path in batch.paths() {
            assert_eq!(path.spot(), 100.0);
            assert!(path.prices().iter().all(|s| *s > 0.0));
        }
    }

    #[test]
    fn test_prefix_stable_across_batch_sizes() {
        // Path i depends only on (seed, i).
        let small = generate_gbm_paths(&market(), &config(4, 8, Some(5))).unwrap();
        let large = generate_gbm_paths(&market(), &config(400, 8, Some(5))).unwrap();
        for i in 0..4 {
            assert_eq!(small.path(i), large.path(i));
        }
    }

    #[test]
    fn test_terminal_mean_matches_forward() {
        // E[S_T] = S_0 · e^{μT}
        let market = market().with_drift(0.1).unwrap();
        let batch = generate_gbm_paths(&market, &config(50_000, 4, Some(2024))).unwrap();
        let terminals: Vec<f64> = batch.paths().map(|p| p.terminal()).collect();
        let n = terminals.len() as f64;
        let mean = terminals.iter().sum::<f64>() / n;
        let sd = (terminals.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt();
        let expected = 100.0 * 0.1_f64.exp();
        assert!(
            (mean - expected).abs() < 4.0 * sd / n.sqrt(),
            "mean {} expected {}",
            mean,
            expected
        );
    }

    #[test]
    fn test_log_increment_variance() {
        let batch = generate_gbm_paths(&market(), &config(20_000, 1, Some(9))).unwrap();
        let logs: Vec<f64> = batch.paths().map(|p| (p.terminal() / p.spot()).ln()).collect();
        let n = logs.len() as f64;
        let mean = logs.iter().sum::<f64>() / n;
        let var = logs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        // σ²T = 0.04; drift (r - σ²/2)T = 0.03
        assert!((var - 0.04).abs() < 0.002, "var = {}", var);
        assert!((mean - 0.03).abs() < 0.006, "mean = {}", mean);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut bad = market();
        bad.spot = -5.0;
        assert!(generate_gbm_paths(&bad, &config(10, 10, Some(1)))
            .unwrap_err()
            .is_invalid_parameter());
    }
}
