//! Streaming statistics for path-dependent payoffs.
//!
//! The Monte Carlo pricer, the hedger and the backtest all compute averages
//! through [`PathObserver`], so they share one fixing convention: every
//! observed price counts, including the initial price `S_0`.

mod observer;

pub use observer::PathObserver;

use asian_core::types::{AverageType, PricingResult};

use crate::paths::PricePath;

/// Average of a whole path under the given rule.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::AverageType;
/// use asian_pricing::path_dependent::path_average;
/// use asian_pricing::paths::PricePath;
///
/// let prices = [1.0, 2.0, 4.0];
/// let path = PricePath::new(&prices).unwrap();
///
/// assert!((path_average(&path, AverageType::Arithmetic).unwrap() - 7.0 / 3.0).abs() < 1e-12);
/// assert!((path_average(&path, AverageType::Geometric).unwrap() - 2.0).abs() < 1e-12);
/// ```
pub fn path_average(path: &PricePath<'_>, average_type: AverageType) -> PricingResult<f64> {
    let mut observer = PathObserver::new();
    for &price in path.prices() {
        observer.observe(price)?;
    }
    Ok(observer.average(average_type))
}
