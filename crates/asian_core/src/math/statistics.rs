//! Sample statistics for Monte Carlo estimators and historical series.
//!
//! [`SampleStatistics`] accumulates a running mean and sum of squared
//! deviations (Welford). Two accumulators merge exactly (Chan et al.), so
//! partial results from parallel workers can be combined in any order.

use crate::types::error::{PricingError, PricingResult};

/// Trailing window, in returns, for realised volatility estimates.
pub const REALIZED_VOL_WINDOW: usize = 21;

/// Observation periods per year for daily series.
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Running count, mean and second central moment.
///
/// # Examples
///
/// ```rust
/// use asian_core::math::statistics::SampleStatistics;
///
/// let mut left = SampleStatistics::from_slice(&[1.0, 2.0]);
/// let right = SampleStatistics::from_slice(&[3.0, 4.0]);
/// left.merge(&right);
///
/// assert_eq!(left.count(), 4);
/// assert!((left.mean() - 2.5).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SampleStatistics {
    count: usize,
    mean: f64,
    m2: f64,
}

impl SampleStatistics {
    /// Creates an empty accumulator.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an accumulator over a slice.
    pub fn from_slice(values: &[f64]) -> Self {
        values.iter().copied().collect()
    }

    /// Adds one observation.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    /// Folds another accumulator into this one.
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
    }

    /// Consuming variant of [`merge`](Self::merge) for use as a reducer.
    #[inline]
    pub fn merged(mut self, other: Self) -> Self {
        self.merge(&other);
        self
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample mean (zero when empty).
    #[inline]
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Unbiased sample variance (n - 1 denominator); zero below two samples.
    #[inline]
    pub fn variance(&self) -> f64 {
        if self.count < 2 {
            0.0
        } else {
            self.m2 / (self.count - 1) as f64
        }
    }

    /// Sample standard deviation.
    #[inline]
    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }

    /// Standard error of the mean: `std_dev / sqrt(n)`.
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.std_dev() / (self.count as f64).sqrt()
        }
    }
}

impl FromIterator<f64> for SampleStatistics {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut stats = Self::new();
        for value in iter {
            stats.push(value);
        }
        stats
    }
}

impl Extend<f64> for SampleStatistics {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

/// Log returns `ln(p_{i+1} / p_i)` of a price series.
///
/// # Errors
///
/// `NumericDegeneracy` if any price is non-positive or not finite.
pub fn log_returns(prices: &[f64]) -> PricingResult<Vec<f64>> {
    if let Some((idx, &bad)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(PricingError::numeric_degeneracy(format!(
            "log of non-positive price {} at index {}",
            bad, idx
        )));
    }
    Ok(prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect())
}

/// Annualised realised volatility of a price series.
///
/// Sample standard deviation of the log returns scaled by
/// `sqrt(periods_per_year)`.
///
/// # Errors
///
/// - `InvalidParameter` with fewer than three prices (two returns) or a
///   non-positive `periods_per_year`
/// - `NumericDegeneracy` on non-positive prices or a flat series
///
/// # Examples
///
/// ```rust
/// use asian_core::math::statistics::{realized_volatility, TRADING_DAYS_PER_YEAR};
///
/// let prices = [100.0, 101.0, 99.5, 100.5, 102.0];
/// let vol = realized_volatility(&prices, TRADING_DAYS_PER_YEAR).unwrap();
/// assert!(vol > 0.0);
/// ```
pub fn realized_volatility(prices: &[f64], periods_per_year: f64) -> PricingResult<f64> {
    if prices.len() < 3 {
        return Err(PricingError::invalid_parameter(
            "prices",
            format!("need at least 3 prices, got {}", prices.len()),
        ));
    }
    crate::types::error::ensure_positive("periods_per_year", periods_per_year)?;

    let stats: SampleStatistics = log_returns(prices)?.into_iter().collect();
    let vol = stats.std_dev() * periods_per_year.sqrt();
    if vol > 0.0 && vol.is_finite() {
        Ok(vol)
    } else {
        Err(PricingError::numeric_degeneracy(format!(
            "realised volatility is {} over {} prices",
            vol,
            prices.len()
        )))
    }
}
