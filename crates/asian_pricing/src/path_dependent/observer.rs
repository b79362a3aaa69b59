//! PathObserver: streaming averages along a price path.
//!
//! Statistics are accumulated incrementally as prices are observed, in
//! O(1) per step, without storing the path:
//!
//! - **Arithmetic average**: running sum / count
//! - **Geometric average**: exp(running log sum / count)

use asian_core::types::{AverageType, PricingError, PricingResult};
use num_traits::Float;

/// Streaming path statistics.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::path_dependent::PathObserver;
///
/// let mut observer: PathObserver<f64> = PathObserver::new();
/// for price in [100.0, 110.0, 121.0] {
///     observer.observe(price).unwrap();
/// }
///
/// assert!((observer.arithmetic_average() - 110.333_333_333).abs() < 1e-6);
/// assert!((observer.geometric_average() - 110.0).abs() < 1e-9);
/// assert_eq!(observer.count(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct PathObserver<T: Float> {
    running_sum: T,
    running_log_sum: T,
    /// Count as `T`, kept alongside `count` to avoid a fallible cast.
    n: T,
    count: usize,
}

impl<T: Float> PathObserver<T> {
    /// Creates an observer with no observations.
    #[inline]
    pub fn new() -> Self {
        Self {
            running_sum: T::zero(),
            running_log_sum: T::zero(),
            n: T::zero(),
            count: 0,
        }
    }

    /// Records one price.
    ///
    /// # Errors
    ///
    /// `NumericDegeneracy` if `price` is non-positive or not finite; the
    /// observer is left unchanged.
    #[inline]
    pub fn observe(&mut self, price: T) -> PricingResult<()> {
        if !(price.is_finite() && price > T::zero()) {
            return Err(PricingError::numeric_degeneracy(format!(
                "cannot observe price {:?} after {} fixings",
                price.to_f64(),
                self.count
            )));
        }
        self.running_sum = self.running_sum + price;
        self.running_log_sum = self.running_log_sum + price.ln();
        self.n = self.n + T::one();
        self.count += 1;
        Ok(())
    }

    /// Arithmetic mean of the observed prices (zero when empty).
    #[inline]
    pub fn arithmetic_average(&self) -> T {
        if self.count == 0 {
            T::zero()
        } else {
            self.running_sum / self.n
        }
    }

    /// Geometric mean of the observed prices (zero when empty).
    #[inline]
    pub fn geometric_average(&self) -> T {
        if self.count == 0 {
            T::zero()
        } else {
            (self.running_log_sum / self.n).exp()
        }
    }

    /// Average under the given rule.
    #[inline]
    pub fn average(&self, average_type: AverageType) -> T {
        match average_type {
            AverageType::Arithmetic => self.arithmetic_average(),
            AverageType::Geometric => self.geometric_average(),
        }
    }

    /// Number of observations.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T: Float> Default for PathObserver<T> {
    fn default() -> Self {
        Self::new()
    }
}
