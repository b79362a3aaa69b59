//! Standard normal distribution functions.
//!
//! The CDF is evaluated through `statrs`' complementary error function,
//! which keeps put-call parity of the closed-form prices at machine
//! precision and avoids cancellation in the far left tail.

use statrs::function::erf::erfc;

/// Standard normal cumulative distribution function.
///
/// # Mathematical Definition
/// Φ(x) = (1/2) * erfc(-x / sqrt(2))
///
/// # Examples
/// ```
/// use asian_core::math::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
/// assert!((norm_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
#[inline]
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / std::f64::consts::SQRT_2)
}
