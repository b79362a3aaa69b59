//! Error types for structured error handling.
//!
//! Every fallible operation in the workspace returns [`PricingError`].
//! Failures are immediate and local: inputs are never clamped and there is
//! no fallback between analytic and Monte Carlo methods.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `InvalidParameter`: Non-positive price, volatility or time inputs,
///   zero or out-of-range simulation counts, mismatched grids
/// - `NumericDegeneracy`: A computation met data it cannot process, such as
///   the logarithm of a non-positive price from a corrupted path
///
/// # Examples
/// ```
/// use asian_core::types::PricingError;
///
/// let err = PricingError::invalid_parameter("spot", "must be positive, got -5");
/// assert_eq!(
///     format!("{}", err),
///     "Invalid parameter 'spot': must be positive, got -5"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input parameter.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Description of the invalid value
        reason: String,
    },

    /// Numerical degeneracy in the supplied data or an intermediate result.
    #[error("Numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

impl PricingError {
    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Creates a `NumericDegeneracy` error.
    pub fn numeric_degeneracy(msg: impl Into<String>) -> Self {
        Self::NumericDegeneracy(msg.into())
    }

    /// Returns `true` for `InvalidParameter`.
    #[inline]
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::InvalidParameter { .. })
    }
}

/// Result alias used across the workspace.
pub type PricingResult<T> = Result<T, PricingError>;

/// Fails unless `value` is finite and strictly positive.
pub fn ensure_positive(name: &'static str, value: f64) -> PricingResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite and positive, got {}", value),
        ))
    }
}

/// Fails unless `value` is finite.
pub fn ensure_finite(name: &'static str, value: f64) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::invalid_parameter(
            name,
            format!("must be finite, got {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_display() {
        let err = PricingError::invalid_parameter("volatility", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'volatility': must be positive"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_numeric_degeneracy_display() {
        let err = PricingError::numeric_degeneracy("ln(-1.0) at step 3");
        assert_eq!(err.to_string(), "Numeric degeneracy: ln(-1.0) at step 3");
        assert!(!err.is_invalid_parameter());
    }

    #[test]
    fn test_ensure_positive() {
        assert_eq!(ensure_positive("spot", 100.0), Ok(100.0));
        assert!(ensure_positive("spot", 0.0).is_err());
        assert!(ensure_positive("spot", -5.0).is_err());
        assert!(ensure_positive("spot", f64::NAN).is_err());
        assert!(ensure_positive("spot", f64::INFINITY).is_err());
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite("rate", -0.01), Ok(-0.01));
        assert!(ensure_finite("rate", f64::NAN).is_err());
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = PricingError::numeric_degeneracy("overflow");
        let _: &dyn std::error::Error = &err;
    }
}
