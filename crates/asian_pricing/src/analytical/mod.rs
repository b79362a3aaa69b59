//! Closed-form prices and deltas.
//!
//! - [`geometric`]: Kemna-Vorst continuous geometric-average Asian options
//! - [`black_scholes`]: European options, the limiting case used for
//!   benchmarking and European hedging
//!
//! Both validate their inputs and return `InvalidParameter` rather than a
//! NaN or a clamped value.

pub mod black_scholes;
pub mod geometric;

pub use black_scholes::{bs_delta, bs_price, BlackScholes};
pub use geometric::{
    geometric_asian_delta, geometric_asian_details, geometric_asian_price, GeometricAsianDetails,
    GeometricPricer,
};

use asian_core::types::error::{ensure_finite, ensure_positive, PricingError, PricingResult};

/// Validates the common closed-form inputs.
pub(crate) fn validate_inputs(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
) -> PricingResult<()> {
    ensure_positive("spot", spot)?;
    ensure_positive("strike", strike)?;
    ensure_finite("rate", rate)?;
    ensure_positive("volatility", volatility)?;
    ensure_positive("maturity", maturity)?;
    Ok(())
}

/// Fails with `NumericDegeneracy` when a closed-form output is not finite.
pub(crate) fn ensure_finite_output(what: &str, value: f64) -> PricingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::numeric_degeneracy(format!(
            "{} evaluated to {}",
            what, value
        )))
    }
}
