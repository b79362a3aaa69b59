//! Geometric average Asian option analytical pricing.
//!
//! Kemna-Vorst (1990) closed form for continuously monitored geometric
//! average Asian options. The geometric average of log-normal prices is
//! log-normal, so the price is a Black-Scholes formula with an adjusted
//! carry and volatility:
//!
//! ```text
//! b  = ½(r - σ²/6)
//! d1 = √3 · (ln(S/K) + (b + σ²/6)·t) / (σ√t)
//! d2 = d1 - σ√t/√3
//!
//! C  = S·e^{(b-r)t}·Φ(d1) - K·e^{-rt}·Φ(d2)
//! P  = K·e^{-rt}·Φ(-d2) - S·e^{(b-r)t}·Φ(-d1)
//!
//! Δ_call = e^{(b-r)t}·Φ(d1)
//! Δ_put  = Δ_call - e^{(b-r)t}
//! ```
//!
//! # References
//!
//! - Kemna, A.G.Z. and Vorst, A.C.F. (1990). "A Pricing Method for Options
//!   Based on Average Asset Values." Journal of Banking and Finance, 14, 113-129.

use asian_core::math::distributions::norm_cdf;
use asian_core::types::{AverageType, MarketParameters, OptionQuote, OptionType, PricingResult};

use super::{ensure_finite_output, validate_inputs};

/// Closed-form outputs of one geometric Asian evaluation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometricAsianDetails {
    /// Present value.
    pub price: f64,
    /// Sensitivity to the spot price.
    pub delta: f64,
    /// Adjusted cost of carry `b`.
    pub carry: f64,
    /// `d1` term.
    pub d1: f64,
    /// `d2` term.
    pub d2: f64,
}

/// Price, delta and intermediate terms of a geometric Asian option.
///
/// # Errors
///
/// `InvalidParameter` for non-positive spot, strike, volatility or maturity,
/// or a non-finite rate. `NumericDegeneracy` if the result overflows.
pub fn geometric_asian_details(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> PricingResult<GeometricAsianDetails> {
    validate_inputs(spot, strike, rate, volatility, maturity)?;

    let sqrt_3 = 3.0_f64.sqrt();
    let vol_sq = volatility * volatility;
    let sqrt_t = maturity.sqrt();

    let carry = 0.5 * (rate - vol_sq / 6.0);
    let d1 = sqrt_3 * ((spot / strike).ln() + (carry + vol_sq / 6.0) * maturity)
        / (volatility * sqrt_t);
    let d2 = d1 - volatility * sqrt_t / sqrt_3;

    let carry_df = ((carry - rate) * maturity).exp();
    let df = (-rate * maturity).exp();

    let (price, delta) = match option_type {
        OptionType::Call => (
            spot * carry_df * norm_cdf(d1) - strike * df * norm_cdf(d2),
            carry_df * norm_cdf(d1),
        ),
        OptionType::Put => (
            strike * df * norm_cdf(-d2) - spot * carry_df * norm_cdf(-d1),
            carry_df * norm_cdf(d1) - carry_df,
        ),
    };

    Ok(GeometricAsianDetails {
        price: ensure_finite_output("geometric Asian price", price)?,
        delta: ensure_finite_output("geometric Asian delta", delta)?,
        carry,
        d1,
        d2,
    })
}

/// Geometric Asian option price.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::OptionType;
/// use asian_pricing::analytical::geometric_asian_price;
///
/// let call = geometric_asian_price(100.0, 100.0, 0.0425, 0.43, 1.0, OptionType::Call).unwrap();
/// assert!((call - 9.78).abs() < 0.01);
///
/// assert!(geometric_asian_price(100.0, 100.0, 0.0425, 0.43, 0.0, OptionType::Call).is_err());
/// ```
#[inline]
pub fn geometric_asian_price(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    geometric_asian_details(spot, strike, rate, volatility, maturity, option_type)
        .map(|d| d.price)
}

/// Geometric Asian option delta.
#[inline]
pub fn geometric_asian_delta(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    geometric_asian_details(spot, strike, rate, volatility, maturity, option_type)
        .map(|d| d.delta)
}

/// Closed-form pricer over [`MarketParameters`].
#[derive(Clone, Copy, Debug, Default)]
pub struct GeometricPricer;

impl GeometricPricer {
    /// Closed-form quote for the geometric Asian option on `market`.
    pub fn quote(market: &MarketParameters, option_type: OptionType) -> PricingResult<OptionQuote> {
        let price = geometric_asian_price(
            market.spot,
            market.strike,
            market.rate,
            market.volatility,
            market.maturity,
            option_type,
        )?;
        Ok(OptionQuote::closed_form(
            price,
            option_type,
            Some(AverageType::Geometric),
        ))
    }

    /// Closed-form delta at inception.
    pub fn delta(market: &MarketParameters, option_type: OptionType) -> PricingResult<f64> {
        geometric_asian_delta(
            market.spot,
            market.strike,
            market.rate,
            market.volatility,
            market.maturity,
            option_type,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ========================================
    // Reference values
    // ========================================

    #[test]
    fn test_reference_scenario_call() {
        let d = geometric_asian_details(100.0, 100.0, 0.0425, 0.43, 1.0, OptionType::Call)
            .unwrap();
        assert_relative_eq!(d.carry, 0.5 * (0.0425 - 0.43 * 0.43 / 6.0), epsilon = 1e-15);
        assert_relative_eq!(d.d1, 0.147_660_688, epsilon = 1e-8);
        assert_relative_eq!(d.d2, -0.100_599_928, epsilon = 1e-8);
        assert_relative_eq!(d.price, 9.778_836_838, epsilon = 1e-8);
        assert_relative_eq!(d.delta, 0.538_584_755, epsilon = 1e-8);
    }

    #[test]
    fn test_d2_spacing() {
        let d = geometric_asian_details(90.0, 100.0, 0.03, 0.25, 2.0, OptionType::Put).unwrap();
        assert_relative_eq!(d.d1 - d.d2, 0.25 * 2.0_f64.sqrt() / 3.0_f64.sqrt(), epsilon = 1e-14);
    }

    // ========================================
    // Parity and bounds
    // ========================================

    #[test]
    fn test_put_call_parity() {
        let (s, k, r, v, t) = (105.0, 100.0, 0.05, 0.3, 0.75);
        let call = geometric_asian_price(s, k, r, v, t, OptionType::Call).unwrap();
        let put = geometric_asian_price(s, k, r, v, t, OptionType::Put).unwrap();
        let b = 0.5 * (r - v * v / 6.0);
        let forward = s * ((b - r) * t).exp() - k * (-r * t).exp();
        assert_relative_eq!(call - put, forward, max_relative = 1e-8, epsilon = 1e-10);
    }

    #[test]
    fn test_delta_parity() {
        let (s, k, r, v, t) = (100.0, 110.0, 0.02, 0.5, 1.5);
        let dc = geometric_asian_delta(s, k, r, v, t, OptionType::Call).unwrap();
        let dp = geometric_asian_delta(s, k, r, v, t, OptionType::Put).unwrap();
        let b = 0.5 * (r - v * v / 6.0);
        assert_relative_eq!(dc - dp, ((b - r) * t).exp(), epsilon = 1e-14);
        assert!(dc > 0.0 && dc < 1.0);
        assert!(dp < 0.0);
    }

    #[test]
    fn test_delta_matches_finite_difference() {
        let (k, r, v, t) = (100.0, 0.045, 0.4, 1.0);
        let h = 1e-4;
        for option_type in [OptionType::Call, OptionType::Put] {
            let up = geometric_asian_price(100.0 + h, k, r, v, t, option_type).unwrap();
            let down = geometric_asian_price(100.0 - h, k, r, v, t, option_type).unwrap();
            let delta = geometric_asian_delta(100.0, k, r, v, t, option_type).unwrap();
            assert_relative_eq!(delta, (up - down) / (2.0 * h), epsilon = 1e-6);
        }
    }

    #[test]
    fn test_below_european() {
        // Averaging lowers the volatility of the underlying quantity.
        let asian = geometric_asian_price(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
        let european =
            super::super::bs_price(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap();
        assert!(asian < european);
    }

    #[test]
    fn test_deep_itm_and_otm() {
        let otm = geometric_asian_price(50.0, 200.0, 0.05, 0.2, 0.5, OptionType::Call).unwrap();
        assert!(otm >= 0.0 && otm < 1e-10);
        let itm = geometric_asian_price(50.0, 200.0, 0.05, 0.2, 0.5, OptionType::Put).unwrap();
        assert!(itm > 140.0);
    }

    // ========================================
    // Validation
    // ========================================

    #[test]
    fn test_invalid_inputs() {
        let call = OptionType::Call;
        assert!(geometric_asian_price(-5.0, 100.0, 0.05, 0.2, 1.0, call)
            .unwrap_err()
            .is_invalid_parameter());
        assert!(geometric_asian_price(100.0, 0.0, 0.05, 0.2, 1.0, call).is_err());
        assert!(geometric_asian_price(100.0, 100.0, 0.05, 0.0, 1.0, call).is_err());
        assert!(geometric_asian_price(100.0, 100.0, 0.05, 0.2, 0.0, call).is_err());
        assert!(geometric_asian_price(100.0, 100.0, f64::NAN, 0.2, 1.0, call).is_err());
    }

    #[test]
    fn test_quote() {
        let market = MarketParameters::new(100.0, 100.0, 0.0425, 0.43, 1.0).unwrap();
        let quote = GeometricPricer::quote(&market, OptionType::Call).unwrap();
        assert_eq!(quote.std_error, 0.0);
        assert_eq!(quote.average_type, Some(AverageType::Geometric));
        assert!((quote.price - 9.78).abs() < 0.01);
        assert!(GeometricPricer::delta(&market, OptionType::Call).unwrap() > 0.5);
    }
}
