//! Black-Scholes model for European options.
//!
//! The European option is the limiting case of an Asian option whose only
//! fixing is the terminal price. It is used to benchmark the Asian prices
//! and to hedge European payoffs with the same simulator.
//!
//! ```text
//! d1 = (ln(S/K) + (r + σ²/2)·t) / (σ√t)
//! d2 = d1 - σ√t
//! C  = S·Φ(d1) - K·e^{-rt}·Φ(d2)
//! P  = K·e^{-rt}·Φ(-d2) - S·Φ(-d1)
//! ```

use asian_core::math::distributions::norm_cdf;
use asian_core::types::error::{ensure_finite, ensure_positive};
use asian_core::types::{OptionType, PricingResult};

use super::{ensure_finite_output, validate_inputs};

/// Black-Scholes model for a fixed spot, rate and volatility.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::OptionType;
/// use asian_pricing::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price(100.0, 1.0, OptionType::Call).unwrap();
/// assert!((call - 10.4506).abs() < 1e-3);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a model; spot and volatility must be positive, rate finite.
    pub fn new(spot: f64, rate: f64, volatility: f64) -> PricingResult<Self> {
        ensure_positive("spot", spot)?;
        ensure_finite("rate", rate)?;
        ensure_positive("volatility", volatility)?;
        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    fn d1_d2(&self, strike: f64, expiry: f64) -> PricingResult<(f64, f64)> {
        validate_inputs(self.spot, strike, self.rate, self.volatility, expiry)?;
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let d1 = ((self.spot / strike).ln()
            + (self.rate + 0.5 * self.volatility * self.volatility) * expiry)
            / vol_sqrt_t;
        Ok((d1, d1 - vol_sqrt_t))
    }

    /// Option price for `strike` and `expiry`.
    pub fn price(&self, strike: f64, expiry: f64, option_type: OptionType) -> PricingResult<f64> {
        let (d1, d2) = self.d1_d2(strike, expiry)?;
        let df = (-self.rate * expiry).exp();
        let price = match option_type {
            OptionType::Call => self.spot * norm_cdf(d1) - strike * df * norm_cdf(d2),
            OptionType::Put => strike * df * norm_cdf(-d2) - self.spot * norm_cdf(-d1),
        };
        ensure_finite_output("Black-Scholes price", price)
    }

    /// Option delta: `Φ(d1)` for calls, `Φ(d1) - 1` for puts.
    pub fn delta(&self, strike: f64, expiry: f64, option_type: OptionType) -> PricingResult<f64> {
        let (d1, _) = self.d1_d2(strike, expiry)?;
        Ok(match option_type {
            OptionType::Call => norm_cdf(d1),
            OptionType::Put => norm_cdf(d1) - 1.0,
        })
    }
}

/// European option price.
#[inline]
pub fn bs_price(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    BlackScholes::new(spot, rate, volatility)?.price(strike, maturity, option_type)
}

/// European option delta.
#[inline]
pub fn bs_delta(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    maturity: f64,
    option_type: OptionType,
) -> PricingResult<f64> {
    BlackScholes::new(spot, rate, volatility)?.delta(strike, maturity, option_type)
}
