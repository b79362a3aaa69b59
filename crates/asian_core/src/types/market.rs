//! Market parameters for a single pricing or hedging run.

use super::error::{ensure_finite, ensure_positive, PricingResult};

/// Market and contract parameters shared by the pricers and the hedger.
///
/// Immutable for the duration of a run. Construction validates every
/// field, so a `MarketParameters` value in hand is always usable.
///
/// # Drift
///
/// `drift` (μ) is the real-world drift used for path simulation. Under
/// risk-neutral pricing it equals `rate`, which is what [`new`](Self::new)
/// sets; use [`with_drift`](Self::with_drift) for real-world scenarios.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::MarketParameters;
///
/// let market = MarketParameters::new(100.0, 100.0, 0.045, 0.40, 1.0).unwrap();
/// assert_eq!(market.drift, 0.045);
///
/// let real_world = market.with_drift(0.12).unwrap();
/// assert!(!real_world.is_risk_neutral());
///
/// assert!(MarketParameters::new(-5.0, 100.0, 0.045, 0.40, 1.0).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    /// Spot price (S₀), strictly positive.
    pub spot: f64,
    /// Strike price (K), strictly positive.
    pub strike: f64,
    /// Risk-free rate (r), annualised, continuously compounded.
    pub rate: f64,
    /// Volatility (σ), annualised, strictly positive.
    pub volatility: f64,
    /// Time to maturity in years (t), strictly positive.
    pub maturity: f64,
    /// Simulation drift (μ), annualised.
    pub drift: f64,
}

impl MarketParameters {
    /// Creates risk-neutral parameters (drift equal to the rate).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if spot, strike, volatility or maturity is not
    /// finite and positive, or if the rate is not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        maturity: f64,
    ) -> PricingResult<Self> {
        let params = Self {
            spot,
            strike,
            rate,
            volatility,
            maturity,
            drift: rate,
        };
        params.validate()?;
        Ok(params)
    }

    /// Returns a copy with the given real-world drift.
    pub fn with_drift(self, drift: f64) -> PricingResult<Self> {
        ensure_finite("drift", drift)?;
        Ok(Self { drift, ..self })
    }

    /// Validates all fields.
    ///
    /// Fields are public, so callers that build the struct literally should
    /// call this before use; every engine entry point calls it again.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("spot", self.spot)?;
        ensure_positive("strike", self.strike)?;
        ensure_finite("rate", self.rate)?;
        ensure_positive("volatility", self.volatility)?;
        ensure_positive("maturity", self.maturity)?;
        ensure_finite("drift", self.drift)?;
        Ok(())
    }

    /// Returns `true` when the drift equals the risk-free rate.
    #[inline]
    pub fn is_risk_neutral(&self) -> bool {
        self.drift == self.rate
    }

    /// Discount factor to maturity: `exp(-r·t)`.
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}
