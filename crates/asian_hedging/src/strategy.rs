//! Hedging strategies.
//!
//! Every strategy answers one question: given the contract and what has
//! been observed up to step `i`, how many shares should the portfolio hold?
//! The simulator is written once against [`HedgingStrategy::compute_delta`].
//!
//! # Conditional delta
//!
//! The arithmetic Asian option has no closed-form delta. The conditional
//! strategy uses the geometric closed form as a proxy, conditioned on the
//! running geometric average `G_i` realised so far:
//!
//! ```text
//! w     = t_i / t
//! S_eff = G_i^w · S_i^(1-w)
//! σ_eff = σ · √((t - t_i) / (3t))
//! Δ_i   = ((t - t_i) / t) · (S_eff / S_i) · Δ_geo(S_eff, K, r, σ_eff, t - t_i)
//! ```
//!
//! and `Δ_N = 0` at maturity, where no exposure remains.

use std::fmt;

use asian_core::types::error::{ensure_finite, ensure_positive};
use asian_core::types::{AverageType, MarketParameters, OptionType, PricingError, PricingResult};
use asian_pricing::analytical::{bs_delta, bs_price, geometric_asian_delta, geometric_asian_price};

/// Payoff being hedged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HedgedPayoff {
    /// Asian option on the average of all fixings, `S_0` included.
    Asian(AverageType),
    /// European option on the terminal price.
    European,
}

impl HedgedPayoff {
    /// Averaging rule, `None` for European.
    #[inline]
    pub fn average_type(&self) -> Option<AverageType> {
        match self {
            Self::Asian(average_type) => Some(*average_type),
            Self::European => None,
        }
    }
}

impl Default for HedgedPayoff {
    fn default() -> Self {
        Self::Asian(AverageType::Arithmetic)
    }
}

impl fmt::Display for HedgedPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asian(average_type) => write!(f, "{} asian", average_type),
            Self::European => write!(f, "european"),
        }
    }
}

impl std::str::FromStr for HedgedPayoff {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arithmetic" | "arith" => Ok(Self::Asian(AverageType::Arithmetic)),
            "geometric" | "geo" => Ok(Self::Asian(AverageType::Geometric)),
            "european" | "euro" => Ok(Self::European),
            other => Err(format!(
                "Unknown payoff: {}. Supported: arithmetic, geometric, european",
                other
            )),
        }
    }
}

/// Terms of the option being hedged.
///
/// The spot is not part of the contract: it is read from each path.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HedgeContract {
    /// Strike `K`.
    pub strike: f64,
    /// Risk-free rate `r` for the bond account and the deltas.
    pub rate: f64,
    /// Volatility `σ` assumed by the deltas.
    pub volatility: f64,
    /// Maturity `t` in years.
    pub maturity: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Payoff being hedged.
    pub payoff: HedgedPayoff,
}

impl HedgeContract {
    /// Takes strike, rate, volatility and maturity from `market`.
    pub fn from_market(
        market: &MarketParameters,
        option_type: OptionType,
        payoff: HedgedPayoff,
    ) -> PricingResult<Self> {
        market.validate()?;
        Ok(Self {
            strike: market.strike,
            rate: market.rate,
            volatility: market.volatility,
            maturity: market.maturity,
            option_type,
            payoff,
        })
    }

    /// Validates every field.
    pub fn validate(&self) -> PricingResult<()> {
        ensure_positive("strike", self.strike)?;
        ensure_finite("rate", self.rate)?;
        ensure_positive("volatility", self.volatility)?;
        ensure_positive("maturity", self.maturity)?;
        Ok(())
    }

    /// Closed-form premium at `spot`: geometric Kemna-Vorst for Asian
    /// payoffs, Black-Scholes for European.
    pub fn closed_form_premium(&self, spot: f64) -> PricingResult<f64> {
        match self.payoff {
            HedgedPayoff::Asian(_) => geometric_asian_price(
                spot,
                self.strike,
                self.rate,
                self.volatility,
                self.maturity,
                self.option_type,
            ),
            HedgedPayoff::European => bs_price(
                spot,
                self.strike,
                self.rate,
                self.volatility,
                self.maturity,
                self.option_type,
            ),
        }
    }
}

/// What the hedger knows at rebalancing step `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepObservation {
    /// Step index `i` in `0..=n_steps`.
    pub step: usize,
    /// Number of steps `N`.
    pub n_steps: usize,
    /// Time `t_i`.
    pub time: f64,
    /// Time remaining `t - t_i`.
    pub remaining: f64,
    /// Current price `S_i`.
    pub spot: f64,
    /// Running geometric average `G_i` of `S_0..=S_i`.
    pub geometric_average: f64,
}

impl StepObservation {
    /// `true` at the maturity step.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.step >= self.n_steps || self.remaining <= 0.0
    }
}

/// Rule for the number of shares held after rebalancing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum HedgingStrategy {
    /// Geometric delta conditioned on the realised running average.
    #[default]
    Conditional,
    /// Unconditional geometric delta at the current spot, ignoring the
    /// realised average. Kept as a negative example: it hedges an option
    /// whose averaging period restarts at every step.
    Naive,
    /// Black-Scholes delta, for European payoffs.
    BlackScholes,
}

impl HedgingStrategy {
    /// Shares to hold after rebalancing at `obs`.
    ///
    /// Returns exactly `0.0` at the maturity step.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asian_core::types::{AverageType, MarketParameters, OptionType};
    /// use asian_hedging::{HedgeContract, HedgedPayoff, HedgingStrategy, StepObservation};
    ///
    /// let market = MarketParameters::new(100.0, 100.0, 0.05, 0.2, 1.0).unwrap();
    /// let contract = HedgeContract::from_market(
    ///     &market,
    ///     OptionType::Call,
    ///     HedgedPayoff::Asian(AverageType::Arithmetic),
    /// )
    /// .unwrap();
    ///
    /// let start = StepObservation {
    ///     step: 0,
    ///     n_steps: 12,
    ///     time: 0.0,
    ///     remaining: 1.0,
    ///     spot: 100.0,
    ///     geometric_average: 100.0,
    /// };
    ///
    /// let delta = HedgingStrategy::Conditional.compute_delta(&contract, &start).unwrap();
    /// assert!(delta > 0.0 && delta < 1.0);
    ///
    /// let maturity = StepObservation { step: 12, remaining: 0.0, time: 1.0, ..start };
    /// assert_eq!(HedgingStrategy::Naive.compute_delta(&contract, &maturity).unwrap(), 0.0);
    /// ```
    pub fn compute_delta(
        &self,
        contract: &HedgeContract,
        obs: &StepObservation,
    ) -> PricingResult<f64> {
        if obs.is_terminal() {
            return Ok(0.0);
        }
        let tau = obs.remaining;
        match self {
            Self::Conditional => conditional_delta(contract, obs),
            Self::Naive => geometric_asian_delta(
                obs.spot,
                contract.strike,
                contract.rate,
                contract.volatility,
                tau,
                contract.option_type,
            ),
            Self::BlackScholes => bs_delta(
                obs.spot,
                contract.strike,
                contract.rate,
                contract.volatility,
                tau,
                contract.option_type,
            ),
        }
    }
}

impl fmt::Display for HedgingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conditional => write!(f, "conditional"),
            Self::Naive => write!(f, "naive"),
            Self::BlackScholes => write!(f, "black_scholes"),
        }
    }
}

impl std::str::FromStr for HedgingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conditional" => Ok(Self::Conditional),
            "naive" => Ok(Self::Naive),
            "black_scholes" | "black-scholes" | "bs" => Ok(Self::BlackScholes),
            other => Err(format!(
                "Unknown hedging strategy: {}. Supported: conditional, naive, black_scholes",
                other
            )),
        }
    }
}

fn conditional_delta(contract: &HedgeContract, obs: &StepObservation) -> PricingResult<f64> {
    if !(obs.geometric_average > 0.0 && obs.spot > 0.0) {
        return Err(PricingError::numeric_degeneracy(format!(
            "conditional delta needs positive prices, got S = {}, G = {}",
            obs.spot, obs.geometric_average
        )));
    }
    let t = contract.maturity;
    let tau = obs.remaining;
    let elapsed = (obs.time / t).clamp(0.0, 1.0);

    // Log-space blend of the realised and current price.
    let s_eff = (elapsed * obs.geometric_average.ln() + (1.0 - elapsed) * obs.spot.ln()).exp();
    let sigma_eff = contract.volatility * (tau / (3.0 * t)).sqrt();

    let delta_geo = geometric_asian_delta(
        s_eff,
        contract.strike,
        contract.rate,
        sigma_eff,
        tau,
        contract.option_type,
    )?;
    Ok((tau / t) * (s_eff / obs.spot) * delta_geo)
}
