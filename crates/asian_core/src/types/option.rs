//! Option descriptors and the quote record emitted by the pricers.

use std::fmt;

/// Call or put.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy: pays `max(X - K, 0)`.
    #[default]
    Call,
    /// Right to sell: pays `max(K - X, 0)`.
    Put,
}

impl OptionType {
    /// Intrinsic payoff for the reference price `underlying`.
    ///
    /// ```rust
    /// use asian_core::types::OptionType;
    ///
    /// assert_eq!(OptionType::Call.payoff(105.0, 100.0), 5.0);
    /// assert_eq!(OptionType::Put.payoff(105.0, 100.0), 0.0);
    /// ```
    #[inline]
    pub fn payoff(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            Self::Call => (underlying - strike).max(0.0),
            Self::Put => (strike - underlying).max(0.0),
        }
    }

    /// Returns `true` for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, Self::Call)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Call => write!(f, "call"),
            Self::Put => write!(f, "put"),
        }
    }
}

impl std::str::FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "call" | "c" => Ok(Self::Call),
            "put" | "p" => Ok(Self::Put),
            other => Err(format!("Unknown option type: {}. Supported: call, put", other)),
        }
    }
}

/// Averaging rule applied to the fixings of an Asian option.
///
/// Both rules average over every grid point including the initial price.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AverageType {
    /// `(1/n) Σ S_i`
    #[default]
    Arithmetic,
    /// `(Π S_i)^(1/n)`
    Geometric,
}

impl fmt::Display for AverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arithmetic => write!(f, "arithmetic"),
            Self::Geometric => write!(f, "geometric"),
        }
    }
}

impl std::str::FromStr for AverageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "arithmetic" | "arith" => Ok(Self::Arithmetic),
            "geometric" | "geo" => Ok(Self::Geometric),
            other => Err(format!(
                "Unknown average type: {}. Supported: arithmetic, geometric",
                other
            )),
        }
    }
}

/// How a quote was produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingMethod {
    /// Closed-form formula; the standard error is zero.
    ClosedForm,
    /// Monte Carlo estimate over `n_paths` simulated paths.
    MonteCarlo {
        /// Number of paths in the estimate.
        n_paths: usize,
    },
}

/// Price quote emitted by the pricers.
///
/// `average_type` is `None` for European (terminal-price) quotes.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::{AverageType, OptionQuote, OptionType, PricingMethod};
///
/// let quote = OptionQuote {
///     price: 9.78,
///     std_error: 0.016,
///     option_type: OptionType::Call,
///     average_type: Some(AverageType::Arithmetic),
///     method: PricingMethod::MonteCarlo { n_paths: 1_000_000 },
/// };
///
/// assert!((quote.confidence_95() - 1.96 * 0.016).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Present value.
    pub price: f64,
    /// Standard error of the price estimate (zero for closed forms).
    pub std_error: f64,
    /// Call or put.
    pub option_type: OptionType,
    /// Averaging rule, or `None` for European options.
    pub average_type: Option<AverageType>,
    /// Production method.
    pub method: PricingMethod,
}

impl OptionQuote {
    /// Creates a closed-form quote.
    pub fn closed_form(
        price: f64,
        option_type: OptionType,
        average_type: Option<AverageType>,
    ) -> Self {
        Self {
            price,
            std_error: 0.0,
            option_type,
            average_type,
            method: PricingMethod::ClosedForm,
        }
    }

    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payoff() {
        assert_eq!(OptionType::Call.payoff(90.0, 100.0), 0.0);
        assert_eq!(OptionType::Put.payoff(90.0, 100.0), 10.0);
    }

    #[test]
    fn test_parse_option_type() {
        assert_eq!("Call".parse::<OptionType>(), Ok(OptionType::Call));
        assert_eq!("p".parse::<OptionType>(), Ok(OptionType::Put));
        assert!("straddle".parse::<OptionType>().is_err());
    }

    #[test]
    fn test_parse_average_type() {
        assert_eq!("geo".parse::<AverageType>(), Ok(AverageType::Geometric));
        assert_eq!(
            "ARITHMETIC".parse::<AverageType>(),
            Ok(AverageType::Arithmetic)
        );
        assert!("harmonic".parse::<AverageType>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        for ty in [OptionType::Call, OptionType::Put] {
            assert_eq!(ty.to_string().parse::<OptionType>(), Ok(ty));
        }
    }

    #[test]
    fn test_closed_form_quote() {
        let quote = OptionQuote::closed_form(5.0, OptionType::Put, None);
        assert_eq!(quote.std_error, 0.0);
        assert_eq!(quote.method, PricingMethod::ClosedForm);
        assert_eq!(quote.confidence_95(), 0.0);
    }
}
