//! Discounted-payoff reducer for Asian and European options.

use asian_core::math::statistics::SampleStatistics;
use asian_core::types::error::{ensure_finite, ensure_positive};
use asian_core::types::{
    AverageType, OptionQuote, OptionType, PricingError, PricingMethod, PricingResult,
};
use rayon::prelude::*;
use tracing::debug;

use crate::path_dependent::path_average;
use crate::paths::{PathBatch, PricePath};

/// Monte Carlo pricer for options on the average (or terminal) price.
///
/// `average_type = None` prices the European option on `S_N`.
///
/// # Examples
///
/// ```rust
/// use asian_core::types::OptionType;
/// use asian_pricing::mc::AsianMonteCarloPricer;
/// use asian_pricing::paths::{PathBatch, TimeGrid};
///
/// let grid = TimeGrid::new(1.0, 2).unwrap();
/// let batch = PathBatch::from_paths(
///     grid,
///     &[vec![100.0, 110.0, 120.0], vec![100.0, 90.0, 80.0]],
/// )
/// .unwrap();
///
/// let pricer = AsianMonteCarloPricer::arithmetic(100.0, 0.0, OptionType::Call);
/// let quote = pricer.price(&batch).unwrap();
///
/// // Payoffs: max(110 - 100, 0) = 10 and 0
/// assert!((quote.price - 5.0).abs() < 1e-12);
/// assert!((quote.std_error - 5.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AsianMonteCarloPricer {
    strike: f64,
    rate: f64,
    option_type: OptionType,
    average_type: Option<AverageType>,
}

impl AsianMonteCarloPricer {
    /// Creates a pricer for the given payoff.
    pub fn new(
        strike: f64,
        rate: f64,
        option_type: OptionType,
        average_type: Option<AverageType>,
    ) -> Self {
        Self {
            strike,
            rate,
            option_type,
            average_type,
        }
    }

    /// Arithmetic-average Asian option.
    pub fn arithmetic(strike: f64, rate: f64, option_type: OptionType) -> Self {
        Self::new(strike, rate, option_type, Some(AverageType::Arithmetic))
    }

    /// Geometric-average Asian option.
    pub fn geometric(strike: f64, rate: f64, option_type: OptionType) -> Self {
        Self::new(strike, rate, option_type, Some(AverageType::Geometric))
    }

    /// European option on the terminal price.
    pub fn european(strike: f64, rate: f64, option_type: OptionType) -> Self {
        Self::new(strike, rate, option_type, None)
    }

    /// Option type.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Averaging rule, `None` for European.
    #[inline]
    pub fn average_type(&self) -> Option<AverageType> {
        self.average_type
    }

    fn validate(&self) -> PricingResult<()> {
        ensure_positive("strike", self.strike)?;
        ensure_finite("rate", self.rate)?;
        Ok(())
    }

    /// Undiscounted payoff of one path.
    pub fn payoff(&self, path: &PricePath<'_>) -> PricingResult<f64> {
        let reference = match self.average_type {
            Some(average_type) => path_average(path, average_type)?,
            None => path.terminal(),
        };
        Ok(self.option_type.payoff(reference, self.strike))
    }

    /// Discounted payoff of every path, in path order.
    pub fn discounted_payoffs(&self, batch: &PathBatch) -> PricingResult<Vec<f64>> {
        self.validate()?;
        let discount = (-self.rate * batch.grid().maturity()).exp();
        batch
            .par_paths()
            .map(|path| self.payoff(&path).map(|p| discount * p))
            .collect()
    }

    /// Prices the batch: sample mean and standard error of the discounted payoffs.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a non-positive strike or a non-finite rate;
    /// `NumericDegeneracy` if a path holds a non-positive price.
    pub fn price(&self, batch: &PathBatch) -> PricingResult<OptionQuote> {
        self.validate()?;
        let discount = (-self.rate * batch.grid().maturity()).exp();

        let stats = batch
            .par_paths()
            .try_fold(SampleStatistics::new, |mut acc, path| {
                acc.push(discount * self.payoff(&path)?);
                Ok::<_, PricingError>(acc)
            })
            .try_reduce(SampleStatistics::new, |a, b| Ok(a.merged(b)))?;

        debug!(
            n_paths = stats.count(),
            option_type = %self.option_type,
            average_type = ?self.average_type,
            price = stats.mean(),
            std_error = stats.std_error(),
            "priced path batch"
        );

        Ok(OptionQuote {
            price: stats.mean(),
            std_error: stats.std_error(),
            option_type: self.option_type,
            average_type: self.average_type,
            method: PricingMethod::MonteCarlo {
                n_paths: stats.count(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::TimeGrid;
    use approx::assert_relative_eq;

    fn two_path_batch() -> PathBatch {
        let grid = TimeGrid::new(1.0, 3).unwrap();
        PathBatch::from_paths(
            grid,
            &[vec![100.0, 110.0, 120.0, 130.0], vec![100.0, 95.0, 90.0, 85.0]],
        )
        .unwrap()
    }

    #[test]
    fn test_fixing_convention_includes_spot() {
        // Mean of [100, 110, 120, 130] = 115, not mean of [110, 120, 130] = 120.
        let pricer = AsianMonteCarloPricer::arithmetic(100.0, 0.0, OptionType::Call);
        let payoffs = pricer.discounted_payoffs(&two_path_batch()).unwrap();
        assert_relative_eq!(payoffs[0], 15.0, epsilon = 1e-12);
        assert_eq!(payoffs[1], 0.0);
    }

    #[test]
    fn test_discounting() {
        let rate = 0.05;
        let pricer = AsianMonteCarloPricer::european(100.0, rate, OptionType::Put);
        let quote = pricer.price(&two_path_batch()).unwrap();
        // Put payoffs: 0 and 15, discounted over one year.
        assert_relative_eq!(quote.price, 7.5 * (-rate).exp(), epsilon = 1e-12);
        assert_eq!(quote.average_type, None);
        assert_eq!(quote.method, PricingMethod::MonteCarlo { n_paths: 2 });
    }

    #[test]
    fn test_geometric_payoff() {
        let grid = TimeGrid::new(1.0, 1).unwrap();
        let batch = PathBatch::from_paths(grid, &[vec![100.0, 144.0]]).unwrap();
        let pricer = AsianMonteCarloPricer::geometric(100.0, 0.0, OptionType::Call);
        let quote = pricer.price(&batch).unwrap();
        assert_relative_eq!(quote.price, 20.0, epsilon = 1e-12);
        assert_eq!(quote.std_error, 0.0);
    }

    #[test]
    fn test_price_matches_payoff_sample() {
        let pricer = AsianMonteCarloPricer::arithmetic(105.0, 0.03, OptionType::Call);
        let batch = two_path_batch();
        let payoffs = pricer.discounted_payoffs(&batch).unwrap();
        let stats = SampleStatistics::from_slice(&payoffs);
        let quote = pricer.price(&batch).unwrap();
        assert_relative_eq!(quote.price, stats.mean(), epsilon = 1e-12);
        assert_relative_eq!(quote.std_error, stats.std_error(), epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_strike() {
        let pricer = AsianMonteCarloPricer::arithmetic(0.0, 0.03, OptionType::Call);
        assert!(pricer.price(&two_path_batch()).unwrap_err().is_invalid_parameter());
    }
}
