//! Uniform observation grid.

use asian_core::types::error::{ensure_positive, PricingError, PricingResult};

/// Uniform grid `t_i = i·t/N` for `i = 0..=N`.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::paths::TimeGrid;
///
/// let grid = TimeGrid::new(1.0, 4).unwrap();
/// assert_eq!(grid.n_points(), 5);
/// assert_eq!(grid.dt(), 0.25);
/// assert_eq!(grid.time(2), 0.5);
/// assert_eq!(grid.remaining(3), 0.25);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    maturity: f64,
    n_steps: usize,
}

impl TimeGrid {
    /// Creates a grid of `n_steps` equal steps up to `maturity`.
    pub fn new(maturity: f64, n_steps: usize) -> PricingResult<Self> {
        ensure_positive("maturity", maturity)?;
        if n_steps == 0 {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                "must be at least 1",
            ));
        }
        Ok(Self { maturity, n_steps })
    }

    /// Final time `t`.
    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Number of steps `N`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Number of grid points `N + 1`.
    #[inline]
    pub fn n_points(&self) -> usize {
        self.n_steps + 1
    }

    /// Step length `t / N`.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.maturity / self.n_steps as f64
    }

    /// Time of grid point `i`.
    ///
    /// The last point returns `maturity` exactly.
    #[inline]
    pub fn time(&self, i: usize) -> f64 {
        if i >= self.n_steps {
            self.maturity
        } else {
            self.maturity * i as f64 / self.n_steps as f64
        }
    }

    /// Time remaining to maturity from grid point `i`.
    #[inline]
    pub fn remaining(&self, i: usize) -> f64 {
        if i >= self.n_steps {
            0.0
        } else {
            self.maturity * (self.n_steps - i) as f64 / self.n_steps as f64
        }
    }

    /// Returns `true` when `maturity` agrees with this grid to a relative 1e-12.
    pub fn matches_maturity(&self, maturity: f64) -> bool {
        (self.maturity - maturity).abs() <= 1e-12 * self.maturity.max(maturity.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_endpoints() {
        let grid = TimeGrid::new(0.75, 3).unwrap();
        assert_eq!(grid.time(0), 0.0);
        assert_eq!(grid.time(3), 0.75);
        assert_eq!(grid.remaining(0), 0.75);
        assert_eq!(grid.remaining(3), 0.0);
        assert_relative_eq!(grid.time(1) + grid.remaining(1), 0.75, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_grid() {
        assert!(TimeGrid::new(0.0, 10).unwrap_err().is_invalid_parameter());
        assert!(TimeGrid::new(1.0, 0).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_matches_maturity() {
        let grid = TimeGrid::new(21.0 / 252.0, 21).unwrap();
        assert!(grid.matches_maturity(1.0 / 12.0));
        assert!(!grid.matches_maturity(0.1));
    }
}
