//! Path batches and borrowed path views.

use asian_core::types::error::{PricingError, PricingResult};
use rayon::prelude::*;

use super::grid::TimeGrid;

/// Read-only view of one price path `{S_0, …, S_N}`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePath<'a> {
    prices: &'a [f64],
}

impl<'a> PricePath<'a> {
    /// Wraps a price slice after checking it.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` with fewer than two prices
    /// - `NumericDegeneracy` if any price is non-positive or not finite
    pub fn new(prices: &'a [f64]) -> PricingResult<Self> {
        if prices.len() < 2 {
            return Err(PricingError::invalid_parameter(
                "prices",
                format!("a path needs at least 2 prices, got {}", prices.len()),
            ));
        }
        check_positive(prices)?;
        Ok(Self { prices })
    }

    /// Wraps a slice already known to be valid.
    #[inline]
    pub(crate) fn from_checked(prices: &'a [f64]) -> Self {
        Self { prices }
    }

    /// All prices, starting at `S_0`.
    #[inline]
    pub fn prices(&self) -> &'a [f64] {
        self.prices
    }

    /// Number of steps `N` (one fewer than the number of prices).
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.prices.len() - 1
    }

    /// Initial price `S_0`.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.prices[0]
    }

    /// Terminal price `S_N`.
    #[inline]
    pub fn terminal(&self) -> f64 {
        self.prices[self.prices.len() - 1]
    }
}

/// `M` independent paths on a shared grid, stored row-major.
///
/// Generated batches record the base seed that produced them, so the
/// batch can be regenerated exactly. Batches built from external data
/// carry no seed.
#[derive(Clone, Debug, PartialEq)]
pub struct PathBatch {
    grid: TimeGrid,
    n_paths: usize,
    data: Vec<f64>,
    seed: Option<u64>,
}

impl PathBatch {
    /// Wraps simulated data; the caller guarantees layout and positivity.
    pub(crate) fn from_raw(grid: TimeGrid, n_paths: usize, data: Vec<f64>, seed: u64) -> Self {
        debug_assert_eq!(data.len(), n_paths * grid.n_points());
        Self {
            grid,
            n_paths,
            data,
            seed: Some(seed),
        }
    }

    /// Builds a batch from externally supplied paths.
    ///
    /// Every path must have `grid.n_points()` strictly positive prices.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use asian_pricing::paths::{PathBatch, TimeGrid};
    ///
    /// let grid = TimeGrid::new(1.0, 2).unwrap();
    /// let batch = PathBatch::from_paths(
    ///     grid,
    ///     &[vec![100.0, 105.0, 103.0], vec![100.0, 98.0, 95.0]],
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(batch.n_paths(), 2);
    /// assert_eq!(batch.path(1).unwrap().terminal(), 95.0);
    /// assert_eq!(batch.seed(), None);
    /// ```
    pub fn from_paths<P: AsRef<[f64]>>(grid: TimeGrid, paths: &[P]) -> PricingResult<Self> {
        if paths.is_empty() {
            return Err(PricingError::invalid_parameter(
                "paths",
                "at least one path is required",
            ));
        }
        let n_points = grid.n_points();
        let mut data = Vec::with_capacity(paths.len() * n_points);
        for (idx, path) in paths.iter().enumerate() {
            let prices = path.as_ref();
            if prices.len() != n_points {
                return Err(PricingError::invalid_parameter(
                    "paths",
                    format!(
                        "path {} has {} prices, grid expects {}",
                        idx,
                        prices.len(),
                        n_points
                    ),
                ));
            }
            check_positive(prices)?;
            data.extend_from_slice(prices);
        }
        Ok(Self {
            grid,
            n_paths: paths.len(),
            data,
            seed: None,
        })
    }

    /// Observation grid shared by all paths.
    #[inline]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of paths `M`.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of steps `N`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.grid.n_steps()
    }

    /// Base seed of a generated batch.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Row-major price data.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Path `index`, or `None` when out of range.
    pub fn path(&self, index: usize) -> Option<PricePath<'_>> {
        if index >= self.n_paths {
            return None;
        }
        let n_points = self.grid.n_points();
        let start = index * n_points;
        Some(PricePath::from_checked(&self.data[start..start + n_points]))
    }

    /// Iterates over the paths in order.
    pub fn paths(&self) -> impl ExactSizeIterator<Item = PricePath<'_>> + '_ {
        self.data
            .chunks_exact(self.grid.n_points())
            .map(PricePath::from_checked)
    }

    /// Parallel iterator over the paths, indexed in path order.
    pub fn par_paths(&self) -> impl IndexedParallelIterator<Item = PricePath<'_>> + '_ {
        self.data
            .par_chunks_exact(self.grid.n_points())
            .map(PricePath::from_checked)
    }
}

fn check_positive(prices: &[f64]) -> PricingResult<()> {
    match prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        Some((idx, bad)) => Err(PricingError::numeric_degeneracy(format!(
            "price {} at step {} is not finite and positive",
            bad, idx
        ))),
        None => Ok(()),
    }
}
