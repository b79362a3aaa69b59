//! Simulation configuration.

use asian_core::types::error::{PricingError, PricingResult};

/// Maximum number of paths per batch.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps per path.
pub const MAX_STEPS: usize = 10_000;

/// Maximum number of stored prices per batch, `n_paths * (n_steps + 1)`.
///
/// Bounds a batch at 4 GB of `f64`; room for 1,000,000 daily paths.
pub const MAX_PATH_POINTS: usize = 500_000_000;

/// Path count, step count and optional seed of a simulation run.
///
/// Use [`SimulationConfig::builder`] to create instances.
///
/// # Examples
///
/// ```rust
/// use asian_pricing::paths::SimulationConfig;
///
/// let config = SimulationConfig::builder()
///     .n_paths(100_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.n_paths(), 100_000);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    n_paths: usize,
    n_steps: usize,
    seed: Option<u64>,
}

impl SimulationConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> SimulationConfigBuilder {
        SimulationConfigBuilder::default()
    }

    /// Number of paths `M`.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Number of time steps `N`.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Base seed, or `None` to draw one from OS entropy.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Returns a copy with a different path count, validated.
    pub fn with_n_paths(self, n_paths: usize) -> PricingResult<Self> {
        let config = Self { n_paths, ..self };
        config.validate()?;
        Ok(config)
    }

    /// Validates the counts against `1..=MAX_PATHS` and `1..=MAX_STEPS`,
    /// and the batch size against [`MAX_PATH_POINTS`].
    pub fn validate(&self) -> PricingResult<()> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                format!("must be in 1..={}, got {}", MAX_PATHS, self.n_paths),
            ));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(PricingError::invalid_parameter(
                "n_steps",
                format!("must be in 1..={}, got {}", MAX_STEPS, self.n_steps),
            ));
        }
        let n_points = self.n_paths.saturating_mul(self.n_steps + 1);
        if n_points > MAX_PATH_POINTS {
            return Err(PricingError::invalid_parameter(
                "n_paths",
                format!(
                    "{} paths x {} steps stores {} prices, limit is {}",
                    self.n_paths, self.n_steps, n_points, MAX_PATH_POINTS
                ),
            ));
        }
        Ok(())
    }
}

/// Builder for [`SimulationConfig`].
#[derive(Clone, Debug, Default)]
pub struct SimulationConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    seed: Option<u64>,
}

impl SimulationConfigBuilder {
    /// Sets the number of paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the base seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the base seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> PricingResult<SimulationConfig> {
        let n_paths = self
            .n_paths
            .ok_or_else(|| PricingError::invalid_parameter("n_paths", "must be specified"))?;
        let n_steps = self
            .n_steps
            .ok_or_else(|| PricingError::invalid_parameter("n_steps", "must be specified"))?;

        let config = SimulationConfig {
            n_paths,
            n_steps,
            seed: self.seed,
        };
        config.validate()?;
        Ok(config)
    }
}
