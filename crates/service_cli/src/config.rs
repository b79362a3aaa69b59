//! CLI configuration management
//!
//! Priority (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables (`ASIAN_LOG_LEVEL`, `ASIAN_N_PATHS`,
//!    `ASIAN_N_STEPS`, `ASIAN_SEED`)
//! 3. TOML config file
//! 4. Default values
//!
//! ```toml
//! log_level = "info"
//!
//! [market]
//! spot = 100.0
//! strike = 100.0
//! rate = 0.0425
//! volatility = 0.43
//! maturity = 1.0
//!
//! [simulation]
//! n_paths = 100000
//! n_steps = 252
//! seed = 42
//!
//! [backtest]
//! window_steps = 21
//! vol_window = 21
//! periods_per_year = 252.0
//! moneyness = 1.0
//! ```

use std::path::Path;
use std::str::FromStr;

use asian_core::math::statistics::{REALIZED_VOL_WINDOW, TRADING_DAYS_PER_YEAR};
use asian_core::types::{MarketParameters, PricingError, PricingResult};
use asian_hedging::BacktestConfig;
use asian_pricing::paths::SimulationConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}={value}: {reason}")]
    EnvError {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid setting: {0}")]
    Invalid(#[from] PricingError),
}

/// Log levels accepted in the config file and `ASIAN_LOG_LEVEL`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl Serialize for LogLevel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_filter_str())
    }
}

impl<'de> Deserialize<'de> for LogLevel {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        LogLevel::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// `[market]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSection {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    pub maturity: f64,
    /// Physical drift; the risk-neutral rate when absent.
    pub drift: Option<f64>,
}

impl Default for MarketSection {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 100.0,
            rate: 0.0425,
            volatility: 0.43,
            maturity: 1.0,
            drift: None,
        }
    }
}

/// `[simulation]` section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSection {
    pub n_paths: usize,
    pub n_steps: usize,
    pub seed: Option<u64>,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            n_paths: 100_000,
            n_steps: 252,
            seed: None,
        }
    }
}

/// `[backtest]` section
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestSection {
    pub window_steps: usize,
    pub vol_window: usize,
    pub periods_per_year: f64,
    pub stride: Option<usize>,
    pub moneyness: f64,
}

impl Default for BacktestSection {
    fn default() -> Self {
        Self {
            window_steps: 21,
            vol_window: REALIZED_VOL_WINDOW,
            periods_per_year: TRADING_DAYS_PER_YEAR,
            stride: None,
            moneyness: 1.0,
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub log_level: LogLevel,
    pub market: MarketSection,
    pub simulation: SimulationSection,
    pub backtest: BacktestSection,
}

impl CliConfig {
    /// Loads `path`, falling back to defaults when the file does not exist,
    /// then applies environment overrides and validates.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            Self::from_file(path)?
        } else {
            Self::default()
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Applies `ASIAN_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("ASIAN_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }
        if let Some(value) = lookup("ASIAN_N_PATHS") {
            self.simulation.n_paths = parse_env("ASIAN_N_PATHS", value)?;
        }
        if let Some(value) = lookup("ASIAN_N_STEPS") {
            self.simulation.n_steps = parse_env("ASIAN_N_STEPS", value)?;
        }
        if let Some(value) = lookup("ASIAN_SEED") {
            self.simulation.seed = Some(parse_env("ASIAN_SEED", value)?);
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.market_parameters()?;
        self.simulation_config()?;
        self.backtest_config(self.market.rate).validate()?;
        Ok(())
    }

    /// Market of the `[market]` section.
    pub fn market_parameters(&self) -> PricingResult<MarketParameters> {
        let m = &self.market;
        let market = MarketParameters::new(m.spot, m.strike, m.rate, m.volatility, m.maturity)?;
        match m.drift {
            Some(drift) => market.with_drift(drift),
            None => Ok(market),
        }
    }

    /// Simulation settings of the `[simulation]` section.
    pub fn simulation_config(&self) -> PricingResult<SimulationConfig> {
        SimulationConfig::builder()
            .n_paths(self.simulation.n_paths)
            .n_steps(self.simulation.n_steps)
            .maybe_seed(self.simulation.seed)
            .build()
    }

    /// Backtest settings of the `[backtest]` section at `rate`.
    pub fn backtest_config(&self, rate: f64) -> BacktestConfig {
        let b = &self.backtest;
        BacktestConfig {
            vol_window: b.vol_window,
            periods_per_year: b.periods_per_year,
            stride: b.stride,
            moneyness: b.moneyness,
            rate,
            ..BacktestConfig::new(b.window_steps)
        }
    }
}

fn parse_env<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    let parsed = value.trim().parse::<T>();
    parsed.map_err(|e| ConfigError::EnvError {
        name,
        reason: e.to_string(),
        value,
    })
}
