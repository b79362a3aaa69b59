//! # asian_core: Foundation Layer for the Asian Option Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! asian_core is the bottom layer of the workspace, providing:
//! - Error taxonomy: `PricingError` (`types::error`)
//! - Market and option descriptions: `MarketParameters`, `OptionType`,
//!   `AverageType`, `OptionQuote` (`types::market`, `types::option`)
//! - Standard normal distribution (`math::distributions`)
//! - Mergeable sample statistics and realised volatility (`math::statistics`)
//!
//! ## Dependency Principle
//!
//! Layer 1 has no dependencies on other workspace crates and only minimal
//! external dependencies:
//! - thiserror: Error derivation
//! - statrs: Complementary error function for the normal CDF
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use asian_core::math::distributions::norm_cdf;
//! use asian_core::types::{MarketParameters, OptionType};
//!
//! let market = MarketParameters::new(100.0, 100.0, 0.0425, 0.43, 1.0).unwrap();
//! assert!(market.is_risk_neutral());
//!
//! assert!((norm_cdf(0.0) - 0.5).abs() < 1e-15);
//! assert_eq!(OptionType::Call.payoff(110.0, 100.0), 10.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for parameters, quotes and statistics

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod math;
pub mod types;
