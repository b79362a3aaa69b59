//! Core market, option and error types.
//!
//! This module provides:
//! - `error`: The `PricingError` taxonomy shared by every layer
//! - `market`: Validated `MarketParameters` for a pricing or hedging run
//! - `option`: Option and average types plus the `OptionQuote` output record
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level.

pub mod error;
pub mod market;
pub mod option;

pub use error::{PricingError, PricingResult};
pub use market::MarketParameters;
pub use option::{AverageType, OptionQuote, OptionType, PricingMethod};
