//! Numerical building blocks.
//!
//! - `distributions`: Standard normal CDF
//! - `statistics`: Mergeable running moments, log returns and realised volatility

pub mod distributions;
pub mod statistics;

pub use distributions::norm_cdf;
pub use statistics::{log_returns, realized_volatility, SampleStatistics};
