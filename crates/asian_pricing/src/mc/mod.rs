//! Monte Carlo pricing over simulated path batches.
//!
//! # Overview
//!
//! [`AsianMonteCarloPricer`] is a pure reducer: given a [`PathBatch`](crate::paths::PathBatch)
//! it computes one discounted payoff per path and returns the sample mean
//! and standard error. It never simulates, so one batch can be priced for
//! several strikes, option types or averaging rules.
//!
//! [`convergence`] prices one market over a ladder of path counts to check
//! the `O(1/√M)` decay of the standard error.

pub mod convergence;
mod pricer;

pub use convergence::{ConvergencePoint, ConvergenceReport, ConvergenceStudy, DEFAULT_PATH_LADDER};
pub use pricer::AsianMonteCarloPricer;
