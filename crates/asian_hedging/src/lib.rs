//! # asian_hedging: Hedging Simulation and Backtesting
//!
//! Self-financing delta hedging of Asian options over simulated or
//! historical price paths.
//!
//! This crate provides:
//! - Hedging strategies behind one `compute_delta` capability (`strategy`)
//! - The self-financing portfolio simulator and batch P&L reports (`simulator`)
//! - Rolling-window backtests over historical price series (`backtest`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            asian_hedging                │
//! ├─────────────────────────────────────────┤
//! │  strategy/   - Conditional, Naive, BS   │
//! │  simulator/  - bond recurrence, P&L     │
//! │  backtest/   - historical windows       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           asian_pricing (L3)            │
//! │  paths, closed forms, Monte Carlo       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use asian_core::types::{AverageType, MarketParameters, OptionType};
//! use asian_hedging::{HedgeContract, HedgedPayoff, HedgingStrategy, SelfFinancingHedger};
//! use asian_pricing::paths::{generate_gbm_paths, SimulationConfig};
//!
//! let market = MarketParameters::new(100.0, 100.0, 0.045, 0.40, 1.0).unwrap();
//! let contract = HedgeContract::from_market(
//!     &market,
//!     OptionType::Call,
//!     HedgedPayoff::Asian(AverageType::Arithmetic),
//! )
//! .unwrap();
//! let hedger = SelfFinancingHedger::new(contract, HedgingStrategy::Conditional).unwrap();
//!
//! let config = SimulationConfig::builder().n_paths(200).n_steps(52).seed(1).build().unwrap();
//! let batch = generate_gbm_paths(&market, &config).unwrap();
//!
//! let report = hedger.hedge_batch(&batch).unwrap();
//! assert_eq!(report.n_paths(), 200);
//! ```

#![warn(missing_docs)]

pub mod backtest;
pub mod simulator;
pub mod strategy;

pub use backtest::{
    BacktestConfig, BacktestEngine, BacktestReport, BacktestSummary, PremiumSource, PricePoint,
    WindowResult,
};
pub use simulator::{HedgeOutcome, HedgePortfolioState, HedgeReport, SelfFinancingHedger};
pub use strategy::{HedgeContract, HedgedPayoff, HedgingStrategy, StepObservation};
