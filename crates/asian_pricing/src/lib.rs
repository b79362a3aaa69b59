//! # asian_pricing: Simulation and Pricing Engine (Layer 3)
//!
//! ## Layer 3 Role
//!
//! asian_pricing turns validated market parameters into prices:
//! - Seeded random number generation with independent per-path streams (`rng`)
//! - Uniform time grids, path batches and the GBM generator (`paths`)
//! - Streaming arithmetic and geometric averages (`path_dependent`)
//! - Closed-form geometric Asian and Black-Scholes prices and deltas (`analytical`)
//! - Monte Carlo reduction over path batches and convergence studies (`mc`)
//!
//! Path generation and Monte Carlo reduction are separate steps: a pricer
//! never simulates, it reduces a batch it is given. The same batch can be
//! priced with several payoffs, or hedged by `asian_hedging`.
//!
//! ## Usage Example
//!
//! ```rust
//! use asian_core::types::{AverageType, MarketParameters, OptionType};
//! use asian_pricing::analytical::GeometricPricer;
//! use asian_pricing::mc::AsianMonteCarloPricer;
//! use asian_pricing::paths::{generate_gbm_paths, SimulationConfig};
//!
//! let market = MarketParameters::new(100.0, 100.0, 0.0425, 0.43, 1.0).unwrap();
//! let config = SimulationConfig::builder()
//!     .n_paths(2_000)
//!     .n_steps(52)
//!     .seed(7)
//!     .build()
//!     .unwrap();
//!
//! let batch = generate_gbm_paths(&market, &config).unwrap();
//! let arithmetic = AsianMonteCarloPricer::arithmetic(market.strike, market.rate, OptionType::Call)
//!     .price(&batch)
//!     .unwrap();
//! let geometric = GeometricPricer::quote(&market, OptionType::Call).unwrap();
//!
//! assert_eq!(arithmetic.average_type, Some(AverageType::Arithmetic));
//! assert!(arithmetic.price > 0.0 && geometric.price > 0.0);
//! ```

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod analytical;
pub mod mc;
pub mod path_dependent;
pub mod paths;
pub mod rng;
