//! Time grids, path batches and GBM path generation.
//!
//! # Memory Layout
//!
//! A [`PathBatch`] stores its paths contiguously in row-major order:
//! `data[path_idx * (n_steps + 1) + step_idx]`, where `step_idx = 0` holds
//! the initial spot price. [`PricePath`] is a borrowed view of one row.

mod batch;
mod config;
mod gbm;
mod grid;

pub use batch::{PathBatch, PricePath};
pub use config::{SimulationConfig, SimulationConfigBuilder, MAX_PATHS, MAX_PATH_POINTS, MAX_STEPS};
pub use gbm::{generate_gbm_paths, simulate_gbm_path};
pub use grid::TimeGrid;
