//! Schema module - Configuration and report types for knapsack evolution runs.

mod config;
mod stats;

pub use config::*;
pub use stats::*;
