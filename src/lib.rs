//! Knapsack Genealogy - Multi-objective knapsack evolution with lineage tracking.
//!
//! This crate evolves sets of item indices under a minimize-weight /
//! maximize-value objective and records every individual ever bred in a
//! genealogy graph: who it was bred from, in which generation, by which
//! operator, and what fitness and score it reached.
//!
//! # Architecture
//!
//! The crate is split into three main modules:
//!
//! - `schema`: Run configuration and report types
//! - `evolution`: Catalog, evaluation, variation, selection and the generational loop
//! - `genealogy`: The tracker contract and the default in-memory graph
//!
//! # Example
//!
//! ```rust,no_run
//! use knapsack_genealogy::{EvolutionEngine, RunConfig};
//!
//! let config = RunConfig::default();
//! let mut engine = EvolutionEngine::with_graph(config)?;
//! let result = engine.run()?;
//!
//! println!("Evaluations: {}", result.stats.total_evaluations);
//! println!("Individuals tracked: {}", engine.tracker().len());
//! # Ok::<(), knapsack_genealogy::evolution::EvolutionError>(())
//! ```

pub mod evolution;
pub mod genealogy;
pub mod schema;

// Re-export commonly used types
pub use evolution::{EvolutionEngine, EvolutionError, Fitness, Individual, RunResult};
pub use genealogy::{ConcreteId, GenealogyTracker, GraphTracker};
pub use schema::RunConfig;
