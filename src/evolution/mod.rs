//! Evolutionary search over knapsack item sets with genealogy tracking.
//!
//! # Overview
//!
//! The breeding-and-tracking engine consists of:
//!
//! - **Item Catalog** (`catalog`): fixed (weight, value) table from a seeded draw
//! - **Individual Factory** (`individual`): creates knapsacks and deploys them
//! - **Fitness Evaluator** (`fitness`): sums, feasibility penalty, score reporting
//! - **Variation Operators** (`variation`): set crossover and add/remove mutation
//! - **Breeder** (`breeding`): gives every child a fresh genealogy node and edges
//! - **Tournament Selection** (`selection`)
//! - **Evolution Engine** (`search`): the generational loop
//!
//! # Example
//!
//! ```rust,no_run
//! use knapsack_genealogy::evolution::EvolutionEngine;
//! use knapsack_genealogy::schema::RunConfig;
//!
//! let mut engine = EvolutionEngine::with_graph(RunConfig::default())?;
//! let result = engine.run_with_callback(|record| {
//!     println!("Generation {}: {} evaluations", record.generation, record.evaluations);
//! })?;
//!
//! if let Some(best) = &result.best {
//!     println!("Best knapsack {:?}: {:?}", best.contents, best.fitness);
//! }
//! println!("Genealogy nodes: {}", engine.tracker().len());
//! # Ok::<(), knapsack_genealogy::evolution::EvolutionError>(())
//! ```

mod breeding;
mod catalog;
mod error;
mod fitness;
mod individual;
mod rng;
mod search;
mod selection;
mod statistics;
mod variation;

pub use breeding::{Breeder, OPERATOR_ATTR, operator_attrs};
pub use catalog::{Item, ItemCatalog};
pub use error::EvolutionError;
pub use fitness::{FitnessEvaluator, INFEASIBLE_FITNESS};
pub use individual::{FITNESS_WEIGHTS, Fitness, Individual, IndividualFactory, ItemId, ItemSet};
pub use rng::EvolutionRng;
pub use search::{EvolutionEngine, RunResult, best_by_value};
pub use selection::select_tournament;
pub use statistics::compile as compile_statistics;
pub use variation::{cx_set, mut_set};
