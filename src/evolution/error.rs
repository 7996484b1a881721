//! Errors that abort an evolution run.

use crate::genealogy::{ConcreteId, TrackerError};
use crate::schema::ConfigError;

/// Fatal evolution errors. Infeasible knapsacks are not errors.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Item identifier domain is empty")]
    EmptyDomain,
    #[error("Tournament size {size} exceeds population size {population}")]
    TournamentTooLarge { size: usize, population: usize },
    #[error("Individual {0} has no fitness")]
    MissingFitness(ConcreteId),
    #[error("Operator {operator} must produce {expected} children")]
    OperatorArity {
        operator: &'static str,
        expected: usize,
    },
    #[error("Engine already ran; build a new engine for another run")]
    AlreadyStarted,
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Genealogy tracker failed: {0}")]
    Tracker(#[from] TrackerError),
}
