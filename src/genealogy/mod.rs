//! Genealogy tracking for every individual produced during evolution.
//!
//! The engine talks to the genealogy store only through [`GenealogyTracker`].
//! Nodes are created once per deployed individual and never deleted; edges link
//! each child to the parents it was bred from, tagged with the generation and
//! the operator that produced it.
//!
//! [`GraphTracker`] is the default store: an in-memory graph with JSON export.

mod graph;

use std::collections::BTreeMap;
use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use crate::evolution::{Fitness, ItemSet};

pub use graph::{GenealogyExport, GraphTracker};

/// Permanent identity of an individual, independent of its contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ConcreteId(pub u64);

impl fmt::Display for ConcreteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:03}", self.0)
    }
}

/// Identity of a parent-to-child edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

/// Arbitrary operator metadata attached to breeding edges.
pub type OperatorAttrs = BTreeMap<String, String>;

/// A genealogy node: one deployed individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenealogyNode {
    pub id: ConcreteId,
    /// Generation the individual was bred in (0 for the initial population).
    pub generation: usize,
    /// Item set at deploy time.
    pub contents: ItemSet,
    pub fitness: Option<Fitness>,
    pub score: Option<f64>,
}

/// A breeding edge from one parent to one child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenealogyEdge {
    pub id: EdgeId,
    pub parent: ConcreteId,
    pub child: ConcreteId,
    pub generation: usize,
    pub attrs: OperatorAttrs,
}

/// Genealogy store errors.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Unknown genealogy node {0}")]
    UnknownNode(ConcreteId),
    #[error("Fitness for node {0} was already recorded")]
    FitnessAlreadySet(ConcreteId),
    #[error("Score for node {0} was already recorded")]
    ScoreAlreadySet(ConcreteId),
    #[error("Failed to write genealogy: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to encode genealogy: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Contract between the breeding engine and a genealogy store.
///
/// The engine is the single writer; calls arrive in a fixed, deterministic
/// order for a given seed.
pub trait GenealogyTracker {
    /// Register a new node and return its fresh identifier.
    fn deploy(&mut self, contents: &ItemSet) -> Result<ConcreteId, TrackerError>;

    /// Record one edge per parent. Returned edge ids follow `parents` order.
    fn set_parents(
        &mut self,
        child: ConcreteId,
        parents: &[ConcreteId],
        generation: usize,
        attrs: &OperatorAttrs,
    ) -> Result<Vec<EdgeId>, TrackerError>;

    /// Attach a fitness to an existing node. Written once per node.
    fn update_fitness(&mut self, id: ConcreteId, fitness: Fitness) -> Result<(), TrackerError>;

    /// Attach a scalar score to an existing node. Written once per node.
    fn update_score(&mut self, id: ConcreteId, score: f64) -> Result<(), TrackerError>;

    /// Persist the accumulated graph.
    fn save(&mut self) -> Result<(), TrackerError>;
}
