//! Candidate knapsacks and the factory that registers them.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::EvolutionError;
use super::rng::EvolutionRng;
use crate::genealogy::{ConcreteId, GenealogyTracker};

/// Index of an item in the catalog.
pub type ItemId = usize;

/// Contents of a knapsack. Iteration is in ascending id order.
pub type ItemSet = BTreeSet<ItemId>;

/// Objective coefficients: minimize weight, maximize value.
pub const FITNESS_WEIGHTS: [f64; 2] = [-1.0, 1.0];

/// Objective values of an evaluated knapsack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fitness {
    pub weight: f64,
    pub value: f64,
}

impl Fitness {
    pub fn new(weight: f64, value: f64) -> Self {
        Self { weight, value }
    }

    /// Objective values in declaration order.
    pub fn values(&self) -> [f64; 2] {
        [self.weight, self.value]
    }

    /// Values scaled by [`FITNESS_WEIGHTS`]; larger is better in every slot.
    pub fn weighted(&self) -> [f64; 2] {
        [
            self.weight * FITNESS_WEIGHTS[0],
            self.value * FITNESS_WEIGHTS[1],
        ]
    }

    /// Scalar score: inner product of the values with [`FITNESS_WEIGHTS`].
    pub fn score(&self) -> f64 {
        self.weighted().iter().sum()
    }

    /// Lexicographic comparison of weighted values.
    pub fn compare(&self, other: &Fitness) -> Ordering {
        let (a, b) = (self.weighted(), other.weighted());
        a[0].total_cmp(&b[0]).then_with(|| a[1].total_cmp(&b[1]))
    }
}

/// A candidate solution with its genealogy identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Individual {
    pub contents: ItemSet,
    /// `None` until evaluated, reset whenever contents are varied.
    pub fitness: Option<Fitness>,
    pub concrete_id: ConcreteId,
}

impl Individual {
    /// Whether the individual carries a valid fitness.
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Number of distinct items carried.
    pub fn len(&self) -> usize {
        self.contents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Builds fresh individuals and deploys them into the genealogy.
#[derive(Debug, Clone, Copy)]
pub struct IndividualFactory {
    domain: usize,
}

impl IndividualFactory {
    /// Factory drawing item ids from `[0, domain)`.
    pub fn new(domain: usize) -> Result<Self, EvolutionError> {
        if domain == 0 {
            return Err(EvolutionError::EmptyDomain);
        }
        Ok(Self { domain })
    }

    /// Create an individual from `size` independent draws with replacement.
    ///
    /// Duplicate draws collapse, so the result holds at most `size` items.
    pub fn create<T: GenealogyTracker + ?Sized>(
        &self,
        size: usize,
        rng: &mut EvolutionRng,
        tracker: &mut T,
    ) -> Result<Individual, EvolutionError> {
        let contents: ItemSet = (0..size).map(|_| rng.index(self.domain)).collect();
        let concrete_id = tracker.deploy(&contents)?;
        Ok(Individual {
            contents,
            fitness: None,
            concrete_id,
        })
    }

    /// Create `count` individuals in order.
    pub fn population<T: GenealogyTracker + ?Sized>(
        &self,
        count: usize,
        size: usize,
        rng: &mut EvolutionRng,
        tracker: &mut T,
    ) -> Result<Vec<Individual>, EvolutionError> {
        (0..count)
            .map(|_| self.create(size, rng, tracker))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genealogy::GraphTracker;

    #[test]
    fn test_fitness_score() {
        let fitness = Fitness::new(12.0, 40.0);
        assert_eq!(fitness.score(), 28.0);
        assert_eq!(fitness.weighted(), [-12.0, 40.0]);
    }

    #[test]
    fn test_fitness_ordering() {
        let light = Fitness::new(5.0, 10.0);
        let heavy = Fitness::new(8.0, 90.0);
        let light_rich = Fitness::new(5.0, 20.0);
        assert_eq!(light.compare(&heavy), Ordering::Greater);
        assert_eq!(light_rich.compare(&light), Ordering::Greater);
        assert_eq!(light.compare(&light), Ordering::Equal);
    }

    #[test]
    fn test_factory_deploys_once() {
        let factory = IndividualFactory::new(20).unwrap();
        let mut rng = EvolutionRng::new(64);
        let mut graph = GraphTracker::new("test", "64");

        let individual = factory.create(5, &mut rng, &mut graph).unwrap();
        assert_eq!(graph.len(), 1);
        assert_eq!(individual.concrete_id, ConcreteId(0));
        assert!(!individual.is_evaluated());
        assert!(!individual.is_empty());
        assert!(individual.len() <= 5);
        assert!(individual.contents.iter().all(|&id| id < 20));
        assert_eq!(graph.node(individual.concrete_id).unwrap().contents, individual.contents);
    }

    #[test]
    fn test_population_ids_distinct() {
        let factory = IndividualFactory::new(20).unwrap();
        let mut rng = EvolutionRng::new(3);
        let mut graph = GraphTracker::new("test", "3");

        let population = factory.population(50, 5, &mut rng, &mut graph).unwrap();
        let ids: BTreeSet<_> = population.iter().map(|i| i.concrete_id).collect();
        assert_eq!(ids.len(), 50);
        assert_eq!(graph.len(), 50);
    }

    #[test]
    fn test_empty_domain() {
        assert!(matches!(
            IndividualFactory::new(0),
            Err(EvolutionError::EmptyDomain)
        ));
    }
}
