//! Knapsack fitness evaluation with the infeasibility penalty.

use rayon::prelude::*;

use super::catalog::ItemCatalog;
use super::individual::{Fitness, Individual, ItemSet};
use crate::genealogy::{GenealogyTracker, TrackerError};
use crate::schema::FeasibilityBounds;

/// Fitness assigned to every infeasible knapsack.
pub const INFEASIBLE_FITNESS: Fitness = Fitness {
    weight: 10000.0,
    value: 0.0,
};

/// Evaluates knapsacks against a catalog and feasibility bounds.
#[derive(Debug, Clone)]
pub struct FitnessEvaluator {
    catalog: ItemCatalog,
    bounds: FeasibilityBounds,
}

impl FitnessEvaluator {
    /// Create a new fitness evaluator.
    pub fn new(catalog: ItemCatalog, bounds: FeasibilityBounds) -> Self {
        Self { catalog, bounds }
    }

    /// Catalog the sums are taken over.
    pub fn catalog(&self) -> &ItemCatalog {
        &self.catalog
    }

    /// Literal (weight, value) sums over the contents.
    ///
    /// `None` when the contents hold an id outside the catalog.
    pub fn totals(&self, contents: &ItemSet) -> Option<Fitness> {
        contents
            .iter()
            .try_fold(Fitness::new(0.0, 0.0), |acc, &id| {
                let item = self.catalog.get(id)?;
                Some(Fitness::new(acc.weight + item.weight, acc.value + item.value))
            })
    }

    /// Whether the contents respect both the item count and weight bounds.
    ///
    /// Contents naming an unknown item are never feasible.
    pub fn is_feasible(&self, contents: &ItemSet) -> bool {
        self.totals(contents)
            .is_some_and(|totals| self.is_within(contents, totals))
    }

    /// Fitness of the contents, forced to [`INFEASIBLE_FITNESS`] out of bounds.
    pub fn compute(&self, contents: &ItemSet) -> Fitness {
        match self.totals(contents) {
            Some(totals) if self.is_within(contents, totals) => totals,
            _ => INFEASIBLE_FITNESS,
        }
    }

    fn is_within(&self, contents: &ItemSet, totals: Fitness) -> bool {
        contents.len() <= self.bounds.max_item && totals.weight <= self.bounds.max_weight
    }

    /// Evaluate an individual, report fitness and score, and store the fitness.
    pub fn evaluate<T: GenealogyTracker + ?Sized>(
        &self,
        individual: &mut Individual,
        tracker: &mut T,
    ) -> Result<Fitness, TrackerError> {
        let fitness = self.compute(&individual.contents);
        report(individual, fitness, tracker)?;
        Ok(fitness)
    }

    /// Evaluate every individual lacking a fitness, returning how many ran.
    ///
    /// With `parallel` the sums are computed on the rayon pool; tracker calls
    /// are always issued sequentially in population order.
    pub fn evaluate_invalid<T: GenealogyTracker + ?Sized>(
        &self,
        population: &mut [Individual],
        tracker: &mut T,
        parallel: bool,
    ) -> Result<usize, TrackerError> {
        let pending: Vec<usize> = population
            .iter()
            .enumerate()
            .filter(|(_, ind)| !ind.is_evaluated())
            .map(|(i, _)| i)
            .collect();

        let view: &[Individual] = population;
        let fitnesses: Vec<Fitness> = if parallel {
            pending
                .par_iter()
                .map(|&i| self.compute(&view[i].contents))
                .collect()
        } else {
            pending
                .iter()
                .map(|&i| self.compute(&view[i].contents))
                .collect()
        };

        for (&i, fitness) in pending.iter().zip(fitnesses) {
            report(&mut population[i], fitness, tracker)?;
        }
        Ok(pending.len())
    }
}

fn report<T: GenealogyTracker + ?Sized>(
    individual: &mut Individual,
    fitness: Fitness,
    tracker: &mut T,
) -> Result<(), TrackerError> {
    tracker.update_fitness(individual.concrete_id, fitness)?;
    tracker.update_score(individual.concrete_id, fitness.score())?;
    individual.fitness = Some(fitness);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::catalog::Item;
    use crate::genealogy::GraphTracker;
    use proptest::prelude::*;

    fn catalog() -> ItemCatalog {
        ItemCatalog::from_items(
            (0..10)
                .map(|i| Item {
                    weight: (i + 1) as f64,
                    value: 10.0 * i as f64,
                })
                .collect(),
        )
    }

    fn evaluator(max_item: usize, max_weight: f64) -> FitnessEvaluator {
        FitnessEvaluator::new(
            catalog(),
            FeasibilityBounds {
                max_item,
                max_weight,
            },
        )
    }

    fn set(ids: &[usize]) -> ItemSet {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_feasible_sums() {
        let eval = evaluator(50, 50.0);
        assert_eq!(eval.compute(&set(&[0, 2, 4])), Fitness::new(9.0, 60.0));
        assert_eq!(eval.compute(&set(&[])), Fitness::new(0.0, 0.0));
    }

    #[test]
    fn test_weight_bound_is_inclusive() {
        let eval = evaluator(50, 10.0);
        // weights 1 + 2 + 3 + 4 = 10
        assert_eq!(eval.compute(&set(&[0, 1, 2, 3])), Fitness::new(10.0, 60.0));
        assert_eq!(eval.compute(&set(&[0, 1, 2, 4])), INFEASIBLE_FITNESS);
    }

    #[test]
    fn test_item_count_bound() {
        let eval = evaluator(2, 1000.0);
        assert!(eval.is_feasible(&set(&[1, 2])));
        assert!(!eval.is_feasible(&set(&[1, 2, 3])));
        assert_eq!(eval.compute(&set(&[1, 2, 3])), INFEASIBLE_FITNESS);
    }

    #[test]
    fn test_unknown_item_is_infeasible() {
        let eval = evaluator(50, 50.0);
        let contents = set(&[0, 10]);
        assert_eq!(eval.totals(&contents), None);
        assert!(!eval.is_feasible(&contents));
        assert_eq!(eval.compute(&contents), INFEASIBLE_FITNESS);
        assert_eq!(eval.totals(&set(&[0, 9])), Some(Fitness::new(11.0, 90.0)));
    }

    #[test]
    fn test_evaluate_reports_to_tracker() {
        let eval = evaluator(50, 50.0);
        let mut graph = GraphTracker::new("test", "0");
        let contents = set(&[1, 3]);
        let concrete_id = graph.deploy(&contents).unwrap();
        let mut individual = Individual {
            contents,
            fitness: None,
            concrete_id,
        };

        let fitness = eval.evaluate(&mut individual, &mut graph).unwrap();
        assert_eq!(fitness, Fitness::new(6.0, 40.0));
        assert_eq!(individual.fitness, Some(fitness));
        let node = graph.node(concrete_id).unwrap();
        assert_eq!(node.fitness, Some(fitness));
        assert_eq!(node.score, Some(34.0));
    }

    #[test]
    fn test_infeasible_still_reported() {
        let eval = evaluator(1, 50.0);
        let mut graph = GraphTracker::new("test", "0");
        let contents = set(&[1, 3]);
        let concrete_id = graph.deploy(&contents).unwrap();
        let mut individual = Individual {
            contents,
            fitness: None,
            concrete_id,
        };

        eval.evaluate(&mut individual, &mut graph).unwrap();
        let node = graph.node(concrete_id).unwrap();
        assert_eq!(node.fitness, Some(INFEASIBLE_FITNESS));
        assert_eq!(node.score, Some(-10000.0));
    }

    fn deployed(graph: &mut GraphTracker, sets: &[&[usize]]) -> Vec<Individual> {
        sets.iter()
            .map(|ids| {
                let contents = set(ids);
                let concrete_id = graph.deploy(&contents).unwrap();
                Individual {
                    contents,
                    fitness: None,
                    concrete_id,
                }
            })
            .collect()
    }

    #[test]
    fn test_evaluate_invalid_skips_scored() {
        let eval = evaluator(50, 50.0);
        for parallel in [false, true] {
            let mut graph = GraphTracker::new("test", "0");
            let mut population = deployed(&mut graph, &[&[0], &[1], &[2]]);
            eval.evaluate(&mut population[1], &mut graph).unwrap();

            // A second write for individual 1 would be rejected by the graph.
            let count = eval
                .evaluate_invalid(&mut population, &mut graph, parallel)
                .unwrap();
            assert_eq!(count, 2);
            assert_eq!(population[0].fitness, Some(Fitness::new(1.0, 0.0)));
            assert_eq!(population[1].fitness, Some(Fitness::new(2.0, 10.0)));
            assert_eq!(population[2].fitness, Some(Fitness::new(3.0, 20.0)));
            assert!(graph.nodes().iter().all(|n| n.score.is_some()));
        }
    }

    proptest! {
        #[test]
        fn prop_fitness_matches_bounds(ids in proptest::collection::btree_set(0usize..10, 0..10),
                                       max_item in 0usize..10,
                                       max_weight in 0.0f64..60.0) {
            let eval = evaluator(max_item, max_weight);
            let weight: f64 = ids.iter().map(|&i| (i + 1) as f64).sum();
            let value: f64 = ids.iter().map(|&i| 10.0 * i as f64).sum();
            let fitness = eval.compute(&ids);
            if ids.len() <= max_item && weight <= max_weight {
                prop_assert_eq!(fitness, Fitness::new(weight, value));
            } else {
                prop_assert_eq!(fitness, INFEASIBLE_FITNESS);
            }
        }
    }
}
