//! Breeding adapter: runs a variation operator and records the lineage.

use super::error::EvolutionError;
use super::individual::{Individual, ItemSet};
use super::rng::EvolutionRng;
use super::variation::{cx_set, mut_set};
use crate::genealogy::{ConcreteId, GenealogyTracker, OperatorAttrs};

/// Attribute key naming the operator on every breeding edge.
pub const OPERATOR_ATTR: &str = "operator";

/// Wraps variation operators so every child is deployed and linked to its
/// parents before it re-enters the population.
#[derive(Debug, Clone, Copy)]
pub struct Breeder {
    domain: usize,
}

impl Breeder {
    pub fn new(domain: usize) -> Self {
        Self { domain }
    }

    /// Breed children from `parents` with an arbitrary operator.
    ///
    /// Parent ids are captured before `op` runs. Each child is deployed in
    /// order and receives one edge per parent tagged with `generation` and
    /// `attrs`. Children never carry a parent's id and have no fitness.
    pub fn breed<T, F>(
        &self,
        tracker: &mut T,
        parents: &[&Individual],
        generation: usize,
        attrs: &OperatorAttrs,
        op: F,
    ) -> Result<Vec<Individual>, EvolutionError>
    where
        T: GenealogyTracker + ?Sized,
        F: FnOnce(&[&ItemSet]) -> Vec<ItemSet>,
    {
        let parent_ids: Vec<ConcreteId> = parents.iter().map(|p| p.concrete_id).collect();
        let contents: Vec<&ItemSet> = parents.iter().map(|p| &p.contents).collect();

        let mut children = Vec::new();
        for child in op(contents.as_slice()) {
            let concrete_id = tracker.deploy(&child)?;
            let edges = tracker.set_parents(concrete_id, &parent_ids, generation, attrs)?;
            log::debug!(
                "gen {generation}: {parent_ids:?} --{edges:?}--> {concrete_id} ({:?})",
                attrs.get(OPERATOR_ATTR)
            );
            children.push(Individual {
                contents: child,
                fitness: None,
                concrete_id,
            });
        }
        Ok(children)
    }

    /// Cross two individuals with [`cx_set`].
    pub fn crossover<T: GenealogyTracker + ?Sized>(
        &self,
        tracker: &mut T,
        a: &Individual,
        b: &Individual,
        generation: usize,
    ) -> Result<(Individual, Individual), EvolutionError> {
        let attrs = operator_attrs("cx_set");
        let mut children = self
            .breed(tracker, &[a, b], generation, &attrs, |parents| {
                let (intersection, difference) = cx_set(parents[0], parents[1]);
                vec![intersection, difference]
            })?
            .into_iter();
        match (children.next(), children.next()) {
            (Some(first), Some(second)) => Ok((first, second)),
            _ => Err(EvolutionError::OperatorArity {
                operator: "cx_set",
                expected: 2,
            }),
        }
    }

    /// Mutate an individual with [`mut_set`].
    pub fn mutate<T: GenealogyTracker + ?Sized>(
        &self,
        tracker: &mut T,
        individual: &Individual,
        generation: usize,
        rng: &mut EvolutionRng,
    ) -> Result<Individual, EvolutionError> {
        let attrs = operator_attrs("mut_set");
        let domain = self.domain;
        let mut children = self.breed(tracker, &[individual], generation, &attrs, |parents| {
            vec![mut_set(parents[0], domain, rng)]
        })?;
        children.pop().ok_or(EvolutionError::OperatorArity {
            operator: "mut_set",
            expected: 1,
        })
    }
}

/// Attributes tagging an edge with the operator that produced it.
pub fn operator_attrs(name: &str) -> OperatorAttrs {
    OperatorAttrs::from([(OPERATOR_ATTR.to_string(), name.to_string())])
}
