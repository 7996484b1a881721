//! Tournament selection over an evaluated population.

use std::cmp::Ordering;

use super::error::EvolutionError;
use super::individual::{Fitness, Individual};
use super::rng::EvolutionRng;

/// Select `count` individuals by repeated `tournament_size`-way tournaments.
///
/// Aspirants are drawn uniformly with replacement. The winner is the
/// aspirant with the greatest weighted fitness under lexicographic order;
/// on ties the first drawn wins. Winners are cloned, identity included.
pub fn select_tournament(
    population: &[Individual],
    count: usize,
    tournament_size: usize,
    rng: &mut EvolutionRng,
) -> Result<Vec<Individual>, EvolutionError> {
    if tournament_size == 0 || tournament_size > population.len() {
        return Err(EvolutionError::TournamentTooLarge {
            size: tournament_size,
            population: population.len(),
        });
    }
    let fitnesses: Vec<Fitness> = population
        .iter()
        .map(|ind| ind.fitness.ok_or(EvolutionError::MissingFitness(ind.concrete_id)))
        .collect::<Result<_, _>>()?;

    let mut chosen = Vec::with_capacity(count);
    for _ in 0..count {
        let mut best_idx = rng.index(population.len());
        for _ in 1..tournament_size {
            let idx = rng.index(population.len());
            if fitnesses[idx].compare(&fitnesses[best_idx]) == Ordering::Greater {
                best_idx = idx;
            }
        }
        chosen.push(population[best_idx].clone());
    }
    log::debug!(
        "Selected {} individuals with {}-way tournaments",
        chosen.len(),
        tournament_size
    );
    Ok(chosen)
}
