//! Set-based variation operators.
//!
//! Both operators are pure: they read their inputs and return new sets.
//! Assigning identity to the outputs is the breeder's job.

use super::individual::ItemSet;
use super::rng::EvolutionRng;

/// Crossover on sets.
///
/// The first child is the intersection of the parents, the second their
/// symmetric difference. Both are computed from the unmodified `a`.
pub fn cx_set(a: &ItemSet, b: &ItemSet) -> (ItemSet, ItemSet) {
    let intersection = a.intersection(b).copied().collect();
    let difference = a.symmetric_difference(b).copied().collect();
    (intersection, difference)
}

/// Mutation that removes or adds one item.
///
/// With probability 0.5 a uniformly chosen element (by sorted position) is
/// removed; otherwise, or when the set is empty, an id drawn from
/// `[0, domain)` is added. Adding an id already present leaves the set as is.
pub fn mut_set(contents: &ItemSet, domain: usize, rng: &mut EvolutionRng) -> ItemSet {
    let mut child = contents.clone();
    if rng.unit() < 0.5 && !child.is_empty() {
        let position = rng.index(child.len());
        if let Some(&item) = child.iter().nth(position) {
            child.remove(&item);
        }
    } else {
        child.insert(rng.index(domain));
    }
    child
}
