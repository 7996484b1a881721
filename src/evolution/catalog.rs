//! Item catalog: the fixed (weight, value) table a run optimizes over.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::individual::ItemId;
use super::rng::EvolutionRng;
use crate::schema::ItemConfig;

/// A single knapsack item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub weight: f64,
    pub value: f64,
}

/// Immutable mapping from item id to item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    /// Generate `count` items, drawing weight then value for each id in order.
    pub fn generate(
        count: usize,
        weight_range: (u32, u32),
        value_range: (f64, f64),
        rng: &mut EvolutionRng,
    ) -> Self {
        let items = (0..count)
            .map(|_| {
                let weight = rng.integer(weight_range) as f64;
                let value = rng.uniform(value_range);
                Item { weight, value }
            })
            .collect();
        Self { items }
    }

    /// Generate from an item configuration.
    pub fn from_config(config: &ItemConfig, rng: &mut EvolutionRng) -> Self {
        Self::generate(config.count, config.weight_range, config.value_range, rng)
    }

    /// Build from explicit items.
    pub fn from_items(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Item for `id`, `None` outside the catalog.
    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    /// Number of items, which is also the id domain size.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items paired with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (ItemId, &Item)> {
        self.items.iter().enumerate()
    }
}

impl fmt::Display for ItemCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (id, item) in self.iter() {
            writeln!(f, "{id:>3}: weight={:>4} value={:>8.3}", item.weight, item.value)?;
        }
        Ok(())
    }
}
