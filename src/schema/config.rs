//! Configuration types for knapsack evolution runs.

use serde::{Deserialize, Serialize};

use crate::evolution::INFEASIBLE_FITNESS;

/// Top-level run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Population and generation settings.
    #[serde(default)]
    pub population: PopulationConfig,
    /// Variation and selection settings.
    #[serde(default)]
    pub variation: VariationConfig,
    /// Item catalog generation settings.
    #[serde(default)]
    pub items: ItemConfig,
    /// Feasibility bounds for a knapsack.
    #[serde(default)]
    pub bounds: FeasibilityBounds,
    /// Genealogy graph settings.
    #[serde(default)]
    pub genealogy: GenealogyConfig,
    /// Random seed for reproducibility.
    #[serde(default = "default_random_seed")]
    pub random_seed: u64,
    /// Compute fitness values on the rayon pool.
    #[serde(default)]
    pub parallel_evaluation: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population: PopulationConfig::default(),
            variation: VariationConfig::default(),
            items: ItemConfig::default(),
            bounds: FeasibilityBounds::default(),
            genealogy: GenealogyConfig::default(),
            random_seed: default_random_seed(),
            parallel_evaluation: false,
        }
    }
}

fn default_random_seed() -> u64 {
    64
}

/// Population and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of individuals kept between generations (MU).
    #[serde(default = "default_population_size")]
    pub size: usize,
    /// Number of generations to run (NGEN).
    #[serde(default = "default_generations")]
    pub generations: usize,
    /// Item draws per freshly created individual.
    #[serde(default = "default_initial_size")]
    pub initial_size: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: default_population_size(),
            generations: default_generations(),
            initial_size: default_initial_size(),
        }
    }
}

fn default_population_size() -> usize {
    50
}
fn default_generations() -> usize {
    500
}
fn default_initial_size() -> usize {
    5
}

/// Variation and selection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariationConfig {
    /// Probability that an adjacent pair is crossed (CXPB).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Probability that an individual is mutated (MUTPB).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Aspirants per tournament.
    #[serde(default = "default_tournament_size")]
    pub tournament_size: usize,
}

impl Default for VariationConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            tournament_size: default_tournament_size(),
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.5
}
fn default_mutation_rate() -> f64 {
    0.3
}
fn default_tournament_size() -> usize {
    3
}

/// Item catalog generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemConfig {
    /// Number of items (N).
    #[serde(default = "default_item_count")]
    pub count: usize,
    /// Inclusive integer range item weights are drawn from.
    #[serde(default = "default_weight_range")]
    pub weight_range: (u32, u32),
    /// Half-open range item values are drawn from.
    #[serde(default = "default_value_range")]
    pub value_range: (f64, f64),
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            count: default_item_count(),
            weight_range: default_weight_range(),
            value_range: default_value_range(),
        }
    }
}

fn default_item_count() -> usize {
    20
}
fn default_weight_range() -> (u32, u32) {
    (1, 10)
}
fn default_value_range() -> (f64, f64) {
    (0.0, 100.0)
}

/// Bounds a knapsack must respect to be feasible.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeasibilityBounds {
    /// Maximum number of distinct items.
    #[serde(default = "default_max_item")]
    pub max_item: usize,
    /// Maximum summed weight.
    #[serde(default = "default_max_weight")]
    pub max_weight: f64,
}

impl Default for FeasibilityBounds {
    fn default() -> Self {
        Self {
            max_item: default_max_item(),
            max_weight: default_max_weight(),
        }
    }
}

fn default_max_item() -> usize {
    50
}
fn default_max_weight() -> f64 {
    50.0
}

/// Genealogy graph settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenealogyConfig {
    /// Graph name, used in the export filename.
    #[serde(default = "default_genealogy_name")]
    pub name: String,
    /// Directory the graph is written to on save.
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl Default for GenealogyConfig {
    fn default() -> Self {
        Self {
            name: default_genealogy_name(),
            output_dir: None,
        }
    }
}

fn default_genealogy_name() -> String {
    "knapsack_tournament".to_string()
}

impl RunConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.items.count == 0 {
            return Err(ConfigError::NoItems);
        }

        let check_probability = |value: f64, name: &'static str| {
            if (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(ConfigError::InvalidProbability { name, value })
            }
        };
        check_probability(self.variation.crossover_rate, "crossover_rate")?;
        check_probability(self.variation.mutation_rate, "mutation_rate")?;

        let tournament = self.variation.tournament_size;
        if tournament == 0 || tournament > self.population.size {
            return Err(ConfigError::InvalidTournamentSize {
                size: tournament,
                population: self.population.size,
            });
        }

        let (w_lo, w_hi) = self.items.weight_range;
        if w_lo == 0 || w_lo > w_hi {
            return Err(ConfigError::InvalidRange(format!(
                "weight range ({w_lo}, {w_hi}) must be positive and ordered"
            )));
        }
        let (v_lo, v_hi) = self.items.value_range;
        if !(v_lo >= 0.0 && v_lo < v_hi) {
            return Err(ConfigError::InvalidRange(format!(
                "value range ({v_lo}, {v_hi}) must be non-negative and non-empty"
            )));
        }

        if !(self.bounds.max_weight >= 0.0) {
            return Err(ConfigError::InvalidMaxWeight(self.bounds.max_weight));
        }
        // Feasible knapsacks must stay lighter than the infeasibility sentinel.
        if self.bounds.max_weight >= INFEASIBLE_FITNESS.weight {
            return Err(ConfigError::MaxWeightReachesSentinel {
                max_weight: self.bounds.max_weight,
                sentinel: INFEASIBLE_FITNESS.weight,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Item count must be non-zero")]
    NoItems,
    #[error("Probability {name} must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Tournament size {size} must be in 1..={population}")]
    InvalidTournamentSize { size: usize, population: usize },
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Maximum weight must be non-negative, got {0}")]
    InvalidMaxWeight(f64),
    #[error("Maximum weight {max_weight} must stay below the infeasible weight {sentinel}")]
    MaxWeightReachesSentinel { max_weight: f64, sentinel: f64 },
}
