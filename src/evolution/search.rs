//! Generational loop: select, vary through the breeder, evaluate, replace.

use std::time::Instant;

use super::breeding::Breeder;
use super::catalog::ItemCatalog;
use super::error::EvolutionError;
use super::fitness::FitnessEvaluator;
use super::individual::{Individual, IndividualFactory};
use super::rng::EvolutionRng;
use super::selection::select_tournament;
use super::statistics;
use crate::genealogy::{GenealogyTracker, GraphTracker, TrackerError};
use crate::schema::{EvolutionPhase, GenerationRecord, Logbook, RunConfig, RunStats};

/// Everything a finished run produces.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Population after the last generation.
    pub population: Vec<Individual>,
    /// One record per generation, starting with generation 0.
    pub logbook: Logbook,
    /// Best value-objective individual of the final population.
    pub best: Option<Individual>,
    pub stats: RunStats,
}

/// Evolution engine that runs the generational loop.
///
/// A single [`EvolutionRng`] seeded from the configuration drives catalog
/// generation, initialization, selection and variation, in that order.
pub struct EvolutionEngine<T: GenealogyTracker> {
    config: RunConfig,
    rng: EvolutionRng,
    evaluator: FitnessEvaluator,
    factory: IndividualFactory,
    breeder: Breeder,
    tracker: T,
    population: Vec<Individual>,
    logbook: Logbook,
    generation: usize,
    deployed: u64,
    phase: EvolutionPhase,
}

impl EvolutionEngine<GraphTracker> {
    /// Create an engine backed by an in-memory [`GraphTracker`] built from the
    /// genealogy section of the configuration.
    pub fn with_graph(config: RunConfig) -> Result<Self, EvolutionError> {
        let mut tracker =
            GraphTracker::new(config.genealogy.name.clone(), config.random_seed.to_string());
        if let Some(dir) = &config.genealogy.output_dir {
            tracker = tracker
                .with_output_dir(dir)
                .map_err(TrackerError::from)?;
        }
        Self::new(config, tracker)
    }
}

impl<T: GenealogyTracker> EvolutionEngine<T> {
    /// Validate the configuration and generate the item catalog.
    pub fn new(config: RunConfig, tracker: T) -> Result<Self, EvolutionError> {
        config.validate()?;

        let mut rng = EvolutionRng::new(config.random_seed);
        let catalog = ItemCatalog::from_config(&config.items, &mut rng);
        let factory = IndividualFactory::new(catalog.len())?;
        let breeder = Breeder::new(catalog.len());
        let evaluator = FitnessEvaluator::new(catalog, config.bounds);

        Ok(Self {
            config,
            rng,
            evaluator,
            factory,
            breeder,
            tracker,
            population: Vec::new(),
            logbook: Logbook::new(),
            generation: 0,
            deployed: 0,
            phase: EvolutionPhase::Initializing,
        })
    }

    /// Item table generated from the seed.
    pub fn catalog(&self) -> &ItemCatalog {
        self.evaluator.catalog()
    }

    /// Current population, in slot order.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    pub fn logbook(&self) -> &Logbook {
        &self.logbook
    }

    /// Genealogy store the engine reports to.
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Consume the engine, returning the genealogy store.
    pub fn into_tracker(self) -> T {
        self.tracker
    }

    /// Last recorded generation, 0 after initialization.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn phase(&self) -> EvolutionPhase {
        self.phase
    }

    /// Build and evaluate the initial population, recording generation 0.
    ///
    /// An engine runs once; a second call fails with
    /// [`EvolutionError::AlreadyStarted`] and leaves the genealogy untouched.
    pub fn initialize(&mut self) -> Result<GenerationRecord, EvolutionError> {
        if self.phase != EvolutionPhase::Initializing || !self.population.is_empty() {
            return Err(EvolutionError::AlreadyStarted);
        }

        let size = self.config.population.size;
        self.population = self.factory.population(
            size,
            self.config.population.initial_size,
            &mut self.rng,
            &mut self.tracker,
        )?;
        self.deployed += size as u64;

        let evaluations = self.evaluate_population()?;
        Ok(self.record(evaluations))
    }

    /// Run one generation: select, vary, evaluate the varied, replace.
    pub fn step_generation(&mut self) -> Result<GenerationRecord, EvolutionError> {
        let generation = self.generation + 1;

        self.phase = EvolutionPhase::Selecting;
        let offspring = select_tournament(
            &self.population,
            self.population.len(),
            self.config.variation.tournament_size,
            &mut self.rng,
        )?;

        self.phase = EvolutionPhase::Varying;
        self.population = self.vary(offspring, generation)?;
        self.generation = generation;

        let evaluations = self.evaluate_population()?;
        Ok(self.record(evaluations))
    }

    /// Crossover pass over adjacent pairs, then mutation pass over everyone.
    ///
    /// Untouched individuals keep their fitness and identity.
    fn vary(
        &mut self,
        mut offspring: Vec<Individual>,
        generation: usize,
    ) -> Result<Vec<Individual>, EvolutionError> {
        let crossover_rate = self.config.variation.crossover_rate;
        let mutation_rate = self.config.variation.mutation_rate;

        for i in (1..offspring.len()).step_by(2) {
            if self.rng.unit() < crossover_rate {
                let (first, second) = self.breeder.crossover(
                    &mut self.tracker,
                    &offspring[i - 1],
                    &offspring[i],
                    generation,
                )?;
                offspring[i - 1] = first;
                offspring[i] = second;
                self.deployed += 2;
            }
        }

        for slot in offspring.iter_mut() {
            if self.rng.unit() < mutation_rate {
                *slot = self
                    .breeder
                    .mutate(&mut self.tracker, slot, generation, &mut self.rng)?;
                self.deployed += 1;
            }
        }

        Ok(offspring)
    }

    /// Evaluate every individual lacking a fitness.
    fn evaluate_population(&mut self) -> Result<usize, EvolutionError> {
        self.phase = EvolutionPhase::Evaluating;
        let evaluations = self.evaluator.evaluate_invalid(
            &mut self.population,
            &mut self.tracker,
            self.config.parallel_evaluation,
        )?;
        Ok(evaluations)
    }

    fn record(&mut self, evaluations: usize) -> GenerationRecord {
        let record = statistics::compile(self.generation, evaluations, &self.population);
        log::info!("{}", Logbook::stream_line(&record));
        self.logbook.record(record.clone());
        record
    }

    /// Run all generations, calling `callback` after each recorded generation,
    /// then persist the genealogy.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> Result<RunResult, EvolutionError>
    where
        F: FnMut(&GenerationRecord),
    {
        let start_time = Instant::now();
        log::info!(
            "Evolving {} individuals over {} items for {} generations (seed {})",
            self.config.population.size,
            self.catalog().len(),
            self.config.population.generations,
            self.config.random_seed
        );
        log::info!("{}", Logbook::header_line());

        let record = self.initialize()?;
        callback(&record);

        for _ in 0..self.config.population.generations {
            let record = self.step_generation()?;
            callback(&record);
        }

        log::info!("Writing genealogy...");
        self.tracker.save()?;
        self.phase = EvolutionPhase::Terminated;

        Ok(RunResult {
            population: self.population.clone(),
            logbook: self.logbook.clone(),
            best: best_by_value(&self.population).cloned(),
            stats: RunStats {
                generations: self.generation,
                total_evaluations: self.logbook.total_evaluations(),
                individuals_deployed: self.deployed,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
            },
        })
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> Result<RunResult, EvolutionError> {
        self.run_with_callback(|_| {})
    }
}

/// Evaluated individual with the greatest value; ties go to the lighter one.
pub fn best_by_value(population: &[Individual]) -> Option<&Individual> {
    population
        .iter()
        .filter_map(|ind| ind.fitness.map(|f| (ind, f)))
        .max_by(|(_, a), (_, b)| {
            a.value
                .total_cmp(&b.value)
                .then_with(|| b.weight.total_cmp(&a.weight))
        })
        .map(|(ind, _)| ind)
}
