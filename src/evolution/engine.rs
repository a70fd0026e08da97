//! Fixed-budget generational evolution over image individuals

use crate::evolution::individual::Individual;
use crate::evolution::operators::Operators;
use crate::io::configuration::{NUM_GEN, NUM_IND, PROB_MATE, PROB_MUT};
use crate::io::error::{Result, computation_error, invalid_parameter};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Budget and probabilities of one evolution run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvolutionParams {
    /// Individuals per generation
    pub population_size: usize,
    /// Generations to perform; there is no early stopping
    pub generations: usize,
    /// Probability that an adjacent offspring pair is crossed over
    pub prob_mate: f64,
    /// Probability that an offspring is mutated
    pub prob_mut: f64,
}

impl Default for EvolutionParams {
    fn default() -> Self {
        Self {
            population_size: NUM_IND,
            generations: NUM_GEN,
            prob_mate: PROB_MATE,
            prob_mut: PROB_MUT,
        }
    }
}

impl EvolutionParams {
    /// Check that the parameters describe a runnable evolution
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The population size is zero
    /// - Either probability lies outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(invalid_parameter(
                "population_size",
                &self.population_size,
                &"must be at least 1",
            ));
        }
        for (name, value) in [("prob_mate", self.prob_mate), ("prob_mut", self.prob_mut)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid_parameter(name, &value, &"must be within [0, 1]"));
            }
        }
        Ok(())
    }
}

/// Lifecycle of an engine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineState {
    /// Population evaluated, no generation performed yet
    Initialized,
    /// At least one generation performed, budget not yet exhausted
    Running {
        /// Generations completed so far
        generation: usize,
    },
    /// All generations performed
    Converged,
}

/// Summary of one completed generation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GenerationStats {
    /// One-based index of the generation
    pub generation: usize,
    /// Highest fitness in the new population
    pub best_fitness: f64,
    /// Mean fitness of the new population
    pub mean_fitness: f64,
    /// Individuals re-scored because crossover or mutation changed them
    pub evaluations: usize,
}

/// Generational genetic algorithm with injected operators
///
/// Each generation selects a full population by tournament, clones the winners,
/// crosses adjacent pairs, mutates, re-scores anything changed and replaces the
/// population wholesale.
pub struct EvolutionEngine {
    params: EvolutionParams,
    operators: Operators,
    population: Vec<Individual>,
    rng: StdRng,
    generation: usize,
    state: EngineState,
}

impl EvolutionEngine {
    /// Create an engine and evaluate every individual once
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `params` fail validation
    /// - `population` is empty
    pub fn new(
        mut population: Vec<Individual>,
        params: EvolutionParams,
        operators: Operators,
        seed: u64,
    ) -> Result<Self> {
        params.validate()?;
        if population.is_empty() {
            return Err(invalid_parameter(
                "population",
                &0,
                &"must contain at least one individual",
            ));
        }

        for individual in &mut population {
            let fitness = (operators.evaluate)(individual);
            individual.set_fitness(fitness);
        }

        Ok(Self {
            params,
            operators,
            population,
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            state: EngineState::Initialized,
        })
    }

    /// Current population
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Generations completed so far
    pub const fn generation(&self) -> usize {
        self.generation
    }

    /// Current lifecycle state
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Perform one generation
    ///
    /// Returns `None` once the generation budget is exhausted, leaving the
    /// population untouched.
    pub fn step(&mut self) -> Option<GenerationStats> {
        if self.generation >= self.params.generations {
            self.state = EngineState::Converged;
            return None;
        }

        let mut offspring: Vec<Individual> =
            (self.operators.select)(&self.population, self.population.len(), &mut self.rng)
                .into_iter()
                .cloned()
                .collect();

        for pair in offspring.chunks_exact_mut(2) {
            if let [first, second] = pair {
                if self.rng.random::<f64>() < self.params.prob_mate {
                    (self.operators.mate)(first, second, &mut self.rng);
                    first.invalidate_fitness();
                    second.invalidate_fitness();
                }
            }
        }

        for individual in &mut offspring {
            if self.rng.random::<f64>() < self.params.prob_mut {
                (self.operators.mutate)(individual, &mut self.rng);
                individual.invalidate_fitness();
            }
        }

        let mut evaluations = 0;
        for individual in &mut offspring {
            if individual.fitness().is_none() {
                individual.fitness_or_evaluate(&self.operators.evaluate);
                evaluations += 1;
            }
        }

        self.population = offspring;
        self.generation += 1;
        self.state = if self.generation >= self.params.generations {
            EngineState::Converged
        } else {
            EngineState::Running {
                generation: self.generation,
            }
        };

        let stats = self.stats(evaluations);
        tracing::debug!(
            generation = stats.generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            evaluations = stats.evaluations,
            "generation complete"
        );
        Some(stats)
    }

    /// Perform every remaining generation and return the best individual
    ///
    /// `on_generation` observes each generation as it completes.
    ///
    /// # Errors
    ///
    /// Returns an error if the final population holds no scored individual
    pub fn run(&mut self, mut on_generation: impl FnMut(&GenerationStats)) -> Result<&Individual> {
        tracing::info!(
            generations = self.params.generations,
            population = self.population.len(),
            "starting evolution"
        );

        while let Some(stats) = self.step() {
            on_generation(&stats);
        }
        self.state = EngineState::Converged;

        let best = self
            .best()
            .ok_or_else(|| computation_error("run", &"final population has no fitness"))?;
        tracing::info!(
            fitness = best.fitness().unwrap_or(f64::NAN),
            width = best.width(),
            height = best.height(),
            "evolution converged"
        );
        Ok(best)
    }

    /// Fittest individual of the current population
    ///
    /// Ties go to the individual that appears first. Unscored individuals are
    /// ignored.
    pub fn best(&self) -> Option<&Individual> {
        let mut best: Option<(&Individual, f64)> = None;
        for individual in &self.population {
            let Some(fitness) = individual.fitness() else {
                continue;
            };
            if best.is_none_or(|(_, top)| fitness > top) {
                best = Some((individual, fitness));
            }
        }
        best.map(|(individual, _)| individual)
    }

    fn stats(&self, evaluations: usize) -> GenerationStats {
        let scores: Vec<f64> = self
            .population
            .iter()
            .filter_map(Individual::fitness)
            .collect();
        let best_fitness = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean_fitness = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        GenerationStats {
            generation: self.generation,
            best_fitness,
            mean_fitness,
            evaluations,
        }
    }
}
