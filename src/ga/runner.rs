//! GA generation driver.
//!
//! [`GaRunner`] owns the population, the best tour found so far and the
//! random generator, and advances the search one generation at a time:
//! elitism → selection → crossover → mutation → evaluation → repeat.

use super::config::GaConfig;
use super::error::GaError;
use super::fitness::TspInstance;
use super::operators::{order_crossover, swap_mutation};
use super::selection::tournament_select;
use super::types::{GenerationalSearch, Tour};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

/// Upper bound on the fitness history reserved up front; the history
/// grows past it as generations are produced.
const HISTORY_RESERVE: usize = 1024;

/// Lifecycle of a [`GaRunner`].
///
/// A runner rests in `Idle` between generations. One call to
/// [`GaRunner::next_generation`] passes through `Breeding` and
/// `Evaluating`, then lands in `Idle` again or in `Done` once the
/// generation limit is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    /// Ready to produce the next generation.
    Idle,
    /// Building the offspring gene sequences.
    Breeding,
    /// Computing fitness for the new population.
    Evaluating,
    /// The stopping criterion has been met.
    Done,
}

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaResult {
    /// The best tour found during the entire run.
    pub best: Tour,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Total number of generations produced.
    pub generations: usize,

    /// Best-so-far fitness for the initial population and after each
    /// generation.
    pub fitness_history: Vec<f64>,
}

/// Generational GA for the TSP.
///
/// # Usage
///
/// ```
/// use tsp_ga::ga::{City, GaConfig, GaRunner, TspInstance};
///
/// let instance = TspInstance::new(vec![
///     City::new(0.0, 0.0),
///     City::new(0.0, 1.0),
///     City::new(1.0, 1.0),
///     City::new(1.0, 0.0),
/// ]);
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let result = GaRunner::solve(instance, config).unwrap();
/// assert!((result.best_fitness - 4.0).abs() < 1e-9);
/// ```
#[derive(Debug)]
pub struct GaRunner<R: Rng = StdRng> {
    instance: TspInstance,
    config: GaConfig,
    rng: R,
    population: Vec<Tour>,
    best: Tour,
    generation: usize,
    state: RunnerState,
    fitness_history: Vec<f64>,
}

impl GaRunner<StdRng> {
    /// Creates a runner with a random initial population.
    ///
    /// The generator is seeded from `config.seed`, or randomly when unset.
    pub fn new(instance: TspInstance, config: GaConfig) -> Result<Self, GaError> {
        config.validate()?;
        instance.check_coordinates()?;
        let mut rng = seeded_rng(config.seed);
        let population = instance.random_population(config.population_size, &mut rng);
        Self::from_evaluated(instance, config, population, rng)
    }

    /// Creates a runner from an externally built initial population.
    ///
    /// Each order must be a permutation of the instance's city indices,
    /// and there must be exactly `config.population_size` of them.
    pub fn with_population(
        instance: TspInstance,
        config: GaConfig,
        orders: Vec<Vec<usize>>,
    ) -> Result<Self, GaError> {
        let rng = seeded_rng(config.seed);
        Self::with_population_and_rng(instance, config, orders, rng)
    }

    /// Runs a fresh search to completion.
    pub fn solve(instance: TspInstance, config: GaConfig) -> Result<GaResult, GaError> {
        let mut runner = Self::new(instance, config)?;
        runner.run()?;
        Ok(runner.into_result())
    }
}

impl<R: Rng> GaRunner<R> {
    /// Creates a runner from an initial population and an injected
    /// generator. `config.seed` is ignored.
    pub fn with_population_and_rng(
        instance: TspInstance,
        config: GaConfig,
        orders: Vec<Vec<usize>>,
        rng: R,
    ) -> Result<Self, GaError> {
        config.validate()?;
        instance.check_coordinates()?;
        if orders.len() != config.population_size {
            return Err(GaError::PopulationSizeMismatch {
                expected: config.population_size,
                actual: orders.len(),
            });
        }
        let population = orders
            .into_iter()
            .map(|order| instance.evaluate_tour(order))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_evaluated(instance, config, population, rng)
    }

    fn from_evaluated(
        instance: TspInstance,
        config: GaConfig,
        population: Vec<Tour>,
        rng: R,
    ) -> Result<Self, GaError> {
        let best = find_best(&population)
            .cloned()
            .ok_or(GaError::PopulationSizeMismatch {
                expected: config.population_size,
                actual: 0,
            })?;

        let mut fitness_history =
            Vec::with_capacity(config.max_generations.min(HISTORY_RESERVE) + 1);
        fitness_history.push(best.fitness());

        let state = if config.max_generations == 0 {
            RunnerState::Done
        } else {
            RunnerState::Idle
        };

        debug!(
            cities = instance.len(),
            population = population.len(),
            best_fitness = best.fitness(),
            "initial population evaluated"
        );

        Ok(Self {
            instance,
            config,
            rng,
            population,
            best,
            generation: 0,
            state,
            fitness_history,
        })
    }

    /// Produces one generation and returns the best tour found so far.
    ///
    /// # Errors
    ///
    /// [`GaError::SearchFinished`] once `max_generations` generations have
    /// been produced. Selection or crossover failures are propagated and
    /// leave the current population untouched.
    #[instrument(level = "debug", skip(self), fields(generation = self.generation + 1))]
    pub fn next_generation(&mut self) -> Result<&Tour, GaError> {
        if self.state == RunnerState::Done {
            return Err(GaError::SearchFinished {
                generations: self.generation,
            });
        }

        self.state = RunnerState::Breeding;
        let offspring = match self.breed() {
            Ok(offspring) => offspring,
            Err(err) => {
                self.state = RunnerState::Idle;
                return Err(err);
            }
        };

        self.state = RunnerState::Evaluating;
        let population = match offspring
            .into_iter()
            .map(|order| self.instance.evaluate_tour(order))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(population) => population,
            Err(err) => {
                self.state = RunnerState::Idle;
                return Err(err);
            }
        };
        self.population = population;
        self.update_best();

        self.generation += 1;
        self.fitness_history.push(self.best.fitness());

        self.state = if self.generation >= self.config.max_generations {
            info!(
                generations = self.generation,
                best_fitness = self.best.fitness(),
                "search finished"
            );
            RunnerState::Done
        } else {
            RunnerState::Idle
        };

        Ok(&self.best)
    }

    /// Builds the gene sequences of the next generation.
    fn breed(&mut self) -> Result<Vec<Vec<usize>>, GaError> {
        let size = self.config.population_size;
        let k = self.config.tournament_size;
        let can_cross = self.instance.len() >= 2;

        let mut next_gen: Vec<Vec<usize>> = Vec::with_capacity(size);

        // Elite preservation
        if self.config.elitism {
            next_gen.push(self.best.order().to_vec());
        }

        while next_gen.len() < size {
            let parent1 = tournament_select(&self.population, k, &mut self.rng)?;
            let parent2 = tournament_select(&self.population, k, &mut self.rng)?;

            let (child1, child2) =
                if can_cross && self.rng.random_range(0.0..1.0) < self.config.crossover_rate {
                    order_crossover(parent1.order(), parent2.order(), &mut self.rng)?
                } else {
                    (parent1.into_order(), parent2.into_order())
                };

            let child1 = swap_mutation(&child1, self.config.mutation_rate, &mut self.rng);
            let child2 = swap_mutation(&child2, self.config.mutation_rate, &mut self.rng);

            // On odd sizes the second child of the last pair is dropped
            next_gen.push(child1);
            if next_gen.len() < size {
                next_gen.push(child2);
            }
        }

        Ok(next_gen)
    }

    /// Replaces the best tour only on strict improvement.
    fn update_best(&mut self) {
        let Some(gen_best) = find_best(&self.population) else {
            return;
        };
        debug!(
            generation_best = gen_best.fitness(),
            best_fitness = self.best.fitness(),
            "generation evaluated"
        );
        if gen_best.fitness() < self.best.fitness() {
            info!(
                generation = self.generation + 1,
                previous = self.best.fitness(),
                improved = gen_best.fitness(),
                "new best tour"
            );
            self.best = gen_best.clone();
        }
    }

    /// The problem instance.
    pub fn instance(&self) -> &TspInstance {
        &self.instance
    }

    /// The run configuration.
    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// The live population.
    pub fn population(&self) -> &[Tour] {
        &self.population
    }

    /// Fitness of each individual, index-aligned with
    /// [`population`](Self::population).
    pub fn fitnesses(&self) -> Vec<f64> {
        self.population.iter().map(Tour::fitness).collect()
    }

    /// Best tour found so far.
    pub fn best_tour(&self) -> &Tour {
        &self.best
    }

    /// Fitness of the best tour found so far.
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness()
    }

    /// Number of generations produced.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RunnerState {
        self.state
    }

    /// Best-so-far fitness for the initial population and each generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Consumes the runner, returning the best tour and statistics.
    pub fn into_result(self) -> GaResult {
        GaResult {
            best_fitness: self.best.fitness(),
            best: self.best,
            generations: self.generation,
            fitness_history: self.fitness_history,
        }
    }
}

impl<R: Rng> GenerationalSearch for GaRunner<R> {
    fn produce_next_generation(&mut self) -> Result<(), GaError> {
        self.next_generation().map(|_| ())
    }

    fn is_finished(&self) -> bool {
        self.state == RunnerState::Done
    }

    fn best(&self) -> Option<&Tour> {
        Some(&self.best)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}

/// Find the tour with the lowest fitness; ties keep the earliest.
fn find_best(population: &[Tour]) -> Option<&Tour> {
    population.iter().min_by(|a, b| {
        a.fitness()
            .partial_cmp(&b.fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

// ============================================================================
// Tests
// ============================================================================
