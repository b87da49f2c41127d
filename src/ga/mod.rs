//! Genetic Algorithm for the Traveling Salesman Problem.
//!
//! A generational GA over permutation-encoded tours. Each generation is
//! seeded with the best tour found so far (elitism), then filled by
//! tournament selection, order crossover and swap mutation, and finally
//! re-evaluated against the instance's Euclidean distances.
//!
//! # Key Types
//!
//! - [`TspInstance`]: The fixed city set of a run, and the fitness evaluator
//! - [`Tour`]: An evaluated candidate tour (lower fitness is better)
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`GaRunner`]: The generation driver
//! - [`GenerationalSearch`]: The generation-loop contract [`GaRunner`] implements
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover and swap mutation on index permutations
//! - [`selection`]: Tournament selection without replacement
//! - [`fitness`]: Distance metric and cycle-length evaluation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod error;
pub mod fitness;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use config::GaConfig;
pub use error::GaError;
pub use fitness::{cycle_length, euclidean_distance, TspInstance};
pub use runner::{GaResult, GaRunner, RunnerState};
pub use types::{City, GenerationalSearch, Tour};
