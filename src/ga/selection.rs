//! Tournament selection.
//!
//! Draws `k` distinct individuals uniformly at random and keeps the one
//! with the lowest fitness. Selection pressure grows with `k`, and no
//! sorted population or cumulative-fitness table is needed.
//!
//! - k=2: light pressure (good for diversity)
//! - k=3-5: moderate pressure (typical default)
//! - k>5: strong pressure (risk of premature convergence)
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::error::GaError;
use super::types::Tour;
use rand::seq::index;
use rand::Rng;
use tracing::instrument;

/// Runs one tournament and returns the winner's index.
///
/// Samples `k` indices without replacement. Ties go to whichever of the
/// tied individuals was drawn first.
///
/// # Errors
///
/// [`GaError::InsufficientPopulation`] if `k` is zero or larger than the
/// population. Nothing is sampled in that case.
///
/// # Complexity
/// O(k) per selection
#[instrument(level = "trace", skip(population, rng), fields(population_size = population.len()))]
pub fn tournament_index<R: Rng>(
    population: &[Tour],
    k: usize,
    rng: &mut R,
) -> Result<usize, GaError> {
    let n = population.len();
    if k == 0 || k > n {
        return Err(GaError::InsufficientPopulation {
            requested: k,
            available: n,
        });
    }

    let sample = index::sample(rng, n, k);
    let mut contenders = sample.iter();
    // k >= 1, so the sample is non-empty
    let mut best_idx = contenders.next().unwrap_or_default();
    for idx in contenders {
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    Ok(best_idx)
}

/// Runs one tournament and returns a copy of the winner.
///
/// The population is only read; the returned tour is an independent clone.
pub fn tournament_select<R: Rng>(
    population: &[Tour],
    k: usize,
    rng: &mut R,
) -> Result<Tour, GaError> {
    tournament_index(population, k, rng).map(|idx| population[idx].clone())
}
