//! Permutation crossover and mutation for tour chromosomes.
//!
//! Chromosomes are `&[usize]` permutations of city indices. Both operators
//! borrow their inputs and return freshly allocated children, so no two
//! population slots can ever alias the same gene buffer.
//!
//! # Crossover
//!
//! - [`order_crossover`]: one-point order crossover. The child keeps a
//!   prefix of one parent and takes the remaining genes in the relative
//!   order they appear in the other parent.
//!
//! # Mutation
//!
//! - [`swap_mutation`]: exchange two distinct random positions with a
//!   fixed probability.
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use super::error::GaError;
use super::fitness::validate_permutation;
use rand::Rng;
use tracing::instrument;

// ============================================================================
// Crossover
// ============================================================================

/// One-point order crossover.
///
/// Draws the crossover point uniformly from `[1, L - 1]`, so both the kept
/// prefix and the filled suffix are non-empty, then builds both children
/// with [`order_crossover_at`].
///
/// # Errors
///
/// - [`GaError::DegenerateInput`] if the parents have fewer than 2 genes
/// - [`GaError::InvalidPermutation`] if the parents differ in length or
///   either one is not a permutation of `0..L`
pub fn order_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> Result<(Vec<usize>, Vec<usize>), GaError> {
    check_parents(parent1, parent2)?;
    let point = rng.random_range(1..parent1.len());
    Ok(crossover_pair(parent1, parent2, point))
}

/// Order crossover at a fixed point.
///
/// `child1` is `parent1[..point]` followed by the genes of `parent2` in
/// order, skipping any already in the prefix. `child2` swaps the roles.
///
/// # Complexity
/// O(L) time, O(L) space
pub fn order_crossover_at(
    parent1: &[usize],
    parent2: &[usize],
    point: usize,
) -> Result<(Vec<usize>, Vec<usize>), GaError> {
    check_parents(parent1, parent2)?;
    let n = parent1.len();
    if point == 0 || point >= n {
        return Err(GaError::InvalidCrossoverPoint { point, len: n });
    }
    Ok(crossover_pair(parent1, parent2, point))
}

#[instrument(level = "debug", skip(parent1, parent2), fields(genome_length = parent1.len(), cut_point = point))]
fn crossover_pair(parent1: &[usize], parent2: &[usize], point: usize) -> (Vec<usize>, Vec<usize>) {
    let child1 = build_child(parent1, parent2, point);
    let child2 = build_child(parent2, parent1, point);
    (child1, child2)
}

fn check_parents(parent1: &[usize], parent2: &[usize]) -> Result<(), GaError> {
    if parent1.len() != parent2.len() {
        return Err(GaError::invalid_permutation(format!(
            "parents differ in length ({} vs {})",
            parent1.len(),
            parent2.len()
        )));
    }
    if parent1.len() < 2 {
        return Err(GaError::DegenerateInput {
            len: parent1.len(),
        });
    }
    validate_permutation(parent1, parent1.len())?;
    validate_permutation(parent2, parent2.len())
}

/// Copy `template[..point]`, then fill from `donor` in order.
fn build_child(template: &[usize], donor: &[usize], point: usize) -> Vec<usize> {
    let n = template.len();
    let mut child = Vec::with_capacity(n);
    let mut placed = vec![false; n];

    for &gene in &template[..point] {
        child.push(gene);
        placed[gene] = true;
    }
    for &gene in donor {
        if !placed[gene] {
            child.push(gene);
            placed[gene] = true;
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation.
///
/// With probability `rate`, returns a copy of `chromosome` with two
/// distinct positions exchanged; otherwise returns an unchanged copy.
/// Fewer than 2 genes is a no-op.
///
/// The second position is drawn from the `L - 1` remaining slots, so the
/// pair is uniform over distinct positions without a retry loop.
///
/// # Complexity
/// O(L) for the copy, O(1) for the swap
pub fn swap_mutation<R: Rng>(chromosome: &[usize], rate: f64, rng: &mut R) -> Vec<usize> {
    let mut mutated = chromosome.to_vec();
    let n = mutated.len();

    if rng.random_range(0.0..1.0) >= rate || n < 2 {
        return mutated;
    }

    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    mutated.swap(i, j);
    mutated
}

// ============================================================================
// Tests
// ============================================================================
