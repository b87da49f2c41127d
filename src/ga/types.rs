//! Core data model for the TSP genetic algorithm.
//!
//! [`City`] is the immutable problem coordinate, [`Tour`] the evaluated
//! candidate solution, and [`GenerationalSearch`] the contract between a
//! generation-loop driver and the algorithm producing generations.

use super::error::GaError;

/// A point in the plane.
///
/// Cities are never mutated; two cities are equal when their coordinates
/// are equal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    /// Creates a city at `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: &City) -> f64 {
        super::fitness::euclidean_distance(self, other)
    }
}

impl From<(f64, f64)> for City {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// An evaluated candidate tour.
///
/// `order` is a permutation of `0..n` indexing into the instance's city
/// list; visiting order is sequence order with an implicit closing edge
/// from the last city back to the first.
///
/// A `Tour` is only produced by
/// [`TspInstance::evaluate_tour`](super::TspInstance::evaluate_tour), so
/// its fitness always matches its gene sequence. Operators work on
/// `&[usize]` and return fresh vectors, which are evaluated into new tours.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tour {
    order: Vec<usize>,
    fitness: f64,
}

impl Tour {
    pub(crate) fn from_evaluated(order: Vec<usize>, fitness: f64) -> Self {
        Self { order, fitness }
    }

    /// City indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Total cycle length. Lower is better.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` for a tour over zero cities.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the tour, returning its gene sequence.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }
}

/// Generation-loop contract.
///
/// A driver depends only on this trait: it calls
/// [`produce_next_generation`](Self::produce_next_generation) until
/// [`is_finished`](Self::is_finished) returns `true`, then reads
/// [`best`](Self::best) for reporting.
pub trait GenerationalSearch {
    /// Breeds, evaluates and installs one new generation.
    fn produce_next_generation(&mut self) -> Result<(), GaError>;

    /// The stopping criterion.
    fn is_finished(&self) -> bool;

    /// Best tour found so far, if any generation has been evaluated.
    fn best(&self) -> Option<&Tour>;

    /// Drives the search to completion.
    ///
    /// Returns the number of generations produced by this call.
    fn run(&mut self) -> Result<usize, GaError> {
        let mut produced = 0;
        while !self.is_finished() {
            self.produce_next_generation()?;
            produced += 1;
        }
        Ok(produced)
    }
}
