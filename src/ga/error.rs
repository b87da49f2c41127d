//! Error taxonomy for the GA core.
//!
//! Every variant is a precondition violation on the caller's side. The
//! operators are pure given their inputs and RNG, so none of these are
//! worth retrying without changing the input.

/// Errors raised by the TSP genetic algorithm.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GaError {
    /// A chromosome is not a permutation of the instance's city indices.
    #[error("invalid permutation: {reason}")]
    InvalidPermutation { reason: String },

    /// Tournament size is zero or exceeds the population.
    #[error("tournament of size {requested} cannot be drawn from a population of {available}")]
    InsufficientPopulation { requested: usize, available: usize },

    /// Crossover needs at least two genes.
    #[error("degenerate input: crossover requires at least 2 cities, got {len}")]
    DegenerateInput { len: usize },

    /// Crossover point outside `[1, len - 1]`.
    #[error("crossover point {point} is outside [1, {}]", .len.saturating_sub(1))]
    InvalidCrossoverPoint { point: usize, len: usize },

    /// A city coordinate is NaN or infinite.
    #[error("city {index} has a non-finite coordinate")]
    NonFiniteCoordinate { index: usize },

    /// Configuration rejected by [`GaConfig::validate`](super::GaConfig::validate).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Initial population does not match the configured size.
    #[error("population has {actual} individuals, expected {expected}")]
    PopulationSizeMismatch { expected: usize, actual: usize },

    /// A generation was requested after the stopping criterion was met.
    #[error("search already finished after {generations} generations")]
    SearchFinished { generations: usize },
}

impl GaError {
    pub(crate) fn invalid_permutation(reason: impl Into<String>) -> Self {
        GaError::InvalidPermutation {
            reason: reason.into(),
        }
    }
}
