//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.
//! One config is built per run and handed to the
//! [`GaRunner`](super::GaRunner), which never mutates it.

use super::error::GaError;

/// Configuration for the TSP Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert_eq!(config.tournament_size, 3);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use tsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.2)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaConfig {
    /// Number of tours in each generation.
    pub population_size: usize,

    /// Number of generations to produce before the search is finished.
    ///
    /// Zero means the search is finished as soon as it is created.
    pub max_generations: usize,

    /// Probability of applying order crossover to a pair of parents.
    ///
    /// When crossover is skipped, both parents are copied as children.
    pub crossover_rate: f64,

    /// Probability of applying swap mutation to each child.
    pub mutation_rate: f64,

    /// Number of distinct contenders per tournament.
    pub tournament_size: usize,

    /// Whether each new generation starts with a copy of the best tour.
    ///
    /// With elitism the best-known fitness never gets worse.
    pub elitism: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            tournament_size: 3,
            elitism: true,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, elitism: bool) -> Self {
        self.elitism = elitism;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for quick runs on small instances.
    ///
    /// - Population: 50, Generations: 200
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            ..Self::default()
        }
    }

    /// Preset balancing tour quality and run time.
    ///
    /// - Population: 100, Generations: 500
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Preset for large instances.
    ///
    /// - Population: 200, Generations: 2000, Tournament: 5
    pub fn quality() -> Self {
        Self {
            population_size: 200,
            max_generations: 2000,
            tournament_size: 5,
            ..Self::default()
        }
    }

    /// Selects a preset based on the number of cities.
    ///
    /// - `city_count < 30` → [`fast()`](Self::fast)
    /// - `30 ≤ city_count < 150` → [`balanced()`](Self::balanced)
    /// - `city_count ≥ 150` → [`quality()`](Self::quality)
    pub fn auto_select(city_count: usize) -> Self {
        if city_count < 30 {
            Self::fast()
        } else if city_count < 150 {
            Self::balanced()
        } else {
            Self::quality()
        }
    }

    /// Validates the configuration.
    ///
    /// Rates are checked here as well as clamped by the builders, since
    /// the fields are public.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::InvalidConfig(
                "population_size must be at least 1".into(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(GaError::InvalidConfig(
                "tournament_size must be at least 1".into(),
            ));
        }
        if self.tournament_size > self.population_size {
            return Err(GaError::InvalidConfig(format!(
                "tournament_size {} exceeds population_size {}",
                self.tournament_size, self.population_size
            )));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GaError::InvalidConfig(
                "crossover_rate must be within [0, 1]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::InvalidConfig(
                "mutation_rate must be within [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 500);
        assert_eq!(config.tournament_size, 3);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert!(config.elitism);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_tournament_size(4)
            .with_elitism(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.tournament_size, 4);
        assert!(!config.elitism);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(GaConfig::default().validate().is_ok());
        assert!(GaConfig::default()
            .with_population_size(1)
            .with_tournament_size(1)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_zero_generations_is_valid() {
        assert!(GaConfig::default().with_max_generations(0).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_population() {
        let config = GaConfig::default().with_population_size(0);
        assert!(matches!(config.validate(), Err(GaError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_tournament_bounds() {
        let config = GaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());

        let config = GaConfig::default()
            .with_population_size(2)
            .with_tournament_size(3);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rates_set_directly() {
        let config = GaConfig {
            mutation_rate: 1.5,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GaConfig {
            crossover_rate: f64::NAN,
            ..GaConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_clamp_rates() {
        let config = GaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    // ---- Presets ----

    #[test]
    fn test_presets_are_valid() {
        for config in [GaConfig::fast(), GaConfig::balanced(), GaConfig::quality()] {
            assert!(config.validate().is_ok(), "{config:?}");
        }
        assert_eq!(GaConfig::quality().tournament_size, 5);
    }

    #[test]
    fn test_preset_chainable() {
        let config = GaConfig::fast().with_population_size(75).with_seed(42);
        assert_eq!(config.population_size, 75);
        assert_eq!(config.max_generations, 200);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_auto_select_boundaries() {
        assert_eq!(GaConfig::auto_select(29), GaConfig::fast());
        assert_eq!(GaConfig::auto_select(30), GaConfig::balanced());
        assert_eq!(GaConfig::auto_select(149), GaConfig::balanced());
        assert_eq!(GaConfig::auto_select(150), GaConfig::quality());
    }
}
