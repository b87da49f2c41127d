//! Distance metric and tour evaluation.
//!
//! Fitness is the total length of the closed tour: the sum of Euclidean
//! distances between consecutive cities plus the edge from the last city
//! back to the first. Lower is better.

use super::error::GaError;
use super::types::{City, Tour};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::instrument;

/// Euclidean distance between two cities.
///
/// Symmetric, and zero iff the coordinates are identical.
pub fn euclidean_distance(a: &City, b: &City) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    (dx * dx + dy * dy).sqrt()
}

/// Length of the closed cycle visiting `cities` in order.
///
/// Zero or one city gives `0.0`.
pub fn cycle_length(cities: &[City]) -> f64 {
    cycle_length_by(cities.len(), |i| &cities[i])
}

fn cycle_length_by<'a, F>(n: usize, city_at: F) -> f64
where
    F: Fn(usize) -> &'a City,
{
    if n < 2 {
        return 0.0;
    }
    let open: f64 = (0..n - 1)
        .map(|i| euclidean_distance(city_at(i), city_at(i + 1)))
        .sum();
    open + euclidean_distance(city_at(n - 1), city_at(0))
}

/// A fixed TSP problem instance.
///
/// Holds the immutable city list for a run. Chromosomes are permutations
/// of `0..len()` into this list.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TspInstance {
    cities: Vec<City>,
}

impl TspInstance {
    /// Creates an instance over `cities`.
    ///
    /// Coordinates must be finite to be searched; runners reject the
    /// instance otherwise (see [`check_coordinates`](Self::check_coordinates)).
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Returns `true` if the instance has no cities.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// All cities, in index order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// The city at index `i`, if any.
    pub fn city(&self, i: usize) -> Option<&City> {
        self.cities.get(i)
    }

    /// Checks that every coordinate is finite.
    ///
    /// A NaN distance would make every fitness comparison false.
    pub fn check_coordinates(&self) -> Result<(), GaError> {
        match self
            .cities
            .iter()
            .position(|c| !c.x.is_finite() || !c.y.is_finite())
        {
            Some(index) => Err(GaError::NonFiniteCoordinate { index }),
            None => Ok(()),
        }
    }

    /// Checks that `order` is a permutation of `0..len()`.
    pub fn validate_order(&self, order: &[usize]) -> Result<(), GaError> {
        validate_permutation(order, self.len())
    }

    /// Cycle length of the tour visiting cities in `order`.
    pub fn tour_length(&self, order: &[usize]) -> Result<f64, GaError> {
        self.validate_order(order)?;
        Ok(cycle_length_by(order.len(), |i| &self.cities[order[i]]))
    }

    /// Evaluates `order` into a [`Tour`].
    pub fn evaluate_tour(&self, order: Vec<usize>) -> Result<Tour, GaError> {
        let fitness = self.tour_length(&order)?;
        Ok(Tour::from_evaluated(order, fitness))
    }

    /// Converts a chromosome into the city sequence it visits.
    pub fn tour_cities(&self, order: &[usize]) -> Result<Vec<City>, GaError> {
        self.validate_order(order)?;
        Ok(order.iter().map(|&i| self.cities[i]).collect())
    }

    /// A uniformly random permutation of the city indices.
    pub fn random_order<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.shuffle(rng);
        order
    }

    /// `size` independently shuffled, evaluated tours.
    #[instrument(level = "debug", skip(self, rng), fields(cities = self.len()))]
    pub fn random_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Tour> {
        (0..size)
            .map(|_| {
                let order = self.random_order(rng);
                let fitness = cycle_length_by(order.len(), |i| &self.cities[order[i]]);
                Tour::from_evaluated(order, fitness)
            })
            .collect()
    }
}

impl FromIterator<City> for TspInstance {
    fn from_iter<T: IntoIterator<Item = City>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Checks that `perm` contains every value in `0..n` exactly once.
pub(crate) fn validate_permutation(perm: &[usize], n: usize) -> Result<(), GaError> {
    if perm.len() != n {
        return Err(GaError::invalid_permutation(format!(
            "expected {n} genes, got {}",
            perm.len()
        )));
    }
    let mut seen = vec![false; n];
    for &gene in perm {
        if gene >= n {
            return Err(GaError::invalid_permutation(format!(
                "city index {gene} out of range for {n} cities"
            )));
        }
        if seen[gene] {
            return Err(GaError::invalid_permutation(format!(
                "duplicate city index {gene}"
            )));
        }
        seen[gene] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit_square() -> TspInstance {
        TspInstance::new(vec![
            City::new(0.0, 0.0),
            City::new(0.0, 1.0),
            City::new(1.0, 1.0),
            City::new(1.0, 0.0),
        ])
    }

    #[test]
    fn test_euclidean_distance() {
        let a = City::new(0.0, 0.0);
        let b = City::new(3.0, 4.0);
        assert!((euclidean_distance(&a, &b) - 5.0).abs() < 1e-12);
        assert!((euclidean_distance(&b, &a) - 5.0).abs() < 1e-12);
        assert_eq!(euclidean_distance(&a, &a), 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_cycles_are_zero() {
        assert_eq!(cycle_length(&[]), 0.0);
        assert_eq!(cycle_length(&[City::new(4.0, 2.0)]), 0.0);

        let single = TspInstance::new(vec![City::new(4.0, 2.0)]);
        assert_eq!(single.tour_length(&[0]).unwrap(), 0.0);
        let empty = TspInstance::new(vec![]);
        assert_eq!(empty.tour_length(&[]).unwrap(), 0.0);
    }

    #[test]
    fn test_two_cities_count_edge_twice() {
        let cities = [City::new(0.0, 0.0), City::new(0.0, 2.0)];
        assert!((cycle_length(&cities) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_square_perimeter() {
        let instance = unit_square();
        let perimeter = instance.tour_length(&[0, 1, 2, 3]).unwrap();
        assert!((perimeter - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_unit_square_crossing_tour() {
        let instance = unit_square();
        let crossing = instance.tour_length(&[0, 2, 1, 3]).unwrap();
        let expected = 2.0 + 2.0 * 2.0_f64.sqrt();
        assert!((crossing - expected).abs() < 1e-12);
        assert!(crossing > 4.0);
    }

    #[test]
    fn test_unit_square_every_tour_at_least_perimeter() {
        let instance = unit_square();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let order = instance.random_order(&mut rng);
            assert!(instance.tour_length(&order).unwrap() >= 4.0 - 1e-12);
        }
    }

    #[test]
    fn test_coincident_cities_have_zero_fitness() {
        let instance: TspInstance = std::iter::repeat(City::new(2.5, -1.0)).take(5).collect();
        assert_eq!(instance.tour_length(&[4, 2, 0, 1, 3]).unwrap(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_orders() {
        let instance = unit_square();
        assert!(matches!(
            instance.tour_length(&[0, 1, 2]),
            Err(GaError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            instance.tour_length(&[0, 1, 1, 3]),
            Err(GaError::InvalidPermutation { .. })
        ));
        assert!(matches!(
            instance.tour_length(&[0, 1, 2, 4]),
            Err(GaError::InvalidPermutation { .. })
        ));
    }

    #[test]
    fn test_check_coordinates() {
        assert!(unit_square().check_coordinates().is_ok());

        let instance = TspInstance::new(vec![
            City::new(0.0, 0.0),
            City::new(f64::NAN, 1.0),
            City::new(1.0, f64::INFINITY),
        ]);
        assert_eq!(
            instance.check_coordinates(),
            Err(GaError::NonFiniteCoordinate { index: 1 })
        );
    }

    #[test]
    fn test_tour_cities_follow_order() {
        let instance = unit_square();
        let cities = instance.tour_cities(&[2, 0, 3, 1]).unwrap();
        assert_eq!(cities[0], City::new(1.0, 1.0));
        assert_eq!(cities[3], City::new(0.0, 1.0));
        let via_cities = cycle_length(&cities);
        let via_indices = instance.tour_length(&[2, 0, 3, 1]).unwrap();
        assert!((via_cities - via_indices).abs() < 1e-12);
    }

    #[test]
    fn test_random_population_is_evaluated() {
        let instance = unit_square();
        let mut rng = StdRng::seed_from_u64(42);
        let population = instance.random_population(10, &mut rng);
        assert_eq!(population.len(), 10);
        for tour in &population {
            instance.validate_order(tour.order()).unwrap();
            let expected = instance.tour_length(tour.order()).unwrap();
            assert!((tour.fitness() - expected).abs() < 1e-12);
        }
    }

    fn cities_strategy() -> impl Strategy<Value = Vec<City>> {
        prop::collection::vec((-100.0..100.0f64, -100.0..100.0f64), 1..30)
            .prop_map(|pts| pts.into_iter().map(City::from).collect())
    }

    proptest! {
        #[test]
        fn prop_fitness_non_negative(cities in cities_strategy()) {
            prop_assert!(cycle_length(&cities) >= 0.0);
        }

        #[test]
        fn prop_fitness_reversal_invariant(cities in cities_strategy()) {
            let mut reversed = cities.clone();
            reversed.reverse();
            let forward = cycle_length(&cities);
            let backward = cycle_length(&reversed);
            prop_assert!((forward - backward).abs() <= 1e-9 * forward.max(1.0));
        }
    }
}
