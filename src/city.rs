//! Cities and the precomputed distance index.
//!
//! A [`City`] is a 2D point plus two derived tables filled in before a
//! run starts: the Euclidean distance to every city (including itself,
//! distance 0), and the indices of its nearest neighbors ranked by
//! distance. The solver only ever reads these tables; it never touches
//! coordinates during the run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A city in the tour, identified by its index in the city list.
///
/// The `distances` and `close_cities` tables start empty and are filled
/// by [`compute_distances`] and [`compute_close_cities`] (or both at
/// once via [`build_cities`]).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct City {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Distance from this city to every city, indexed by city id.
    /// `distances[self] == 0.0`.
    pub distances: Vec<f64>,
    /// Indices of the nearest cities, closest first.
    ///
    /// The self-distance of 0 participates in the ranking, so a city's
    /// own index is always the first entry. Consumers that draw from
    /// this list must be prepared to reject the self entry.
    pub close_cities: Vec<usize>,
}

impl City {
    /// Creates a city at `(x, y)` with empty distance tables.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            distances: Vec::new(),
            close_cities: Vec::new(),
        }
    }
}

/// Fills every city's `distances` table with pairwise Euclidean
/// distances. O(n²) time and space.
pub fn compute_distances(cities: &mut [City]) {
    let coords: Vec<(f64, f64)> = cities.iter().map(|c| (c.x, c.y)).collect();
    for city in cities.iter_mut() {
        city.distances.clear();
        city.distances.reserve(coords.len());
        for &(x, y) in &coords {
            city.distances.push(((city.x - x).powi(2) + (city.y - y).powi(2)).sqrt());
        }
    }
}

/// Fills every city's `close_cities` list with the indices of its `k`
/// nearest cities, closest first. `k` is clamped to `n - 1`.
///
/// Selection is by repeated minimum extraction over a scratch copy of
/// the distance row, so the self entry (distance 0) always wins the
/// first round and heads the list.
///
/// # Panics
/// Panics if [`compute_distances`] has not run first.
pub fn compute_close_cities(cities: &mut [City], k: usize) {
    let n = cities.len();
    let k = k.min(n.saturating_sub(1));
    for city in cities.iter_mut() {
        assert_eq!(
            city.distances.len(),
            n,
            "compute_distances must run before compute_close_cities"
        );
        let mut scratch = city.distances.clone();
        city.close_cities.clear();
        for _ in 0..k {
            let mut nearest = 0;
            let mut nearest_distance = f64::MAX;
            for (candidate, &d) in scratch.iter().enumerate() {
                if d < nearest_distance {
                    nearest_distance = d;
                    nearest = candidate;
                }
            }
            city.close_cities.push(nearest);
            scratch[nearest] = f64::MAX;
        }
    }
}

/// Builds a fully indexed city list from raw coordinates: constructs the
/// cities, then runs [`compute_distances`] and [`compute_close_cities`].
pub fn build_cities(points: &[(f64, f64)], close_city_count: usize) -> Vec<City> {
    let mut cities: Vec<City> = points.iter().map(|&(x, y)| City::new(x, y)).collect();
    compute_distances(&mut cities);
    compute_close_cities(&mut cities, close_city_count);
    cities
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cities() -> Vec<City> {
        build_cities(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], 3)
    }

    #[test]
    fn test_distances_symmetric_with_zero_diagonal() {
        let cities = square_cities();
        let n = cities.len();
        for i in 0..n {
            assert_eq!(cities[i].distances.len(), n);
            assert_eq!(cities[i].distances[i], 0.0);
            for j in 0..n {
                assert_eq!(cities[i].distances[j], cities[j].distances[i]);
            }
        }
    }

    #[test]
    fn test_euclidean_values() {
        let cities = square_cities();
        assert!((cities[0].distances[1] - 10.0).abs() < 1e-12);
        assert!((cities[0].distances[2] - 200f64.sqrt()).abs() < 1e-12);
        assert!((cities[1].distances[3] - 200f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_close_cities_ranked_self_first() {
        let cities = build_cities(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0), (20.0, 0.0)], 3);
        // Self-distance 0 wins the first extraction round.
        assert_eq!(cities[0].close_cities, vec![0, 1, 2]);
        assert_eq!(cities[2].close_cities, vec![2, 1, 0]);
    }

    #[test]
    fn test_close_city_count_clamped() {
        let cities = build_cities(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], 99);
        for city in &cities {
            assert_eq!(city.close_cities.len(), 2);
        }
    }

    #[test]
    fn test_zero_close_cities() {
        let cities = build_cities(&[(0.0, 0.0), (1.0, 0.0)], 0);
        for city in &cities {
            assert!(city.close_cities.is_empty());
        }
    }
}
