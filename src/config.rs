//! Solver configuration.
//!
//! [`SolverConfig`] holds all run parameters. They are supplied once
//! per run and never change while the solver is running.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters of one solver run.
///
/// # Defaults
///
/// ```
/// use salesman_ga::SolverConfig;
///
/// let config = SolverConfig::default();
/// assert_eq!(config.group_size, 5);
/// assert_eq!(config.close_city_odds, 90);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use salesman_ga::SolverConfig;
///
/// let config = SolverConfig::default()
///     .with_population_size(200)
///     .with_max_generations(20_000)
///     .with_mutation_percent(3)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Number of tours in the population. Fixed for the whole run;
    /// individual slots are overwritten, never added or removed.
    pub population_size: usize,

    /// Number of generations to run before stopping.
    pub max_generations: usize,

    /// Number of population slots sampled (with replacement) into each
    /// generation's tournament group. The two best sampled tours become
    /// parents; the two worst sampled slots receive the children.
    pub group_size: usize,

    /// Odds out of 100 that each child is mutated after crossover.
    pub mutation_percent: u32,

    /// Seed for the run's single random number generator. Two runs with
    /// the same seed and parameters replay identically.
    pub seed: u64,

    /// Odds out of 100 that the population initializer picks the next
    /// city from the current city's close-city list rather than
    /// uniformly from all cities.
    pub close_city_odds: u32,

    /// Number of nearest neighbors recorded per city by
    /// [`crate::city::compute_close_cities`]. Clamped to n−1.
    pub close_city_count: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            group_size: 5,
            mutation_percent: 3,
            seed: 0,
            close_city_odds: 90,
            close_city_count: 5,
        }
    }
}

impl SolverConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament group size.
    pub fn with_group_size(mut self, n: usize) -> Self {
        self.group_size = n;
        self
    }

    /// Sets the mutation odds (clamped to 100).
    pub fn with_mutation_percent(mut self, percent: u32) -> Self {
        self.mutation_percent = percent.min(100);
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the locality-bias odds (clamped to 100).
    pub fn with_close_city_odds(mut self, percent: u32) -> Self {
        self.close_city_odds = percent.min(100);
        self
    }

    /// Sets the number of close cities recorded per city.
    pub fn with_close_city_count(mut self, n: usize) -> Self {
        self.close_city_count = n;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.group_size < 2 {
            return Err("group_size must be at least 2 to pick two parents".into());
        }
        if self.mutation_percent > 100 {
            return Err("mutation_percent must be at most 100".into());
        }
        if self.close_city_odds > 100 {
            return Err("close_city_odds must be at most 100".into());
        }
        Ok(())
    }
}
