//! The generational driver: tournament selection with steady-state
//! replacement.
//!
//! Each generation samples a tournament group from the population,
//! breeds two children from the group's two best tours, and writes the
//! children over the group's two worst slots. The best tour ever seen
//! is tracked as an owned clone — never an alias into a population slot
//! that a later generation could overwrite.

use crate::city::City;
use crate::config::SolverConfig;
use crate::operators;
use crate::population::create_random_population;
use crate::progress::{Progress, ProgressObserver};
use crate::random::create_rng;
use crate::tour::Tour;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Outcome of a solver run.
#[derive(Debug, Clone)]
pub struct SolverResult {
    /// The best tour found during the entire run.
    pub best: Tour,

    /// Best tour length (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Number of generations completed.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best fitness after initialization and after each generation.
    pub fitness_history: Vec<f64>,
}

/// Executes the steady-state evolutionary loop.
///
/// # Usage
///
/// ```
/// use salesman_ga::{build_cities, Progress, Solver, SolverConfig};
///
/// let cities = build_cities(
///     &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)],
///     5,
/// );
/// let config = SolverConfig::default()
///     .with_population_size(10)
///     .with_max_generations(100)
///     .with_seed(42);
/// let result = Solver::run(&cities, &config, &mut |_: Progress<'_>| {});
/// assert!(result.best_fitness.is_finite());
/// ```
pub struct Solver;

impl Solver {
    /// Runs the solver to `max_generations`.
    ///
    /// The observer is notified once after initialization (generation
    /// 0), once per improving generation, and exactly once at the end
    /// with `complete = true`.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call
    /// [`SolverConfig::validate`] first for a descriptive error) or if
    /// fewer than 5 cities are supplied.
    pub fn run<O: ProgressObserver>(
        cities: &[City],
        config: &SolverConfig,
        observer: &mut O,
    ) -> SolverResult {
        Self::run_with_cancel(cities, config, None, observer)
    }

    /// Runs the solver with an optional cancellation flag.
    ///
    /// The flag is polled once per generation boundary, so cancellation
    /// takes effect with at most one generation of latency and never
    /// interrupts a generation mid-flight. A cancelled run still
    /// delivers the terminal notification and returns the best tour
    /// found so far.
    pub fn run_with_cancel<O: ProgressObserver>(
        cities: &[City],
        config: &SolverConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> SolverResult {
        config.validate().expect("invalid SolverConfig");
        assert!(cities.len() >= 5, "solver requires at least 5 cities");

        let mut rng = create_rng(config.seed);

        let (mut population, mut best) = create_random_population(
            config.population_size,
            cities,
            &mut rng,
            config.close_city_odds,
        );

        let mut fitness_history = Vec::with_capacity(config.max_generations + 1);
        fitness_history.push(best.fitness());

        observer.on_progress(Progress {
            cities,
            best_tour: &best,
            generation: 0,
            complete: false,
        });

        let mut cancelled = false;
        let mut generation = 0;
        while generation < config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let improved = Self::step(cities, config, &mut population, &mut best, &mut rng);
            fitness_history.push(best.fitness());

            if improved {
                observer.on_progress(Progress {
                    cities,
                    best_tour: &best,
                    generation,
                    complete: false,
                });
            }

            generation += 1;
        }

        observer.on_progress(Progress {
            cities,
            best_tour: &best,
            generation,
            complete: true,
        });

        SolverResult {
            best_fitness: best.fitness(),
            best,
            generations: generation,
            cancelled,
            fitness_history,
        }
    }

    /// One generation: sample, rank, breed, replace.
    ///
    /// Samples `group_size` population indices with replacement, ranks
    /// them ascending by fitness (stable, so equal-fitness entries keep
    /// their sampled order), then breeds the two best into the two
    /// worst slots — child A = crossover(rank 0, rank 1) into the worst
    /// slot, child B = crossover(rank 1, rank 0) into the second-worst.
    /// Child A lands before child B's parents are read, so a group that
    /// sampled the same slot twice can breed child B from child A.
    ///
    /// Returns true if either child improved on the best tour.
    pub(crate) fn step<R: Rng>(
        cities: &[City],
        config: &SolverConfig,
        population: &mut [Tour],
        best: &mut Tour,
        rng: &mut R,
    ) -> bool {
        let group_size = config.group_size;
        let mut group: Vec<usize> = (0..group_size)
            .map(|_| rng.random_range(0..population.len()))
            .collect();

        group.sort_by(|&a, &b| {
            population[a]
                .fitness()
                .partial_cmp(&population[b].fitness())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut improved = Self::breed(
            cities,
            config,
            population,
            best,
            rng,
            group[0],
            group[1],
            group[group_size - 1],
        );
        improved |= Self::breed(
            cities,
            config,
            population,
            best,
            rng,
            group[1],
            group[0],
            group[group_size - 2],
        );
        improved
    }

    /// Breeds one child from the tours at `parent_a` and `parent_b`,
    /// writes it into `slot`, and updates the best tour on strict
    /// improvement (clone-out, so the tracked best survives later
    /// overwrites of the slot).
    #[allow(clippy::too_many_arguments)]
    fn breed<R: Rng>(
        cities: &[City],
        config: &SolverConfig,
        population: &mut [Tour],
        best: &mut Tour,
        rng: &mut R,
        parent_a: usize,
        parent_b: usize,
        slot: usize,
    ) -> bool {
        let child = operators::crossover(&population[parent_a], &population[parent_b], rng);
        population[slot] = child;

        if rng.random_range(0..100u32) < config.mutation_percent {
            operators::mutate(&mut population[slot], rng);
        }
        population[slot].evaluate_fitness(cities);

        if population[slot].fitness() < best.fitness() {
            *best = population[slot].clone();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::city::build_cities;

    /// A 10×10 square with its center. The optimum is the square
    /// perimeter with the center spliced into one edge:
    /// 30 + 2·√50 ≈ 44.142.
    fn square_with_center() -> Vec<City> {
        build_cities(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)],
            5,
        )
    }

    fn scattered_cities(n: usize, seed: u64) -> Vec<City> {
        let mut rng = create_rng(seed);
        let points: Vec<(f64, f64)> = (0..n)
            .map(|_| (rng.random_range(0.0..500.0), rng.random_range(0.0..500.0)))
            .collect();
        build_cities(&points, 5)
    }

    fn assert_single_cycle(tour: &Tour) {
        let order = tour.traverse();
        let mut seen = vec![false; tour.len()];
        for &c in &order {
            assert!(!seen[c]);
            seen[c] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_converges_on_square_with_center() {
        let cities = square_with_center();
        let config = SolverConfig::default()
            .with_population_size(10)
            .with_max_generations(500)
            .with_group_size(5)
            .with_mutation_percent(0)
            .with_seed(42);

        let mut terminal: Option<(usize, f64)> = None;
        let result = Solver::run(&cities, &config, &mut |p: Progress<'_>| {
            if p.complete {
                terminal = Some((p.generation, p.best_tour.fitness()));
            }
        });

        let optimum = 30.0 + 2.0 * 50f64.sqrt();
        assert!(
            result.best_fitness <= optimum + 1e-6,
            "expected ≈{optimum}, got {}",
            result.best_fitness
        );
        assert_single_cycle(&result.best);

        let (generation, fitness) = terminal.expect("terminal notification missing");
        assert_eq!(generation, 500);
        assert_eq!(fitness, result.best_fitness);
    }

    #[test]
    fn test_deterministic_runs() {
        let cities = scattered_cities(30, 8);
        let config = SolverConfig::default()
            .with_population_size(40)
            .with_max_generations(300)
            .with_mutation_percent(10)
            .with_seed(1234);

        let mut improvements_a = Vec::new();
        let a = Solver::run(&cities, &config, &mut |p: Progress<'_>| {
            if !p.complete {
                improvements_a.push((p.generation, p.best_tour.fitness()));
            }
        });
        let mut improvements_b = Vec::new();
        let b = Solver::run(&cities, &config, &mut |p: Progress<'_>| {
            if !p.complete {
                improvements_b.push((p.generation, p.best_tour.fitness()));
            }
        });

        assert_eq!(a.best_fitness, b.best_fitness);
        assert_eq!(a.fitness_history, b.fitness_history);
        assert_eq!(improvements_a, improvements_b);
        assert_eq!(a.best.traverse(), b.best.traverse());
    }

    #[test]
    fn test_best_fitness_non_increasing() {
        let cities = scattered_cities(25, 77);
        let config = SolverConfig::default()
            .with_population_size(30)
            .with_max_generations(200)
            .with_seed(5);

        let result = Solver::run(&cities, &config, &mut |_: Progress<'_>| {});

        assert_eq!(result.fitness_history.len(), 201);
        for window in result.fitness_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best fitness regressed: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_first_notification_is_generation_zero() {
        let cities = scattered_cities(10, 3);
        let config = SolverConfig::default()
            .with_population_size(10)
            .with_max_generations(20)
            .with_seed(9);

        let mut calls = Vec::new();
        Solver::run(&cities, &config, &mut |p: Progress<'_>| {
            calls.push((p.generation, p.complete));
        });

        assert_eq!(calls[0], (0, false));
        assert_eq!(*calls.last().unwrap(), (20, true));
        // Exactly one terminal notification.
        assert_eq!(calls.iter().filter(|&&(_, complete)| complete).count(), 1);
        // Notifications arrive in generation order.
        for window in calls.windows(2) {
            assert!(window[0].0 <= window[1].0);
        }
    }

    #[test]
    fn test_step_replaces_at_most_two_slots() {
        let cities = scattered_cities(12, 1);
        let config = SolverConfig::default()
            .with_population_size(20)
            .with_group_size(5)
            .with_mutation_percent(50)
            .with_seed(6);

        let mut rng = create_rng(config.seed);
        let (mut population, mut best) =
            create_random_population(config.population_size, &cities, &mut rng, 90);

        for _ in 0..50 {
            let before: Vec<Vec<usize>> = population.iter().map(Tour::traverse).collect();
            Solver::step(&cities, &config, &mut population, &mut best, &mut rng);

            assert_eq!(population.len(), 20);
            let changed = population
                .iter()
                .zip(&before)
                .filter(|(tour, old)| tour.traverse() != **old)
                .count();
            assert!(changed <= 2, "{changed} slots changed in one step");
            for tour in &population {
                assert_single_cycle(tour);
            }
        }
    }

    #[test]
    fn test_cancellation() {
        let cities = scattered_cities(40, 12);
        let config = SolverConfig::default()
            .with_population_size(50)
            .with_max_generations(100_000_000)
            .with_seed(42);

        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(20));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let mut terminal_seen = false;
        let result = Solver::run_with_cancel(
            &cities,
            &config,
            Some(cancel),
            &mut |p: Progress<'_>| {
                if p.complete {
                    terminal_seen = true;
                }
            },
        );

        assert!(result.cancelled);
        assert!(result.generations < 100_000_000);
        assert!(terminal_seen, "cancelled run must still notify completion");
        assert_single_cycle(&result.best);
    }

    #[test]
    #[should_panic(expected = "invalid SolverConfig")]
    fn test_invalid_config_panics() {
        let cities = scattered_cities(10, 2);
        let config = SolverConfig::default().with_population_size(1);
        Solver::run(&cities, &config, &mut |_: Progress<'_>| {});
    }

    #[test]
    #[should_panic(expected = "at least 5 cities")]
    fn test_too_few_cities_panics() {
        let cities = build_cities(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)], 2);
        Solver::run(&cities, &SolverConfig::default(), &mut |_: Progress<'_>| {});
    }
}
