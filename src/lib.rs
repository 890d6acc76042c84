//! Heuristic solver for the Euclidean Traveling Salesman Problem.
//!
//! Evolves a population of candidate closed tours with a steady-state
//! genetic algorithm: tournament sampling picks two parents per
//! generation, a graph-validity-preserving crossover recombines them,
//! and the children overwrite the tournament's two worst tours. The
//! best tour found so far is reported to a caller-supplied observer
//! whenever it improves.
//!
//! Tours are represented as degree-2-regular cyclic graphs — per city,
//! two neighbor slots — rather than permutations. The crossover
//! operator inherits edges directly from the parents and guards every
//! insertion with a reachability test so that a child is always exactly
//! one Hamiltonian cycle, never a set of disjoint sub-cycles.
//!
//! # Key Types
//!
//! - [`City`] + [`build_cities`]: points with precomputed distances and
//!   ranked nearest neighbors
//! - [`Tour`]: one candidate cycle with cached length
//! - [`SolverConfig`]: run parameters (population, generations,
//!   tournament group, mutation odds, seed, locality bias)
//! - [`Solver`]: the generational driver; [`SolverResult`] its outcome
//! - [`ProgressObserver`] / [`Progress`]: improvement notifications
//!
//! # Example
//!
//! ```
//! use salesman_ga::{build_cities, Progress, Solver, SolverConfig};
//!
//! let cities = build_cities(
//!     &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)],
//!     5,
//! );
//! let config = SolverConfig::default()
//!     .with_population_size(10)
//!     .with_max_generations(200)
//!     .with_seed(42);
//!
//! let result = Solver::run(&cities, &config, &mut |p: Progress<'_>| {
//!     if p.complete {
//!         println!("gen {}: length {:.2}", p.generation, p.best_tour.fitness());
//!     }
//! });
//! assert_eq!(result.best.traverse().len(), cities.len());
//! ```
//!
//! # Scope
//!
//! The crate is the engine only: rendering, city-list import, and
//! parameter validation dialogs belong to the caller. The solver is
//! single-threaded; interactive callers run it on a worker thread and
//! forward [`Progress`] snapshots to their own context. This is a
//! heuristic — tour optimality is not guaranteed, and bit-identical
//! results are only guaranteed within one build for a fixed seed.

pub mod city;
pub mod config;
pub mod operators;
pub mod population;
pub mod progress;
pub mod random;
pub mod runner;
pub mod tour;

pub use city::{build_cities, compute_close_cities, compute_distances, City};
pub use config::SolverConfig;
pub use operators::{crossover, mutate};
pub use population::create_random_population;
pub use progress::{Progress, ProgressObserver};
pub use runner::{Solver, SolverResult};
pub use tour::{Tour, TourNode, NO_LINK};
