//! The cyclic-graph tour representation.
//!
//! A tour is stored as an arena of per-city neighbor records rather
//! than a pointer graph: `nodes[c]` holds the two cities adjacent to
//! city `c`. The two slots are unordered; traversal disambiguates them
//! with a "don't backtrack" rule (the next city is whichever neighbor
//! is not the city just arrived from). A complete tour's edges form
//! exactly one cycle through all n cities — the genetic operators in
//! [`crate::operators`] are built to preserve that invariant.

use crate::city::City;

/// Sentinel for an unset neighbor slot on a tour under construction.
pub const NO_LINK: usize = usize::MAX;

/// The two neighbor slots of one city within one tour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourNode {
    /// First neighbor, or [`NO_LINK`].
    pub conn1: usize,
    /// Second neighbor, or [`NO_LINK`].
    pub conn2: usize,
}

impl TourNode {
    const UNSET: TourNode = TourNode {
        conn1: NO_LINK,
        conn2: NO_LINK,
    };
}

/// One candidate solution: a closed tour through every city.
///
/// The cached fitness is the total tour length, valid only after
/// [`evaluate_fitness`](Tour::evaluate_fitness). Structural changes
/// (crossover writes, [`crate::operators::mutate`]) leave the cached
/// value stale until the caller re-evaluates.
#[derive(Debug, Clone)]
pub struct Tour {
    pub(crate) nodes: Vec<TourNode>,
    pub(crate) fitness: f64,
}

impl Tour {
    /// Creates an empty tour over `n` cities, every slot unset and
    /// fitness at its worst value.
    pub fn new(n: usize) -> Self {
        Self {
            nodes: vec![TourNode::UNSET; n],
            fitness: f64::INFINITY,
        }
    }

    /// Number of cities in the tour.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if the tour covers no cities.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The neighbor slots of city `city`.
    pub fn node(&self, city: usize) -> TourNode {
        self.nodes[city]
    }

    /// Cached tour length. `f64::INFINITY` until evaluated.
    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Walks the full cycle once and caches the total edge length.
    ///
    /// Starts at city 0, leaves through `conn1`, and follows the
    /// don't-backtrack rule for n steps, summing the distance of each
    /// edge. O(n).
    ///
    /// # Panics
    /// May index out of bounds if the tour is incomplete (a slot still
    /// holds [`NO_LINK`]).
    pub fn evaluate_fitness(&mut self, cities: &[City]) {
        let mut total = 0.0;
        let mut last = 0;
        let mut next = self.nodes[0].conn1;

        for _ in 0..self.nodes.len() {
            total += cities[last].distances[next];
            let node = self.nodes[next];
            if last != node.conn1 {
                last = next;
                next = node.conn1;
            } else {
                last = next;
                next = node.conn2;
            }
        }

        self.fitness = total;
    }

    /// The visiting order of the cycle: starts at city 0, leaves
    /// through `conn1`, and returns the n cities in visit order.
    ///
    /// On a complete valid tour the walk re-reaches city 0 exactly
    /// after the n-th step. Used by fitness checks, tests, and callers
    /// that need the order (e.g. rendering).
    pub fn traverse(&self) -> Vec<usize> {
        let n = self.nodes.len();
        let mut order = Vec::with_capacity(n);
        order.push(0);

        let mut last = 0;
        let mut current = self.nodes[0].conn1;
        for _ in 1..n {
            order.push(current);
            let node = self.nodes[current];
            let next = if node.conn1 != last { node.conn1 } else { node.conn2 };
            last = current;
            current = next;
        }
        debug_assert_eq!(current, 0, "tour does not close back to city 0");

        order
    }
}

#[cfg(test)]
impl Tour {
    /// Test helper: builds the tour that visits cities in `order` and
    /// closes back to `order[0]`.
    pub(crate) fn from_order(order: &[usize]) -> Tour {
        let n = order.len();
        let mut tour = Tour::new(n);
        for i in 0..n {
            let prev = order[(i + n - 1) % n];
            let next = order[(i + 1) % n];
            tour.nodes[order[i]] = TourNode {
                conn1: prev,
                conn2: next,
            };
        }
        tour
    }
}
