//! Genetic operators over the cyclic-graph tour representation.
//!
//! Both operators preserve the structural invariant that a tour is
//! exactly one Hamiltonian cycle:
//!
//! - [`crossover`] recombines two parent cycles edge by edge, accepting
//!   each candidate edge only if [`can_link`] proves it cannot close a
//!   sub-cycle shorter than the full tour.
//! - [`mutate`] relocates one city to a different position in the same
//!   cycle, rewiring three edges in place.
//!
//! Neither operator evaluates fitness; the caller must call
//! [`Tour::evaluate_fitness`] on the result.

use crate::tour::{Tour, TourNode, NO_LINK};
use rand::Rng;

/// Recombines two parent tours into one child tour.
///
/// The operator is **not symmetric**: `crossover(p1, p2, rng)` and
/// `crossover(p2, p1, rng)` can produce different children, and the
/// driver calls it twice with the parents swapped to get two children.
///
/// Edges are placed in three phases, each guarded by [`can_link`]:
///
/// 1. **Consensus** — edges both parents agree on, tried through all
///    four slot pairings, in city-index order.
/// 2. **Alternating preference** — for cities still under-filled, take
///    the first valid edge from one parent (parent 1 for odd city
///    indices, parent 2 for even), falling back to the other parent;
///    a city's second open slot flips the preference.
/// 3. **Random completion** — any remaining open slot is filled by
///    drawing uniformly random cities until one passes [`can_link`].
///    Enough open slots remain by construction for this to terminate.
///
/// The child's fitness is left unevaluated.
pub fn crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> Tour {
    let n = parent1.len();
    debug_assert_eq!(n, parent2.len(), "parents must cover the same cities");

    let mut child = Tour::new(n);
    // Edge count per city in the child, 0..=2.
    let mut usage = vec![0u8; n];

    // Phase 1: edges both parents agree on.
    for city in 0..n {
        if usage[city] < 2 {
            let p1 = parent1.node(city);
            let p2 = parent2.node(city);

            if p1.conn1 == p2.conn1 {
                try_join(&mut child, &mut usage, city, p1.conn1);
            }
            if p1.conn2 == p2.conn2 {
                try_join(&mut child, &mut usage, city, p1.conn2);
            }
            if p1.conn1 == p2.conn2 {
                try_join(&mut child, &mut usage, city, p1.conn1);
            }
            if p1.conn2 == p2.conn1 {
                try_join(&mut child, &mut usage, city, p1.conn2);
            }
        }
    }

    // Phase 2: the parents disagree on what is left, so alternate which
    // parent is preferred by city-index parity.
    for city in 0..n {
        if usage[city] < 2 {
            let next = if city % 2 == 1 {
                parent_edge(parent1, parent2, &child, &usage, city)
            } else {
                parent_edge(parent2, parent1, &child, &usage, city)
            };

            if let Some(next_city) = next {
                join_cities(&mut child, &mut usage, city, next_city);

                // Second open slot: flip the preference.
                if usage[city] == 1 {
                    let next = if city % 2 != 1 {
                        parent_edge(parent1, parent2, &child, &usage, city)
                    } else {
                        parent_edge(parent2, parent1, &child, &usage, city)
                    };
                    if let Some(next_city) = next {
                        join_cities(&mut child, &mut usage, city, next_city);
                    }
                }
            }
        }
    }

    // Phase 3: whatever is left cannot come from either parent without
    // creating disconnected loops, so complete randomly.
    for city in 0..n {
        while usage[city] < 2 {
            let next_city = loop {
                let candidate = rng.random_range(0..n);
                if can_link(&child, &usage, city, candidate) {
                    break candidate;
                }
            };
            join_cities(&mut child, &mut usage, city, next_city);
        }
    }

    child
}

/// Relocates one random city to a new position in the cycle.
///
/// City A is unhooked by wiring its two neighbors directly to each
/// other, then spliced back in between a second random city B and B's
/// `conn2` neighbor. The tour stays a single cycle throughout; the
/// cached fitness is invalidated.
pub fn mutate<R: Rng>(tour: &mut Tour, rng: &mut R) {
    let n = tour.len();
    debug_assert!(n >= 3, "relocation needs at least 3 cities");

    let city = rng.random_range(0..n);
    let TourNode {
        conn1: left,
        conn2: right,
    } = tour.nodes[city];

    // Unhook: whichever slot of each neighbor pointed at `city` now
    // points at the other neighbor.
    if tour.nodes[left].conn1 == city {
        tour.nodes[left].conn1 = right;
    } else {
        tour.nodes[left].conn2 = right;
    }
    if tour.nodes[right].conn1 == city {
        tour.nodes[right].conn1 = left;
    } else {
        tour.nodes[right].conn2 = left;
    }

    // Splice `city` back in elsewhere, between `other` and the city
    // behind its conn2 slot.
    let other = loop {
        let candidate = rng.random_range(0..n);
        if candidate != city {
            break candidate;
        }
    };
    let after = tour.nodes[other].conn2;

    tour.nodes[city].conn1 = other;
    tour.nodes[city].conn2 = after;
    tour.nodes[other].conn2 = city;
    if tour.nodes[after].conn1 == other {
        tour.nodes[after].conn1 = city;
    } else {
        tour.nodes[after].conn2 = city;
    }

    tour.fitness = f64::INFINITY;
}

/// Tests whether linking `city1`–`city2` keeps a partially-built child
/// completable into a single n-cycle.
///
/// Rejects self-links and cities already at degree 2. If either city
/// still has degree 0 the link cannot close any cycle and is accepted
/// immediately. Otherwise the child graph is walked from `city1` along
/// each of its existing edges for at most n−2 steps: reaching `city2`
/// within the budget means the link would close a cycle shorter than
/// the full tour, so it is rejected; exhausting the budget means the
/// only cycle the link could close is the full n-cycle, so it is
/// accepted.
pub(crate) fn can_link(child: &Tour, usage: &[u8], city1: usize, city2: usize) -> bool {
    if city1 == city2 || usage[city1] == 2 || usage[city2] == 2 {
        return false;
    }
    if usage[city1] == 0 || usage[city2] == 0 {
        return true;
    }

    let n = child.len();
    for direction in 0..2 {
        let mut last = city1;
        let mut current = if direction == 0 {
            child.nodes[city1].conn1
        } else {
            child.nodes[city1].conn2
        };

        let mut steps = 0;
        while current != NO_LINK && current != city2 && steps < n - 2 {
            steps += 1;
            let node = child.nodes[current];
            if last != node.conn1 {
                last = current;
                current = node.conn1;
            } else {
                last = current;
                current = node.conn2;
            }
        }

        // Connected, but only through every other city: the link closes
        // the full tour and is fine.
        if steps >= n - 2 {
            return true;
        }
        // Connected by a shorter path: the link would close a sub-cycle.
        if current == city2 {
            return false;
        }
    }

    // Not connected in either direction.
    true
}

/// Links `city1`–`city2` in the child and updates both degree counts.
/// Each endpoint fills `conn1` first, then `conn2`.
fn join_cities(child: &mut Tour, usage: &mut [u8], city1: usize, city2: usize) {
    let node1 = &mut child.nodes[city1];
    if node1.conn1 == NO_LINK {
        node1.conn1 = city2;
    } else {
        node1.conn2 = city2;
    }

    let node2 = &mut child.nodes[city2];
    if node2.conn1 == NO_LINK {
        node2.conn1 = city1;
    } else {
        node2.conn2 = city1;
    }

    usage[city1] += 1;
    usage[city2] += 1;
}

/// Links `city1`–`city2` only if [`can_link`] allows it.
fn try_join(child: &mut Tour, usage: &mut [u8], city1: usize, city2: usize) {
    if can_link(child, usage, city1, city2) {
        join_cities(child, usage, city1, city2);
    }
}

/// First valid edge for `city` taken from `parent`'s slots (`conn1`
/// first), or `None` if neither passes [`can_link`].
fn find_next_city(parent: &Tour, child: &Tour, usage: &[u8], city: usize) -> Option<usize> {
    let node = parent.node(city);
    if can_link(child, usage, city, node.conn1) {
        return Some(node.conn1);
    }
    if can_link(child, usage, city, node.conn2) {
        return Some(node.conn2);
    }
    None
}

/// [`find_next_city`] against `preferred`, falling back to `fallback`.
fn parent_edge(
    preferred: &Tour,
    fallback: &Tour,
    child: &Tour,
    usage: &[u8],
    city: usize,
) -> Option<usize> {
    find_next_city(preferred, child, usage, city)
        .or_else(|| find_next_city(fallback, child, usage, city))
}
