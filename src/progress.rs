//! Progress reporting from the solver to its caller.
//!
//! The driver notifies a caller-supplied [`ProgressObserver`] once
//! after initialization, once per improving generation, and exactly
//! once at the end of the run. Delivery is synchronous on the solver's
//! thread; an interactive caller that runs the solver on a worker
//! thread forwards the snapshot to its own context from the callback.

use crate::city::City;
use crate::tour::Tour;

/// A read-only snapshot handed to the observer.
///
/// The borrows are valid only for the duration of the callback; an
/// observer that needs to keep the tour clones it.
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// The city list the run was started with.
    pub cities: &'a [City],
    /// The best tour found so far.
    pub best_tour: &'a Tour,
    /// Generations completed when this snapshot was taken. 0 for the
    /// post-initialization notification.
    pub generation: usize,
    /// True exactly once, on the terminal notification.
    pub complete: bool,
}

/// Receives progress notifications from the solver.
///
/// Any `FnMut(Progress<'_>)` closure is an observer:
///
/// ```
/// use salesman_ga::Progress;
///
/// let mut improvements = 0usize;
/// let mut observer = |p: Progress<'_>| {
///     if !p.complete {
///         improvements += 1;
///     }
/// };
/// # let _ = &mut observer;
/// ```
pub trait ProgressObserver {
    /// Called with a snapshot of the run's current state.
    fn on_progress(&mut self, progress: Progress<'_>);
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress<'_>),
{
    fn on_progress(&mut self, progress: Progress<'_>) {
        self(progress)
    }
}
