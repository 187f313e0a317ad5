use crate::{Algorithm, Timeline, Workload};

/// A batch scheduling policy over a single CPU.
///
/// Implementations are pure: the same workload always yields the same
/// timeline, and every unit of every burst is covered exactly once.
pub trait Scheduler {
    /// The catalog entry this scheduler implements.
    fn algorithm(&self) -> Algorithm;

    /// Runs the whole workload and returns the dispatched slices in order.
    fn simulate(&self, workload: &Workload) -> Timeline;
}
