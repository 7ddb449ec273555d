//! Outcome of a completed run.

use fleet_core::Time;

use crate::Snapshot;

/// What [`Simulation::run`][crate::Simulation::run] reports after it stops,
/// either because every task reached a terminal state or because the step
/// budget ran out.
///
/// Exhausting the budget is not an error: it comes back as
/// `completed = false` with `makespan = None`.
#[derive(Clone, PartialEq, Debug)]
pub struct SimulationResult {
    /// `true` if every task reached a terminal state within the budget.
    pub completed: bool,

    /// Number of tasks that ended `done`.
    pub tasks_succeeded: usize,

    /// Total number of tasks in the scenario.
    pub tasks_total: usize,

    /// The tick at which the last task went terminal, if the run completed.
    pub makespan: Option<Time>,

    /// One snapshot per tick, including the initial state at tick 0.
    pub snapshots: Vec<Snapshot>,
}
