//! A policy that always returns the same assignment list.

use fleet_model::{Assignment, Robot, Task};

use crate::AssignmentPolicy;

/// Returns a fixed assignment list every tick, ignoring the inputs.
///
/// This is the policy hypothetical forks run under: the caller locks in a
/// candidate plan, forks the engine, and measures the outcome without any
/// re-planning interference.
#[derive(Clone, Debug)]
pub struct FixedAssignment {
    assignments: Vec<Assignment>,
}

impl FixedAssignment {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        Self { assignments }
    }
}

impl AssignmentPolicy for FixedAssignment {
    fn assign(&self, _tasks: &[Task], _robots: &[Robot]) -> Vec<Assignment> {
        self.assignments.clone()
    }
}
