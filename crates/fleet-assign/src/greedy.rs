//! The baseline greedy assigner.

use rustc_hash::FxHashSet;

use fleet_core::RobotId;
use fleet_model::{Assignment, Robot, Task};

use crate::AssignmentPolicy;

/// First-fit greedy assignment by input order.
///
/// Iterates tasks in list order and gives each one the first not-yet-used
/// robot whose capability set covers the task's requirements, as a solo
/// crew. Tasks with no feasible robot left are skipped. Both iteration
/// orders being the input orders makes the result deterministic and cheap
/// to reason about; it is the reference baseline, not a good scheduler.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyCapabilityAssigner;

impl GreedyCapabilityAssigner {
    pub fn new() -> Self {
        Self
    }
}

impl AssignmentPolicy for GreedyCapabilityAssigner {
    fn assign(&self, tasks: &[Task], robots: &[Robot]) -> Vec<Assignment> {
        let mut used: FxHashSet<RobotId> = FxHashSet::default();
        let mut assignments = Vec::new();

        for task in tasks {
            let candidate = robots.iter().find(|robot| {
                !used.contains(&robot.id) && robot.can_perform(&task.required_capabilities)
            });
            if let Some(robot) = candidate {
                used.insert(robot.id);
                assignments.push(Assignment::solo(task.id, robot.id));
            }
        }

        assignments
    }
}
