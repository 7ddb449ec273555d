//! Assignment value objects.
//!
//! An assignment represents current responsibility only: "these robots are
//! responsible for this task at this decision step." Assignments are
//! ephemeral (produced by a policy, consumed the same tick), immutable, and
//! carry no execution state: no times, no progress, no status, no history.

use std::collections::BTreeSet;

use fleet_core::{RobotId, TaskId};

/// Assignment of a crew of robots to one task.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Assignment {
    pub task_id:   TaskId,
    pub robot_ids: BTreeSet<RobotId>,
}

impl Assignment {
    pub fn new<I>(task_id: TaskId, robot_ids: I) -> Self
    where
        I: IntoIterator<Item = RobotId>,
    {
        Self {
            task_id,
            robot_ids: robot_ids.into_iter().collect(),
        }
    }

    /// Convenience constructor for the common one-robot crew.
    pub fn solo(task_id: TaskId, robot_id: RobotId) -> Self {
        Self::new(task_id, [robot_id])
    }
}
