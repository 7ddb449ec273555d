//! Immutable point-in-time views of engine state.

use std::collections::BTreeMap;
use std::sync::Arc;

use fleet_core::{RobotId, TaskId, Time};
use fleet_model::{Robot, RobotState, Task, TaskState};
use fleet_world::Environment;

/// A deep-copied, read-only view of the simulation at one tick.
///
/// The environment and the two definition lists are immutable after engine
/// construction, so they are shared by reference (`Arc`); the two state maps
/// are owned copies, isolated from the live engine. Mutating live state
/// after a snapshot is taken never affects the snapshot, and snapshots
/// outlive the engine that produced them.
///
/// `PartialEq` compares the full captured state, which is what the
/// isolation and determinism tests lean on.
#[derive(Clone, PartialEq, Debug)]
pub struct Snapshot {
    pub(crate) env:          Arc<Environment>,
    pub(crate) robots:       Arc<Vec<Robot>>,
    pub(crate) tasks:        Arc<Vec<Task>>,
    pub(crate) robot_states: BTreeMap<RobotId, RobotState>,
    pub(crate) task_states:  BTreeMap<TaskId, TaskState>,
    pub(crate) t_now:        Time,
}

impl Snapshot {
    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Robot definitions, in scenario order.
    #[inline]
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    /// Task definitions, in scenario order.
    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Captured robot states, keyed and iterated in id order.
    #[inline]
    pub fn robot_states(&self) -> &BTreeMap<RobotId, RobotState> {
        &self.robot_states
    }

    /// Captured task states, keyed and iterated in id order.
    #[inline]
    pub fn task_states(&self) -> &BTreeMap<TaskId, TaskState> {
        &self.task_states
    }

    /// The tick this snapshot was taken at.
    #[inline]
    pub fn t_now(&self) -> Time {
        self.t_now
    }
}
