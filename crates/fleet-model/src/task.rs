//! Task definition, lifecycle state, and the engine-invoked transitions.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use fleet_core::{Capability, Position, RobotId, TaskId, Time, ZoneId};

// ── TaskType ──────────────────────────────────────────────────────────────────

/// The functional kind of a task.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskType {
    RoutineInspection,
    AnomalyInvestigation,
    PreventiveMaintenance,
    EmergencyResponse,
    Pickup,
}

impl TaskType {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskType::RoutineInspection => "routine_inspection",
            TaskType::AnomalyInvestigation => "anomaly_investigation",
            TaskType::PreventiveMaintenance => "preventive_maintenance",
            TaskType::EmergencyResponse => "emergency_response",
            TaskType::Pickup => "pickup",
        }
    }
}

impl FromStr for TaskType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routine_inspection" => Ok(TaskType::RoutineInspection),
            "anomaly_investigation" => Ok(TaskType::AnomalyInvestigation),
            "preventive_maintenance" => Ok(TaskType::PreventiveMaintenance),
            "emergency_response" => Ok(TaskType::EmergencyResponse),
            "pickup" => Ok(TaskType::Pickup),
            other => Err(format!("unknown task type: {other:?}")),
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Spatial constraint ────────────────────────────────────────────────────────

/// Where a task's work must happen: a concrete position or any cell of a
/// named zone.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum SpatialTarget {
    Point(Position),
    Zone(ZoneId),
}

/// A task's location requirement.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpatialConstraint {
    pub target: SpatialTarget,

    /// How far from the target a robot may stand and still work. Zero means
    /// exactly at the target (up to the engine variant's arrival tolerance).
    pub max_distance: u32,
}

impl SpatialConstraint {
    pub fn at(target: Position) -> Self {
        Self {
            target:       SpatialTarget::Point(target),
            max_distance: 0,
        }
    }

    pub fn in_zone(zone: ZoneId) -> Self {
        Self {
            target:       SpatialTarget::Zone(zone),
            max_distance: 0,
        }
    }
}

// ── Task (static definition) ──────────────────────────────────────────────────

/// Immutable description of one work item.
#[derive(Clone, PartialEq, Debug)]
pub struct Task {
    /// Unique within a scenario.
    pub id: TaskId,

    pub task_type: TaskType,

    /// Higher is more important. Policies may use it; the engine does not.
    pub priority: i32,

    /// Ticks of accumulated work needed to finish.
    pub required_work_time: Time,

    /// Where the work must happen. `None` means the assigned robot works
    /// wherever it stands.
    pub spatial_constraint: Option<SpatialConstraint>,

    /// Capabilities a robot must have to be assigned.
    pub required_capabilities: BTreeSet<Capability>,

    /// Tasks that should complete first. Carried for policies; the engine
    /// does not enforce ordering.
    pub dependencies: BTreeSet<TaskId>,

    /// Soft deadline in ticks. Carried for policies; the engine does not
    /// fail tasks that miss it.
    pub deadline: Option<Time>,
}

impl Task {
    pub fn new(id: TaskId, task_type: TaskType, priority: i32, required_work_time: Time) -> Self {
        Self {
            id,
            task_type,
            priority,
            required_work_time,
            spatial_constraint: None,
            required_capabilities: BTreeSet::new(),
            dependencies: BTreeSet::new(),
            deadline: None,
        }
    }

    /// Builder-style setter for the spatial constraint.
    pub fn with_constraint(mut self, constraint: SpatialConstraint) -> Self {
        self.spatial_constraint = Some(constraint);
        self
    }

    /// Builder-style setter for the required capability set.
    pub fn with_capabilities<I>(mut self, caps: I) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        self.required_capabilities = caps.into_iter().collect();
        self
    }

    // ── Engine-invoked transitions ────────────────────────────────────────

    /// Replace the task's current crew.
    ///
    /// Lifecycle effects: an empty crew reverts `assigned` to `unassigned`;
    /// a non-empty crew promotes `unassigned` to `assigned`. Once
    /// `in_progress`, crew changes never revert the status. Terminal tasks
    /// ignore the call entirely (their crew was cleared on completion and
    /// stays cleared).
    pub fn set_assignment(&self, state: &mut TaskState, robot_ids: BTreeSet<RobotId>) {
        if state.status.is_terminal() {
            return;
        }
        if robot_ids.is_empty() {
            if matches!(state.status, TaskStatus::Unassigned | TaskStatus::Assigned) {
                state.status = TaskStatus::Unassigned;
            }
        } else if state.status == TaskStatus::Unassigned {
            state.status = TaskStatus::Assigned;
        }
        state.assigned_robot_ids = robot_ids;
    }

    /// Apply one slice of work.
    ///
    /// No-op on terminal tasks. The first application stamps `started_at`.
    /// Progress accumulates linearly; reaching `required_work_time` marks
    /// the task done at `now`.
    pub fn apply_work(&self, state: &mut TaskState, dt: Time, now: Time) {
        if state.status.is_terminal() {
            return;
        }
        if state.started_at.is_none() {
            state.started_at = Some(now);
        }
        state.status = TaskStatus::InProgress;
        state.work_done = state.work_done.advance(dt);
        if state.work_done >= self.required_work_time {
            self.mark_done(state, now);
        }
    }

    /// Terminal transition to `done`. Clears the crew and stamps
    /// `completed_at`.
    pub fn mark_done(&self, state: &mut TaskState, now: Time) {
        state.status = TaskStatus::Done;
        state.completed_at = Some(now);
        state.assigned_robot_ids.clear();
    }

    /// Terminal transition to `failed`. Clears the crew and stamps
    /// `completed_at`.
    pub fn mark_failed(&self, state: &mut TaskState, now: Time) {
        state.status = TaskStatus::Failed;
        state.completed_at = Some(now);
        state.assigned_robot_ids.clear();
    }
}

// ── TaskStatus / TaskState ────────────────────────────────────────────────────

/// Lifecycle status of a task within a single run.
///
/// `unassigned → assigned → in_progress → done | failed`; the two terminal
/// states never change again.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TaskStatus {
    #[default]
    Unassigned,
    Assigned,
    InProgress,
    Done,
    Failed,
}

impl TaskStatus {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Done | TaskStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Unassigned => "unassigned",
            TaskStatus::Assigned => "assigned",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
            TaskStatus::Failed => "failed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unassigned" => Ok(TaskStatus::Unassigned),
            "assigned" => Ok(TaskStatus::Assigned),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            "failed" => Ok(TaskStatus::Failed),
            other => Err(format!("unknown task status: {other:?}")),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run mutable state for one task. Intentionally minimal: intent
/// (duration, capabilities, constraints) lives on [`Task`].
#[derive(Clone, PartialEq, Debug)]
pub struct TaskState {
    pub task_id: TaskId,
    pub status:  TaskStatus,

    /// Current crew, task-centric (supports multi-robot tasks).
    pub assigned_robot_ids: BTreeSet<RobotId>,

    /// Accumulated work, in opaque ticks.
    pub work_done: Time,

    pub started_at:   Option<Time>,
    pub completed_at: Option<Time>,
}

impl TaskState {
    /// A fresh, unassigned, zero-progress state.
    pub fn fresh(task_id: TaskId) -> Self {
        Self {
            task_id,
            status: TaskStatus::Unassigned,
            assigned_robot_ids: BTreeSet::new(),
            work_done: Time::ZERO,
            started_at: None,
            completed_at: None,
        }
    }
}
