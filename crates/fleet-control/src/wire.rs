//! The assignment wire format.
//!
//! Planners describe hypothetical and override assignments as a JSON array
//! of `{ "task_id": <int>, "robot_ids": [<int>, ...] }` objects. This module
//! converts between that wire shape and the engine's [`Assignment`] value
//! objects.

use serde::{Deserialize, Serialize};

use fleet_core::{RobotId, TaskId};
use fleet_model::Assignment;

use crate::ControlResult;

#[derive(Serialize, Deserialize)]
struct AssignmentWire {
    task_id:   u32,
    robot_ids: Vec<u32>,
}

/// Parse a wire-format JSON array into assignments.
///
/// Only the shape is validated here; unknown ids are the engine's problem
/// (it drops them per tick as strategy-contract violations).
pub fn parse_assignments(json: &str) -> ControlResult<Vec<Assignment>> {
    let wire: Vec<AssignmentWire> = serde_json::from_str(json)?;
    Ok(wire
        .into_iter()
        .map(|record| {
            Assignment::new(
                TaskId(record.task_id),
                record.robot_ids.into_iter().map(RobotId),
            )
        })
        .collect())
}

/// Serialize assignments back into the wire format.
pub fn to_wire_json(assignments: &[Assignment]) -> ControlResult<String> {
    let wire: Vec<AssignmentWire> = assignments
        .iter()
        .map(|assignment| AssignmentWire {
            task_id:   assignment.task_id.0,
            robot_ids: assignment.robot_ids.iter().map(|id| id.0).collect(),
        })
        .collect();
    Ok(serde_json::to_string(&wire)?)
}
