use fleet_core::{RobotId, TaskId};
use thiserror::Error;

/// Configuration errors: programmer bugs surfaced synchronously, no retry.
///
/// Strategy-contract violations (a policy naming unknown ids, a pathfinder
/// returning an illegal step) are deliberately *not* here; the engine drops
/// those per tick and logs a warning. Run outcomes (budget exhausted,
/// unreachable tasks, drained batteries) are not errors at all; they are
/// reported through `SimulationResult`.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("cannot step: no {0} strategy bound")]
    StrategyUnset(&'static str),

    #[error("duplicate robot id {0} in robot list")]
    DuplicateRobot(RobotId),

    #[error("duplicate task id {0} in task list")]
    DuplicateTask(TaskId),

    #[error("no initial state for robot {0}")]
    MissingRobotState(RobotId),

    #[error("state provided for unknown robot {0}")]
    UnknownRobotState(RobotId),

    #[error("state provided for unknown task {0}")]
    UnknownTaskState(TaskId),
}

pub type SimResult<T> = Result<T, SimError>;
