//! The control server: one live simulation, explicit ownership.

use serde::Serialize;

use fleet_assign::FixedAssignment;
use fleet_model::Assignment;
use fleet_sim::{MotionModel, SimResult, Simulation, Snapshot};

use crate::ControlResult;

/// Owns the live simulation an external planner manipulates.
///
/// Every operation is a plain synchronous method call. Forked evaluation
/// never touches the live engine: [`evaluate`][Self::evaluate] runs the
/// candidate plan on a deep-copied fork and only a [`RunReport`] comes back.
pub struct ControlServer<M: MotionModel> {
    live: Simulation<M>,
}

impl<M: MotionModel> ControlServer<M> {
    pub fn new(live: Simulation<M>) -> Self {
        Self { live }
    }

    /// Read-only access to the live engine.
    pub fn live(&self) -> &Simulation<M> {
        &self.live
    }

    /// A snapshot of the live state, for the planner's situational picture.
    pub fn snapshot(&self) -> Snapshot {
        self.live.snapshot()
    }

    /// Advance the live simulation by `n` ticks.
    pub fn step(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.live.step()?;
        }
        Ok(())
    }

    /// Pin the live simulation to a fixed assignment list.
    ///
    /// From the next tick on, the live engine follows exactly this plan
    /// instead of whatever policy it was built with.
    pub fn propose(&mut self, assignments: Vec<Assignment>) {
        self.live.set_assigner(FixedAssignment::new(assignments));
    }

    /// Evaluate a candidate plan on a fork of the live state.
    ///
    /// Runs at most `max_steps` ticks and reports the outcome. The live
    /// simulation is untouched.
    pub fn evaluate(
        &self,
        assignments: Vec<Assignment>,
        max_steps: u64,
    ) -> ControlResult<RunReport> {
        let mut fork = self.live.fork(assignments);
        let budget = fork.t_now().tick() + max_steps;
        let result = fork.run(budget)?;

        let per_task = fork
            .tasks()
            .iter()
            .map(|task| {
                let state = &fork.task_states()[&task.id];
                TaskReport {
                    task_id:            task.id.0,
                    status:             state.status.as_str(),
                    work_done:          state.work_done.tick(),
                    required_work_time: task.required_work_time.tick(),
                }
            })
            .collect();

        Ok(RunReport {
            completed:       result.completed,
            tasks_succeeded: result.tasks_succeeded,
            tasks_total:     result.tasks_total,
            makespan:        result.makespan.map(|t| t.tick()),
            per_task,
        })
    }
}

// ── Reports ───────────────────────────────────────────────────────────────────

/// The planner-facing outcome of an evaluation run. Serializes straight
/// into the reply payload.
#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct RunReport {
    pub completed:       bool,
    pub tasks_succeeded: usize,
    pub tasks_total:     usize,
    pub makespan:        Option<u64>,
    pub per_task:        Vec<TaskReport>,
}

#[derive(Clone, PartialEq, Eq, Debug, Serialize)]
pub struct TaskReport {
    pub task_id:            u32,
    pub status:             &'static str,
    pub work_done:          u64,
    pub required_work_time: u64,
}
