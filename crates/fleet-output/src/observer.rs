//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use fleet_core::Time;
use fleet_sim::{SimObserver, SimulationResult, Snapshot};

use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult, RobotTickRow, TaskTickRow};

/// A [`SimObserver`] that records every tick's snapshot through any
/// [`OutputWriter`] backend.
///
/// Observer hooks have no return value, so write errors are stored
/// internally; after `run` returns, check with
/// [`take_error`][Self::take_error]. Only the first error is kept.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            last_error: None,
        }
    }

    /// Record one snapshot explicitly (used for the initial tick-0 state,
    /// which `run` does not replay through the observer).
    pub fn record(&mut self, snapshot: &Snapshot) {
        let result = self.write_snapshot(snapshot);
        self.store_err(result);
    }

    /// Take the stored write error (if any) after the run.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write_snapshot(&mut self, snapshot: &Snapshot) -> OutputResult<()> {
        let tick = snapshot.t_now().tick();

        let robot_rows: Vec<RobotTickRow> = snapshot
            .robot_states()
            .values()
            .map(|state| RobotTickRow {
                tick,
                robot_id: state.robot_id.0,
                x: state.position.x,
                y: state.position.y,
                battery_level: state.battery_level,
            })
            .collect();
        self.writer.write_robot_rows(&robot_rows)?;

        let task_rows: Vec<TaskTickRow> = snapshot
            .task_states()
            .values()
            .map(|state| TaskTickRow {
                tick,
                task_id: state.task_id.0,
                status: state.status.as_str(),
                work_done: state.work_done.tick(),
                crew_size: state.assigned_robot_ids.len(),
            })
            .collect();
        self.writer.write_task_rows(&task_rows)?;

        Ok(())
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, _now: Time, snapshot: &Snapshot) {
        self.record(snapshot);
    }

    fn on_run_end(&mut self, _result: &SimulationResult) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
