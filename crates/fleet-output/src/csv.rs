//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `robot_ticks.csv`
//! - `task_ticks.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, RobotTickRow, TaskTickRow};

/// Writes trajectory output to two CSV files.
pub struct CsvWriter {
    robots:   Writer<File>,
    tasks:    Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut robots = Writer::from_path(dir.join("robot_ticks.csv"))?;
        robots.write_record(["tick", "robot_id", "x", "y", "battery_level"])?;

        let mut tasks = Writer::from_path(dir.join("task_ticks.csv"))?;
        tasks.write_record(["tick", "task_id", "status", "work_done", "crew_size"])?;

        Ok(Self {
            robots,
            tasks,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_robot_rows(&mut self, rows: &[RobotTickRow]) -> OutputResult<()> {
        for row in rows {
            self.robots.write_record(&[
                row.tick.to_string(),
                row.robot_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.battery_level.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_task_rows(&mut self, rows: &[TaskTickRow]) -> OutputResult<()> {
        for row in rows {
            self.tasks.write_record(&[
                row.tick.to_string(),
                row.task_id.to_string(),
                row.status.to_string(),
                row.work_done.to_string(),
                row.crew_size.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.robots.flush()?;
        self.tasks.flush()?;
        Ok(())
    }
}
