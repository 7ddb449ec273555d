//! `fleet-output` consumes snapshots and turns them into something a human
//! or a spreadsheet can look at.
//!
//! Two consumers live here:
//!
//! - **Recording**: an [`OutputWriter`] backend trait with a CSV
//!   implementation, fed by [`SimOutputObserver`] from the engine's observer
//!   hooks. One row per robot per tick and one row per task per tick.
//! - **Viewing**: a [`Frame`] character grid built from a snapshot and a
//!   diff-based ANSI [`TerminalRenderer`] that redraws only what changed.
//!
//! Neither consumer is known to the engine; both see state exclusively
//! through [`Snapshot`][fleet_sim::Snapshot]s.

pub mod csv;
pub mod error;
pub mod frame;
pub mod observer;
pub mod row;
pub mod terminal;
pub mod writer;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use crate::csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use frame::{Frame, render_snapshot};
pub use observer::SimOutputObserver;
pub use row::{RobotTickRow, TaskTickRow};
pub use terminal::TerminalRenderer;
pub use writer::OutputWriter;
