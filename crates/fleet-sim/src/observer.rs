//! Run observer trait for progress reporting and data collection.

use fleet_core::Time;

use crate::{SimulationResult, Snapshot};

/// Callbacks invoked by [`Simulation::run_with`][crate::Simulation::run_with]
/// at every tick boundary.
///
/// All methods have default no-op implementations so implementors only
/// override what they care about. The tick-end hook hands out the snapshot
/// the engine just recorded, which is how output writers and renderers see
/// state without the engine knowing about formats.
pub trait SimObserver {
    /// Called before a tick starts processing; `now` is the time the tick
    /// will advance from.
    fn on_tick_start(&mut self, _now: Time) {}

    /// Called after a tick completes with the snapshot recorded for it.
    fn on_tick_end(&mut self, _now: Time, _snapshot: &Snapshot) {}

    /// Called once when the run stops, with the final result.
    fn on_run_end(&mut self, _result: &SimulationResult) {}
}

/// A [`SimObserver`] that does nothing. Use when calling `run_with` without
/// caring about callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
