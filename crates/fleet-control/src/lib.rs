//! `fleet-control` is the surface an out-of-process planner talks to.
//!
//! The planner proposes assignments, evaluates hypothetical plans against
//! forks, and steps the live simulation; transport (RPC framing, process
//! lifecycle) is someone else's problem. Because the engine is strictly
//! synchronous, the server simply calls engine methods inside whatever
//! request handler hosts it; no asynchrony leaks in here.
//!
//! There is deliberately no process-wide singleton: [`ControlServer`] owns
//! its one live engine as plain explicit state, and whoever hosts the server
//! decides how it is shared.

pub mod error;
pub mod server;
pub mod wire;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ControlError, ControlResult};
pub use server::{ControlServer, RunReport, TaskReport};
pub use wire::{parse_assignments, to_wire_json};
