//! `fleet-world` models the static world the robots move through: a bounded
//! rectangular grid with obstacle cells and typed, non-overlapping zones.
//!
//! The environment is mutable only during scenario construction. Once a
//! simulation is built on top of it, the engine treats it as read-only and
//! shares it by reference between snapshots and forks.

pub mod environment;
pub mod error;
pub mod zone;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use environment::Environment;
pub use error::{WorldError, WorldResult};
pub use zone::{Zone, ZoneType};
