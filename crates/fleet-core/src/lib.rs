//! `fleet-core` is the foundation of the `rust_fleet` multi-robot simulator.
//!
//! This crate is a dependency of every other `fleet-*` crate. It intentionally
//! has no `fleet-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module         | Contents                                          |
//! |----------------|---------------------------------------------------|
//! | [`ids`]        | `RobotId`, `TaskId`, `ZoneId`                     |
//! | [`pos`]        | `Cell`, `Position`, grid geometry                 |
//! | [`time`]       | `Time` (opaque tick count)                        |
//! | [`capability`] | `Capability` tag enum                             |
//! | [`error`]      | `CoreError`, `CoreResult`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod capability;
pub mod error;
pub mod ids;
pub mod pos;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capability::Capability;
pub use error::{CoreError, CoreResult};
pub use ids::{RobotId, TaskId, ZoneId};
pub use pos::{Cell, Position};
pub use time::Time;
