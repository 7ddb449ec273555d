//! `fleet-model` holds the domain objects the engine drives each tick.
//!
//! # Definition vs. state
//!
//! Every entity is split into an immutable *definition* and a mutable
//! *runtime state*:
//!
//! - [`Robot`] (capabilities, speed, body radius) vs. [`RobotState`]
//!   (position, battery level),
//! - [`Task`] (type, priority, work time, constraints) vs. [`TaskState`]
//!   (lifecycle status, crew, progress, timestamps).
//!
//! Definitions are shared-readable and never change after construction; the
//! simulation exclusively owns the states and mutates them through the
//! engine-invoked operations defined here. None of these operations make
//! decisions, check bounds, or detect collisions; that is the engine's job.
//!
//! [`Assignment`] is the ephemeral value object assignment policies produce:
//! "these robots should work on this task right now", nothing more.

pub mod assignment;
pub mod robot;
pub mod task;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use assignment::Assignment;
pub use robot::{K_IDLE, K_MOVE, K_WORK, Robot, RobotState};
pub use task::{SpatialConstraint, SpatialTarget, Task, TaskState, TaskStatus, TaskType};
