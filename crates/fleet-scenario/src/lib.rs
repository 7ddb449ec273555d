//! `fleet-scenario` turns scene descriptions into ready-to-run simulations.
//!
//! # Scenario JSON
//!
//! The loader consumes one JSON object with five sections:
//!
//! ```json
//! {
//!   "environment": { "width": 12, "height": 12,
//!                    "obstacles": [[5, 3], [5, 4]],
//!                    "zones": [{ "id": 1, "type": "loading",
//!                                "positions": [[0, 0], [1, 0]] }] },
//!   "robots":       [{ "id": 1, "capabilities": ["vision"], "speed": 1.0 }],
//!   "tasks":        [{ "id": 1, "type": "pickup", "priority": 3,
//!                      "required_work_time": 20,
//!                      "spatial_constraint": { "target": [9, 9] },
//!                      "required_capabilities": ["manipulation"] }],
//!   "robot_states": [{ "robot_id": 1, "position": [0, 0] }],
//!   "task_states":  [{ "task_id": 1 }]
//! }
//! ```
//!
//! Raw records are deserialized with serde and then converted into domain
//! types with full validation; every rejected value carries enough context
//! to locate it in the file. Duplicate obstacle cells collapse silently;
//! duplicate ids, overlapping zones, and out-of-bounds cells are loader
//! errors. The loader is the sole source of validation errors on external
//! input: once a [`Scenario`] exists, the engine can trust it.

pub mod error;
pub mod loader;
pub mod workload;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ScenarioError, ScenarioResult};
pub use loader::Scenario;
pub use workload::WorkloadGenerator;
