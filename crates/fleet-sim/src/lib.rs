//! `fleet-sim` is the tick loop orchestrator of the rust_fleet simulator.
//!
//! # The seven-phase tick
//!
//! ```text
//! ① Advance time      : t_now += dt.
//! ② Solicit           : ask the assignment policy for this tick's mapping;
//!                       validate and drop items naming unknown ids.
//! ③ Task assignment   : push the reverse robot→task index into every
//!                       TaskState (unassigned/assigned transitions).
//! ④ Plan              : for each robot in id order, resolve its goal and ask
//!                       the pathfinder for a next step against a frozen
//!                       pre-tick position map.
//! ⑤ Conflicts         : clear contested steps (cell contention in the
//!                       discrete variant, body overlap in the continuous
//!                       one); the surviving plans are pairwise disjoint.
//! ⑥ Execute           : in id order: move, work, or idle each robot and
//!                       advance task lifecycles.
//! ⑦ Snapshot          : deep-copy the state maps into the history.
//! ```
//!
//! Plans are computed against the frozen pre-tick positions, so the execute
//! order cannot bias movement; conflict resolution has already removed every
//! collision before the first robot moves.
//!
//! # Engine variants
//!
//! The orchestration is generic over a sealed [`MotionModel`]:
//! [`DiscreteMotion`] (integer cells, exact arrival) and
//! [`ContinuousMotion`] (float poses, body radii, obstacle push-out). See
//! the [`motion`] module docs for exactly what varies.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fleet_assign::GreedyCapabilityAssigner;
//! use fleet_path::BfsPathfinder;
//! use fleet_sim::SimulationBuilder;
//!
//! let mut sim = SimulationBuilder::discrete(env)
//!     .robots(robots)
//!     .tasks(tasks)
//!     .robot_states(states)
//!     .assigner(GreedyCapabilityAssigner::new())
//!     .pathfinder(BfsPathfinder::new())
//!     .build()?;
//! let result = sim.run(100)?;
//! ```

pub mod builder;
pub mod error;
pub mod motion;
pub mod observer;
pub mod result;
pub mod sim;
pub mod snapshot;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use builder::SimulationBuilder;
pub use error::{SimError, SimResult};
pub use motion::{ContinuousMotion, DiscreteMotion, MotionModel};
pub use observer::{NoopObserver, SimObserver};
pub use result::SimulationResult;
pub use sim::Simulation;
pub use snapshot::Snapshot;
