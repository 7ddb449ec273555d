//! `fleet-path` defines the pathfinding strategy contract and the two
//! reference implementations the engine ships with.
//!
//! # Pluggability
//!
//! The engine calls pathfinding via the [`Pathfinder`] trait, so applications
//! can swap in custom planners (D* Lite, jump-point search, learned
//! heuristics) without touching the core. A plain closure with the right
//! signature also implements the trait.
//!
//! # The next-step contract
//!
//! `next_step(environment, start, goal, occupied)` returns the *first* cell
//! of a shortest path, not the whole route: the engine re-plans every tick
//! against fresh occupancy, so a full path would be stale by the time its
//! second step mattered. Implementations must be stateless between calls and
//! must return:
//!
//! - `start` (or `goal`) when already at the goal; returning `None` there is
//!   also acceptable, the engine tests arrival separately,
//! - a cell reachable in one agent step otherwise,
//! - `None` when no path exists.
//!
//! `occupied` is the set of other robots' current cells, impassable for this
//! call only.

pub mod astar;
pub mod bfs;

#[cfg(test)]
mod tests;

use fleet_core::{Cell, Position};
use fleet_world::Environment;
use rustc_hash::FxHashSet;

pub use astar::AStarPathfinder;
pub use bfs::BfsPathfinder;

/// Pluggable next-step oracle over the occupied grid.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the engine holds them behind an
/// `Arc` so hypothetical forks can share them.
pub trait Pathfinder: Send + Sync {
    /// The first step on a path from `start` toward `goal`, or `None` when
    /// no path exists.
    fn next_step(
        &self,
        env: &Environment,
        start: Position,
        goal: Position,
        occupied: &FxHashSet<Cell>,
    ) -> Option<Position>;
}

impl<F> Pathfinder for F
where
    F: Fn(&Environment, Position, Position, &FxHashSet<Cell>) -> Option<Position> + Send + Sync,
{
    fn next_step(
        &self,
        env: &Environment,
        start: Position,
        goal: Position,
        occupied: &FxHashSet<Cell>,
    ) -> Option<Position> {
        self(env, start, goal, occupied)
    }
}
