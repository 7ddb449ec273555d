//! The two engine geometries, as compile-time strategies.
//!
//! Both variants share the whole orchestration; everything that differs is
//! concentrated in the [`MotionModel`] trait:
//!
//! | Aspect               | [`DiscreteMotion`]          | [`ContinuousMotion`]              |
//! |----------------------|-----------------------------|-----------------------------------|
//! | Robot pose           | integer-valued cells        | free float positions              |
//! | Goal arrival         | exact cell equality         | within ε = 0.5                    |
//! | One step             | hop one planned cell        | `min(speed·dt, dist)` translation |
//! | Conflict rule        | cell contention, low id wins| body overlap, high id yields      |
//! | Post-move correction | none                        | obstacle AABB push-out            |
//!
//! The trait is sealed: the engine's invariants are stated in terms of
//! exactly these two geometries, so outside implementations are not allowed.

use std::collections::BTreeMap;

use fleet_core::{Cell, Position, RobotId, Time};
use fleet_model::{Robot, RobotState};
use fleet_world::Environment;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::DiscreteMotion {}
    impl Sealed for super::ContinuousMotion {}
}

/// Compile-time geometry of a [`Simulation`][crate::Simulation] variant.
pub trait MotionModel: sealed::Sealed + Send + Sync + 'static {
    /// Arrival tolerance around a goal position.
    const ARRIVAL_EPS: f64;

    /// Drive `robot` toward its planned step for one tick.
    fn advance(robot: &Robot, state: &mut RobotState, step: Position, dt: Time);

    /// Clear contested planned steps so the survivors are collision-free.
    ///
    /// `plans` maps each still-moving robot to its planned position and
    /// iterates in ascending id order; `radius` looks up a robot's body
    /// radius (ignored by the discrete rule).
    fn resolve_conflicts(plans: &mut BTreeMap<RobotId, Position>, radius: impl Fn(RobotId) -> f64);

    /// Post-move correction applied right after [`advance`][Self::advance].
    fn settle(env: &Environment, robot: &Robot, state: &mut RobotState);
}

// ── DiscreteMotion ────────────────────────────────────────────────────────────

/// Integer-cell geometry: BFS-style single-cell hops, exact arrival.
pub enum DiscreteMotion {}

impl MotionModel for DiscreteMotion {
    const ARRIVAL_EPS: f64 = 0.0;

    fn advance(robot: &Robot, state: &mut RobotState, step: Position, dt: Time) {
        robot.move_towards_cell(state, step.cell(), dt);
    }

    /// Cell contention: of all robots planning into the same cell, the one
    /// with the smallest id proceeds and the rest are cleared.
    fn resolve_conflicts(plans: &mut BTreeMap<RobotId, Position>, _radius: impl Fn(RobotId) -> f64) {
        let mut claimed: BTreeMap<Cell, RobotId> = BTreeMap::new();
        let mut losers: Vec<RobotId> = Vec::new();

        // `plans` iterates in ascending id order, so the first claimant of a
        // cell is the smallest id.
        for (&id, &step) in plans.iter() {
            if claimed.insert(step.cell(), id).is_some() {
                losers.push(id);
            }
        }
        for id in losers {
            plans.remove(&id);
        }
    }

    fn settle(_env: &Environment, _robot: &Robot, _state: &mut RobotState) {}
}

// ── ContinuousMotion ──────────────────────────────────────────────────────────

/// Float-pose geometry: A*-guided gliding bodies with radii.
pub enum ContinuousMotion {}

impl MotionModel for ContinuousMotion {
    const ARRIVAL_EPS: f64 = 0.5;

    fn advance(robot: &Robot, state: &mut RobotState, step: Position, dt: Time) {
        robot.move_towards(state, step, dt);
    }

    /// Body overlap: for every pair of planned positions closer than the sum
    /// of the two radii, the robot with the larger id yields. Pairs are
    /// visited in ascending id order, so the outcome is independent of how
    /// the plans were produced.
    fn resolve_conflicts(plans: &mut BTreeMap<RobotId, Position>, radius: impl Fn(RobotId) -> f64) {
        let ids: Vec<RobotId> = plans.keys().copied().collect();
        for i in 0..ids.len() {
            let Some(&a) = plans.get(&ids[i]) else { continue };
            for j in (i + 1)..ids.len() {
                let Some(&b) = plans.get(&ids[j]) else { continue };
                if a.distance(b) < radius(ids[i]) + radius(ids[j]) {
                    plans.remove(&ids[j]);
                }
            }
        }
    }

    /// Push the robot out of any obstacle AABB it penetrates.
    ///
    /// Each cell's AABB is centered on its integer coordinate with half
    /// extent 0.5, matching the pathfinder's cell-center convention. For
    /// every obstacle among the nine cells around the robot, if the center
    /// is within `radius` of the box, the robot is translated to the nearest
    /// surface point plus `radius` along the penetration normal; a center
    /// exactly inside the box is pushed straight up.
    fn settle(env: &Environment, robot: &Robot, state: &mut RobotState) {
        let around = state.position.cell();
        for dy in -1..=1 {
            for dx in -1..=1 {
                let cell = Cell::new(around.x + dx, around.y + dy);
                if !env.is_obstacle(cell) {
                    continue;
                }
                let (min_x, max_x) = (cell.x as f64 - 0.5, cell.x as f64 + 0.5);
                let (min_y, max_y) = (cell.y as f64 - 0.5, cell.y as f64 + 0.5);
                let nearest = Position::new(
                    state.position.x.clamp(min_x, max_x),
                    state.position.y.clamp(min_y, max_y),
                );
                let depth = state.position.distance(nearest);
                if depth >= robot.radius {
                    continue;
                }
                if depth > 0.0 {
                    let scale = robot.radius / depth;
                    state.position = Position::new(
                        nearest.x + (state.position.x - nearest.x) * scale,
                        nearest.y + (state.position.y - nearest.y) * scale,
                    );
                } else {
                    // Center inside the box: no usable normal, push straight up.
                    state.position = Position::new(state.position.x, min_y - robot.radius);
                }
            }
        }
    }
}
