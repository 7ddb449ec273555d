//! Robot definition, runtime state, and movement/work primitives.

use std::collections::BTreeSet;

use fleet_core::{Capability, Cell, Position, RobotId, Time};

// ── Battery drain rates (per unit of distance or time) ───────────────────────

/// Battery drained per unit of distance travelled.
pub const K_MOVE: f64 = 0.001;
/// Battery drained per tick spent working.
pub const K_WORK: f64 = 0.002;
/// Battery drained per tick spent idle.
pub const K_IDLE: f64 = 0.0005;

/// Below this remaining distance a continuous move is treated as a no-op.
const MIN_STEP: f64 = 1e-9;

// ── Robot (static definition) ─────────────────────────────────────────────────

/// Immutable description of one robot.
#[derive(Clone, PartialEq, Debug)]
pub struct Robot {
    /// Unique within a scenario.
    pub id: RobotId,

    /// What this robot can do. Feasibility for a task is set inclusion.
    pub capabilities: BTreeSet<Capability>,

    /// Distance covered per tick at full throttle. Always positive.
    pub speed: f64,

    /// Body radius, used by the continuous engine variant for overlap checks
    /// and obstacle push-out. The discrete variant ignores it.
    pub radius: f64,
}

impl Robot {
    /// Default body radius: a little under half a cell, so two robots fit in
    /// adjacent cells without touching.
    pub const DEFAULT_RADIUS: f64 = 0.4;

    pub fn new<I>(id: RobotId, capabilities: I, speed: f64) -> Self
    where
        I: IntoIterator<Item = Capability>,
    {
        Self {
            id,
            capabilities: capabilities.into_iter().collect(),
            speed,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    /// `true` if this robot's capability set covers `required`.
    #[inline]
    pub fn can_perform(&self, required: &BTreeSet<Capability>) -> bool {
        required.is_subset(&self.capabilities)
    }

    // ── Engine-invoked primitives ─────────────────────────────────────────
    //
    // These mutate the paired RobotState and nothing else. They perform no
    // decision-making: the engine has already chosen the step and verified
    // it against bounds, obstacles, and other robots.

    /// Discrete move: hop onto `target` if one tick of travel covers the
    /// Manhattan distance to it, else stay put.
    ///
    /// The planner only ever hands this an adjacent cell, so with `speed ≥ 1`
    /// and `dt = 1` the hop always happens.
    pub fn move_towards_cell(&self, state: &mut RobotState, target: Cell, dt: Time) {
        let reach = self.speed * dt.0 as f64;
        if reach >= state.position.manhattan(target.position()) as f64 {
            let travelled = state.position.distance(target.position());
            state.position = target.position();
            state.battery_level -= travelled * K_MOVE;
        }
    }

    /// Continuous move: translate `min(speed · dt, distance)` along the
    /// normalized vector toward `target`. A remaining distance below a tiny
    /// epsilon is a no-op.
    pub fn move_towards(&self, state: &mut RobotState, target: Position, dt: Time) {
        let dist = state.position.distance(target);
        if dist < MIN_STEP {
            return;
        }
        let step = (self.speed * dt.0 as f64).min(dist);
        let scale = step / dist;
        state.position = Position::new(
            state.position.x + (target.x - state.position.x) * scale,
            state.position.y + (target.y - state.position.y) * scale,
        );
        state.battery_level -= step * K_MOVE;
    }

    /// One tick of work at the current position.
    #[inline]
    pub fn work(&self, state: &mut RobotState, dt: Time) {
        state.battery_level -= dt.0 as f64 * K_WORK;
    }

    /// One tick of doing nothing.
    #[inline]
    pub fn idle(&self, state: &mut RobotState, dt: Time) {
        state.battery_level -= dt.0 as f64 * K_IDLE;
    }
}

// ── RobotState (mutable runtime state) ────────────────────────────────────────

/// Per-run mutable state for one robot.
///
/// The battery level starts in `[0, 1]` and is never clamped: it may go
/// negative, which is observable but not fatal. No decision logic lives
/// here.
#[derive(Clone, PartialEq, Debug)]
pub struct RobotState {
    pub robot_id:      RobotId,
    pub position:      Position,
    pub battery_level: f64,
}

impl RobotState {
    /// A fresh state at `position` with a full battery.
    pub fn at(robot_id: RobotId, position: Position) -> Self {
        Self {
            robot_id,
            position,
            battery_level: 1.0,
        }
    }
}
