//! A* next-step search over the 8-connected grid.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use fleet_core::{Cell, Position};
use fleet_world::Environment;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::Pathfinder;

const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// Reference A* pathfinder for the continuous engine variant.
///
/// Improvements over BFS:
///
/// - 8-connected grid (diagonal movement allowed), cardinal cost 1 and
///   diagonal cost √2,
/// - Euclidean heuristic for direct paths,
/// - obstacle inflation: the cardinal ring around every obstacle is also
///   blocked so a robot body (radius ≈ 0.4) cannot clip an obstacle AABB
///   corner. The goal cell itself is never inflated, otherwise a target
///   next to a wall would be unreachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct AStarPathfinder;

impl AStarPathfinder {
    pub fn new() -> Self {
        Self
    }
}

/// Total-ordered path cost. Costs are finite sums of 1, √2, and Euclidean
/// heuristics, so `total_cmp` never sees a NaN.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Pathfinder for AStarPathfinder {
    fn next_step(
        &self,
        env: &Environment,
        start: Position,
        goal: Position,
        occupied: &FxHashSet<Cell>,
    ) -> Option<Position> {
        let start_cell = start.cell();
        let goal_cell = goal.cell();

        if start_cell == goal_cell {
            return Some(goal);
        }
        if env.is_obstacle(start_cell) {
            return None;
        }

        // Blocked = obstacles + inflated ring (minus the goal) + occupied.
        let mut blocked: FxHashSet<Cell> = env.obstacles().clone();
        for &obstacle in env.obstacles() {
            for ring in obstacle.neighbors4() {
                if ring != goal_cell && !env.is_obstacle(ring) {
                    blocked.insert(ring);
                }
            }
        }
        blocked.extend(occupied.iter().copied());

        let h = |cell: Cell| Cost(cell.position().distance(goal_cell.position()));

        // Min-heap entries: (f, g, cell, first_step). The trailing cell keys
        // make tie-breaking between equal-cost paths deterministic.
        let mut open: BinaryHeap<std::cmp::Reverse<(Cost, Cost, Cell, Cell)>> = BinaryHeap::new();
        let mut g_score: FxHashMap<Cell, f64> = FxHashMap::default();
        g_score.insert(start_cell, 0.0);

        for (neighbor, cost) in neighbors8(env, start_cell) {
            if blocked.contains(&neighbor) {
                continue;
            }
            if neighbor == goal_cell {
                return Some(neighbor.position());
            }
            g_score.insert(neighbor, cost);
            let f = Cost(cost + h(neighbor).0);
            open.push(std::cmp::Reverse((f, Cost(cost), neighbor, neighbor)));
        }

        let mut closed: FxHashSet<Cell> = FxHashSet::default();
        closed.insert(start_cell);

        while let Some(std::cmp::Reverse((_, Cost(g), current, first_step))) = open.pop() {
            if !closed.insert(current) {
                continue;
            }
            if current == goal_cell {
                return Some(first_step.position());
            }
            for (neighbor, cost) in neighbors8(env, current) {
                if closed.contains(&neighbor) || blocked.contains(&neighbor) {
                    continue;
                }
                let tentative = g + cost;
                let improved = g_score
                    .get(&neighbor)
                    .is_none_or(|&known| tentative < known);
                if improved {
                    g_score.insert(neighbor, tentative);
                    let f = Cost(tentative + h(neighbor).0);
                    open.push(std::cmp::Reverse((f, Cost(tentative), neighbor, first_step)));
                }
            }
        }

        None
    }
}

/// In-bounds 8-connected neighbors with movement costs, cardinals first.
fn neighbors8(env: &Environment, cell: Cell) -> impl Iterator<Item = (Cell, f64)> {
    const OFFSETS: [(i32, i32, f64); 8] = [
        (1, 0, 1.0),
        (-1, 0, 1.0),
        (0, 1, 1.0),
        (0, -1, 1.0),
        (1, 1, SQRT_2),
        (1, -1, SQRT_2),
        (-1, 1, SQRT_2),
        (-1, -1, SQRT_2),
    ];
    OFFSETS
        .into_iter()
        .map(move |(dx, dy, cost)| (Cell::new(cell.x + dx, cell.y + dy), cost))
        .filter(move |&(c, _)| env.cell_in_bounds(c))
}
