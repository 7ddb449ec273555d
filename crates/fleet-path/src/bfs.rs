//! Breadth-first next-step search over the 4-connected grid.

use std::collections::VecDeque;

use fleet_core::{Cell, Position};
use fleet_world::Environment;
use rustc_hash::FxHashSet;

use crate::Pathfinder;

/// Reference BFS pathfinder for the discrete engine variant.
///
/// Expands the four cardinal neighbors in a fixed order (up, down, left,
/// right), treats obstacles and occupied cells as impassable, and returns
/// the first step of a shortest path. With `allow_obstacle_goal` the goal
/// cell itself may be entered even if it is an obstacle; by default such a
/// goal is simply unreachable.
#[derive(Clone, Copy, Debug, Default)]
pub struct BfsPathfinder {
    pub allow_obstacle_goal: bool,
}

impl BfsPathfinder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Pathfinder for BfsPathfinder {
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
            return Some(start);
        }

        let passable = |cell: Cell| -> bool {
            if !env.cell_in_bounds(cell) || occupied.contains(&cell) {
                return false;
            }
            if env.is_obstacle(cell) {
                // The goal may opt out of the obstacle check, intermediate
                // cells never do.
                return self.allow_obstacle_goal && cell == goal_cell;
            }
            true
        };

        let mut visited: FxHashSet<Cell> = FxHashSet::default();
        visited.insert(start_cell);

        // Each queue entry is (cell, first_step): the neighbor of `start`
        // that begins the path reaching `cell`.
        let mut queue: VecDeque<(Cell, Cell)> = VecDeque::new();

        for neighbor in start_cell.neighbors4() {
            if !passable(neighbor) {
                continue;
            }
            if neighbor == goal_cell {
                return Some(neighbor.position());
            }
            visited.insert(neighbor);
            queue.push_back((neighbor, neighbor));
        }

        while let Some((current, first_step)) = queue.pop_front() {
            for neighbor in current.neighbors4() {
                if visited.contains(&neighbor) || !passable(neighbor) {
                    continue;
                }
                if neighbor == goal_cell {
                    return Some(first_step.position());
                }
                visited.insert(neighbor);
                queue.push_back((neighbor, first_step));
            }
        }

        None
    }
}
