//! Tests for the reference pathfinders.

use fleet_core::{Cell, Position};
use fleet_world::Environment;
use rustc_hash::FxHashSet;

use crate::{AStarPathfinder, BfsPathfinder, Pathfinder};

fn env(width: u32, height: u32, obstacles: &[(i32, i32)]) -> Environment {
    let mut env = Environment::new(width, height);
    for &(x, y) in obstacles {
        env.add_obstacle(Cell::new(x, y)).unwrap();
    }
    env
}

fn pos(x: f64, y: f64) -> Position {
    Position::new(x, y)
}

fn cells(list: &[(i32, i32)]) -> FxHashSet<Cell> {
    list.iter().map(|&(x, y)| Cell::new(x, y)).collect()
}

fn free() -> FxHashSet<Cell> {
    FxHashSet::default()
}

// ── BFS ───────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod bfs {
    use super::*;

    #[test]
    fn start_equals_goal_returns_start() {
        let env = env(5, 5, &[]);
        let p = pos(2.0, 2.0);
        assert_eq!(BfsPathfinder::new().next_step(&env, p, p, &free()), Some(p));
    }

    #[test]
    fn adjacent_goal_returns_goal() {
        let env = env(5, 5, &[]);
        let step = BfsPathfinder::new().next_step(&env, pos(2.0, 2.0), pos(3.0, 2.0), &free());
        assert_eq!(step, Some(pos(3.0, 2.0)));
    }

    #[test]
    fn straight_line_returns_first_step() {
        let env = env(5, 5, &[]);
        let step = BfsPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(3.0, 0.0), &free());
        assert_eq!(step, Some(pos(1.0, 0.0)));
    }

    #[test]
    fn detours_around_obstacle() {
        let env = env(5, 5, &[(1, 0)]);
        let step = BfsPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(2.0, 0.0), &free());
        // Must go down first to get around the obstacle.
        assert_eq!(step, Some(pos(0.0, 1.0)));
    }

    #[test]
    fn detours_around_occupied_cell() {
        let env = env(5, 5, &[]);
        let occupied = cells(&[(1, 0)]);
        let step = BfsPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(2.0, 0.0), &occupied);
        assert_eq!(step, Some(pos(0.0, 1.0)));
    }

    #[test]
    fn walled_off_goal_returns_none() {
        let env = env(3, 3, &[(1, 2), (2, 1)]);
        let step = BfsPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(2.0, 2.0), &free());
        assert_eq!(step, None);
    }

    #[test]
    fn surrounded_start_returns_none() {
        let env = env(5, 5, &[]);
        let occupied = cells(&[(2, 1), (2, 3), (1, 2), (3, 2)]);
        let step = BfsPathfinder::new().next_step(&env, pos(2.0, 2.0), pos(4.0, 4.0), &occupied);
        assert_eq!(step, None);
    }

    #[test]
    fn full_walk_stays_in_bounds_and_off_obstacles() {
        let env = env(5, 5, &[(2, 0), (2, 1), (2, 2)]);
        let goal = pos(4.0, 0.0);
        let finder = BfsPathfinder::new();

        let mut current = pos(0.0, 0.0);
        for _ in 0..50 {
            if current == goal {
                break;
            }
            let next = finder
                .next_step(&env, current, goal, &free())
                .unwrap_or_else(|| panic!("stuck at {current}"));
            assert!(env.in_bounds(next), "step {next} out of bounds");
            assert!(!env.is_obstacle(next.cell()), "step {next} on obstacle");
            current = next;
        }
        assert_eq!(current, goal);
    }

    #[test]
    fn corner_start_picks_a_cardinal_first_step() {
        let env = env(3, 3, &[]);
        let step = BfsPathfinder::new()
            .next_step(&env, pos(0.0, 0.0), pos(2.0, 2.0), &free())
            .unwrap();
        assert!(step == pos(1.0, 0.0) || step == pos(0.0, 1.0));
    }

    #[test]
    fn goal_on_obstacle_unreachable_by_default() {
        let env = env(3, 3, &[(2, 2)]);
        let step = BfsPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(2.0, 2.0), &free());
        assert_eq!(step, None);
    }

    #[test]
    fn goal_on_obstacle_reachable_when_configured() {
        let env = env(3, 3, &[(2, 2)]);
        let finder = BfsPathfinder {
            allow_obstacle_goal: true,
        };
        let step = finder.next_step(&env, pos(1.0, 2.0), pos(2.0, 2.0), &free());
        assert_eq!(step, Some(pos(2.0, 2.0)));
    }

    #[test]
    fn closure_satisfies_the_trait() {
        // A trivial "always step right" plug-in.
        let finder = |_env: &Environment, start: Position, _goal: Position, _occ: &FxHashSet<Cell>| {
            Some(pos(start.x + 1.0, start.y))
        };
        let env = env(5, 5, &[]);
        let step = Pathfinder::next_step(&finder, &env, pos(0.0, 0.0), pos(4.0, 0.0), &free());
        assert_eq!(step, Some(pos(1.0, 0.0)));
    }
}

// ── A* ────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod astar {
    use super::*;

    #[test]
    fn start_cell_equals_goal_cell_returns_goal() {
        let env = env(5, 5, &[]);
        let step = AStarPathfinder::new().next_step(&env, pos(2.3, 2.7), pos(2.0, 2.0), &free());
        assert_eq!(step, Some(pos(2.0, 2.0)));
    }

    #[test]
    fn adjacent_goal_returns_goal() {
        let env = env(5, 5, &[]);
        let step = AStarPathfinder::new().next_step(&env, pos(2.0, 2.0), pos(3.0, 2.0), &free());
        assert_eq!(step, Some(pos(3.0, 2.0)));
    }

    #[test]
    fn prefers_the_diagonal_on_open_ground() {
        let env = env(5, 5, &[]);
        let step = AStarPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(3.0, 3.0), &free());
        assert_eq!(step, Some(pos(1.0, 1.0)));
    }

    #[test]
    fn inflation_blocks_cells_next_to_obstacles() {
        // Wall at x=2 across rows 1..=3. Inflation blocks the ring around
        // the wall (including (2, 0) and (2, 4)), so the only way across is
        // the wide swing through rows 5..6.
        let env = env(5, 7, &[(2, 1), (2, 2), (2, 3)]);
        let finder = AStarPathfinder::new();
        let mut current = pos(0.0, 2.0);
        let goal = pos(4.0, 2.0);
        for _ in 0..30 {
            if current.cell() == goal.cell() {
                break;
            }
            let next = finder
                .next_step(&env, current, goal, &free())
                .unwrap_or_else(|| panic!("stuck at {current}"));
            let cell = next.cell();
            assert!(!env.is_obstacle(cell), "stepped onto obstacle {cell}");
            // Never adjacent (cardinally) to the wall, except at the goal.
            if cell != goal.cell() {
                for ring in cell.neighbors4() {
                    assert!(!env.is_obstacle(ring), "{cell} hugs the wall");
                }
            }
            current = next;
        }
        assert_eq!(current.cell(), goal.cell());
    }

    #[test]
    fn goal_cell_is_never_inflated() {
        // Goal directly beside an obstacle: inflation must exempt it.
        let env = env(5, 5, &[(3, 0)]);
        let step = AStarPathfinder::new().next_step(&env, pos(2.0, 1.0), pos(2.0, 0.0), &free());
        assert_eq!(step, Some(pos(2.0, 0.0)));
    }

    #[test]
    fn occupied_cells_are_impassable() {
        let env = env(3, 1, &[]);
        let occupied = cells(&[(1, 0)]);
        let step = AStarPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(2.0, 0.0), &occupied);
        // Single-row corridor with the middle occupied: no way through.
        assert_eq!(step, None);
    }

    #[test]
    fn walled_off_goal_returns_none() {
        // In a 5x5 grid, obstacles plus their inflation ring seal off the
        // corner at (4, 4).
        let env = env(5, 5, &[(3, 4), (4, 3), (3, 3)]);
        let step = AStarPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(4.0, 4.0), &free());
        assert_eq!(step, None);
    }

    #[test]
    fn start_on_obstacle_returns_none() {
        let env = env(5, 5, &[(0, 0)]);
        let step = AStarPathfinder::new().next_step(&env, pos(0.0, 0.0), pos(4.0, 0.0), &free());
        assert_eq!(step, None);
    }

    #[test]
    fn float_start_floors_into_its_cell() {
        let env = env(5, 5, &[]);
        // Start mid-cell at (1.6, 0.2): start cell is (1, 0), goal (3, 0).
        let step = AStarPathfinder::new().next_step(&env, pos(1.6, 0.2), pos(3.0, 0.0), &free());
        assert_eq!(step, Some(pos(2.0, 0.0)));
    }
}
