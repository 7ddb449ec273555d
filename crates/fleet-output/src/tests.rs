//! Tests for frames, the terminal renderer, and CSV recording.

use fleet_assign::GreedyCapabilityAssigner;
use fleet_core::{Capability, Cell, Position, RobotId, TaskId, Time, ZoneId};
use fleet_model::{Robot, RobotState, SpatialConstraint, Task, TaskType};
use fleet_path::BfsPathfinder;
use fleet_sim::{DiscreteMotion, Simulation, SimulationBuilder};
use fleet_world::{Environment, Zone, ZoneType};

use crate::frame::render_snapshot;
use crate::{CsvWriter, Frame, SimOutputObserver, TerminalRenderer};

fn demo_sim() -> Simulation<DiscreteMotion> {
    let mut env = Environment::new(6, 4);
    env.add_obstacle(Cell::new(2, 2)).unwrap();
    env.add_zone(Zone::from_cells(ZoneId(1), ZoneType::Charging, [Cell::new(5, 3)]).unwrap())
        .unwrap();

    let task = Task::new(TaskId(1), TaskType::Pickup, 1, Time(2))
        .with_constraint(SpatialConstraint::at(Position::new(4.0, 0.0)));

    SimulationBuilder::discrete(env)
        .robots(vec![Robot::new(RobotId(1), Capability::ALL, 1.0)])
        .tasks(vec![task])
        .robot_states(vec![RobotState::at(RobotId(1), Position::new(0.0, 0.0))])
        .assigner(GreedyCapabilityAssigner::new())
        .pathfinder(BfsPathfinder::new())
        .build()
        .unwrap()
}

#[cfg(test)]
mod frames {
    use super::*;

    #[test]
    fn blank_frame_is_all_spaces() {
        let frame = Frame::blank(4, 2);
        assert_eq!(frame.to_text(), "    \n    ");
    }

    #[test]
    fn stamp_writes_and_clips() {
        let mut frame = Frame::blank(4, 2);
        frame.stamp(2, 0, "abcdef"); // clips at the right edge
        frame.stamp(-1, 1, "xy"); // first char clips at the left edge
        frame.stamp(0, 5, "zz"); // silently off-frame
        assert_eq!(frame.to_text(), "  ab\ny   ");
    }

    #[test]
    fn snapshot_renders_terrain_tasks_and_robots() {
        let sim = demo_sim();
        let frame = render_snapshot(&sim.snapshot());
        let text = frame.to_text();
        assert_eq!(
            text,
            "1...?.\n\
             ......\n\
             ..#...\n\
             .....c"
        );
    }

    #[test]
    fn task_glyph_follows_status() {
        let mut sim = demo_sim();
        // After one tick the task is assigned: '?' becomes '*'.
        sim.step().unwrap();
        let frame = render_snapshot(&sim.snapshot());
        assert_eq!(frame.get(4, 0), '*');

        sim.run(20).unwrap();
        let frame = render_snapshot(&sim.snapshot());
        // Done: the robot (digit) stands on the target; the glyph below it
        // would be '+', and the robot is drawn on top.
        assert_eq!(frame.get(4, 0), '1');
    }
}

#[cfg(test)]
mod terminal {
    use super::*;

    #[test]
    fn first_draw_clears_and_paints_everything() {
        let mut renderer = TerminalRenderer::new();
        let mut out: Vec<u8> = Vec::new();
        let mut frame = Frame::blank(3, 2);
        frame.stamp(0, 0, "abc");
        renderer.draw(&frame, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2J"), "first draw clears the screen");
        assert!(text.contains("\x1b[?25l"), "cursor hidden");
        assert!(text.contains("abc"));
    }

    #[test]
    fn second_draw_emits_only_the_diff() {
        let mut renderer = TerminalRenderer::new();
        let mut first: Vec<u8> = Vec::new();
        let mut frame = Frame::blank(4, 2);
        frame.stamp(0, 0, "....");
        frame.stamp(0, 1, "....");
        renderer.draw(&frame, &mut first).unwrap();

        let mut next = frame.clone();
        next.stamp(2, 1, "x");
        let mut second: Vec<u8> = Vec::new();
        renderer.draw(&next, &mut second).unwrap();

        let text = String::from_utf8(second).unwrap();
        assert!(!text.contains("\x1b[2J"), "no clear on diff draws");
        // One cursor move to row 2, column 3 (1-based), one character.
        assert_eq!(text, "\x1b[2;3Hx");
    }

    #[test]
    fn identical_frames_emit_nothing() {
        let mut renderer = TerminalRenderer::new();
        let mut out: Vec<u8> = Vec::new();
        let frame = Frame::blank(3, 3);
        renderer.draw(&frame, &mut out).unwrap();
        out.clear();
        renderer.draw(&frame, &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn resize_forces_a_full_redraw() {
        let mut renderer = TerminalRenderer::new();
        let mut out: Vec<u8> = Vec::new();
        renderer.draw(&Frame::blank(3, 3), &mut out).unwrap();
        out.clear();
        renderer.draw(&Frame::blank(4, 3), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\x1b[2J"));
    }

    #[test]
    fn cleanup_restores_the_cursor() {
        let mut renderer = TerminalRenderer::new();
        let mut out: Vec<u8> = Vec::new();
        renderer.draw(&Frame::blank(2, 2), &mut out).unwrap();
        out.clear();
        renderer.cleanup(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[?25h");
    }
}

#[cfg(test)]
mod recording {
    use super::*;

    #[test]
    fn csv_files_receive_one_row_per_entity_per_tick() {
        let dir = tempfile::tempdir().unwrap();
        let mut observer = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());

        let mut sim = demo_sim();
        observer.record(&sim.snapshot()); // tick 0
        let result = sim.run_with(50, &mut observer).unwrap();
        assert!(result.completed);
        assert!(observer.take_error().is_none());

        let ticks = result.snapshots.len();
        let robots = std::fs::read_to_string(dir.path().join("robot_ticks.csv")).unwrap();
        let tasks = std::fs::read_to_string(dir.path().join("task_ticks.csv")).unwrap();

        // Header plus one row per (tick, entity).
        assert_eq!(robots.lines().count(), 1 + ticks);
        assert_eq!(tasks.lines().count(), 1 + ticks);
        assert!(robots.lines().nth(1).unwrap().starts_with("0,1,0,0,1"));
        let last = tasks.lines().last().unwrap();
        assert!(last.contains("done"), "final task row is terminal: {last}");
    }
}
