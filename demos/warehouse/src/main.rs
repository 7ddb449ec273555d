//! warehouse: the smallest end-to-end scene for the rust_fleet simulator.
//!
//! Three heterogeneous robots clear two tasks on a 12×12 floor with an
//! obstacle wall, a loading zone, and a charging bay. Runs the continuous
//! engine with greedy assignment and A*, records the trajectory to CSV, and
//! prints the final floor plan. Pass `--watch` to replay the run as an
//! animated terminal view.

use std::io::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::warn;

use fleet_assign::GreedyCapabilityAssigner;
use fleet_output::{CsvWriter, SimOutputObserver, TerminalRenderer, render_snapshot};
use fleet_path::AStarPathfinder;
use fleet_scenario::Scenario;
use fleet_sim::{ContinuousMotion, SimulationResult};

// ── Constants ─────────────────────────────────────────────────────────────────

const MAX_STEPS: u64 = 200;
const OUT_DIR: &str = "fleet-out";
const WATCH_FRAME_DELAY: Duration = Duration::from_millis(80);

// The default warehouse scene: a wall splitting the floor, a loading zone
// top-left, a charging bay bottom-right, and one task on either side of
// the wall.
const SCENARIO_JSON: &str = r#"{
    "environment": {
        "width": 12, "height": 12,
        "obstacles": [[5, 3], [5, 4], [5, 5], [5, 6]],
        "zones": [
            { "id": 1, "type": "loading",
              "positions": [[0, 0], [1, 0], [2, 0],
                            [0, 1], [1, 1], [2, 1],
                            [0, 2], [1, 2], [2, 2]] },
            { "id": 2, "type": "charging",
              "positions": [[9, 9], [10, 9], [11, 9],
                            [9, 10], [10, 10], [11, 10],
                            [9, 11], [10, 11], [11, 11]] }
        ]
    },
    "robots": [
        { "id": 1, "capabilities": ["manipulation", "vision"], "speed": 1.0 },
        { "id": 2, "capabilities": ["manipulation"], "speed": 1.2 },
        { "id": 3, "capabilities": ["vision", "sensing"], "speed": 0.8 }
    ],
    "tasks": [
        { "id": 1, "type": "pickup", "priority": 3, "required_work_time": 20,
          "spatial_constraint": { "target": [9, 9] },
          "required_capabilities": ["manipulation"] },
        { "id": 2, "type": "routine_inspection", "priority": 1,
          "required_work_time": 15,
          "spatial_constraint": { "target": [7, 2] },
          "required_capabilities": ["vision"] }
    ],
    "robot_states": [
        { "robot_id": 1, "position": [0, 0] },
        { "robot_id": 2, "position": [1, 0] },
        { "robot_id": 3, "position": [0, 1] }
    ],
    "task_states": [
        { "task_id": 1 },
        { "task_id": 2 }
    ]
}"#;

fn main() -> Result<()> {
    env_logger::init();
    let watch = std::env::args().any(|arg| arg == "--watch");

    let scenario = Scenario::from_json(SCENARIO_JSON).context("embedded scenario")?;
    let mut sim = scenario.into_simulation::<ContinuousMotion>(
        GreedyCapabilityAssigner::new(),
        AStarPathfinder::new(),
    )?;

    let out_dir = Path::new(OUT_DIR);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating output directory {OUT_DIR}"))?;
    let mut observer = SimOutputObserver::new(CsvWriter::new(out_dir)?);
    observer.record(&sim.snapshot());

    let result = sim.run_with(MAX_STEPS, &mut observer)?;
    if let Some(error) = observer.take_error() {
        warn!("trajectory recording incomplete: {error}");
    }

    if watch {
        replay(&result)?;
    }
    report(&sim.snapshot(), &result);
    Ok(())
}

/// Replay every recorded tick as an animated terminal view.
fn replay(result: &SimulationResult) -> Result<()> {
    let mut renderer = TerminalRenderer::new();
    let mut stdout = std::io::stdout();
    for snapshot in &result.snapshots {
        renderer.draw(&render_snapshot(snapshot), &mut stdout)?;
        std::thread::sleep(WATCH_FRAME_DELAY);
    }
    renderer.cleanup(&mut stdout)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

fn report(final_snapshot: &fleet_sim::Snapshot, result: &SimulationResult) {
    println!("{}", render_snapshot(final_snapshot).to_text());
    println!();
    for (task_id, state) in final_snapshot.task_states() {
        println!(
            "task {}: {} ({} / {} ticks of work)",
            task_id.0,
            state.status,
            state.work_done.tick(),
            final_snapshot
                .tasks()
                .iter()
                .find(|t| t.id == *task_id)
                .map_or(0, |t| t.required_work_time.tick()),
        );
    }
    for (robot_id, state) in final_snapshot.robot_states() {
        println!(
            "robot {}: at {} battery {:.3}",
            robot_id.0, state.position, state.battery_level
        );
    }
    match result.makespan {
        Some(makespan) => println!(
            "completed: {} / {} tasks in {} ticks",
            result.tasks_succeeded, result.tasks_total, makespan.tick()
        ),
        None => println!(
            "incomplete after {MAX_STEPS} ticks: {} / {} tasks done",
            result.tasks_succeeded, result.tasks_total
        ),
    }
}
