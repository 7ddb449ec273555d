//! Scenario JSON loader: raw serde records in, validated domain types out.

use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use fleet_assign::AssignmentPolicy;
use fleet_core::{Capability, Cell, Position, RobotId, TaskId, Time, ZoneId};
use fleet_model::{
    Robot, RobotState, SpatialConstraint, SpatialTarget, Task, TaskState, TaskStatus, TaskType,
};
use fleet_path::Pathfinder;
use fleet_sim::{MotionModel, Simulation, SimulationBuilder};
use fleet_world::{Environment, Zone, ZoneType};

use crate::ScenarioResult;
use crate::error::invalid;

// ── Raw records (serde shapes, private) ───────────────────────────────────────

#[derive(Deserialize)]
struct ScenarioFile {
    environment: EnvironmentRecord,
    #[serde(default)]
    robots: Vec<RobotRecord>,
    #[serde(default)]
    tasks: Vec<TaskRecord>,
    #[serde(default)]
    robot_states: Vec<RobotStateRecord>,
    #[serde(default)]
    task_states: Vec<TaskStateRecord>,
}

#[derive(Deserialize)]
struct EnvironmentRecord {
    width:  i64,
    height: i64,
    #[serde(default)]
    obstacles: Vec<[i32; 2]>,
    #[serde(default)]
    zones: Vec<ZoneRecord>,
}

#[derive(Deserialize)]
struct ZoneRecord {
    id: i64,
    #[serde(rename = "type")]
    zone_type: String,
    positions: Vec<[i32; 2]>,
}

#[derive(Deserialize)]
struct RobotRecord {
    id: i64,
    capabilities: Vec<String>,
    speed: f64,
    radius: Option<f64>,
}

#[derive(Deserialize)]
struct TaskRecord {
    id: i64,
    #[serde(rename = "type")]
    task_type: String,
    priority: i32,
    required_work_time: i64,
    spatial_constraint: Option<ConstraintRecord>,
    #[serde(default)]
    required_capabilities: Vec<String>,
    #[serde(default)]
    dependencies: Vec<i64>,
    deadline: Option<i64>,
}

#[derive(Deserialize)]
struct ConstraintRecord {
    target: TargetRecord,
    max_distance: Option<i64>,
}

/// `[x, y]` means a concrete cell; a bare integer names a zone.
#[derive(Deserialize)]
#[serde(untagged)]
enum TargetRecord {
    Point([i32; 2]),
    Zone(u32),
}

#[derive(Deserialize)]
struct RobotStateRecord {
    robot_id: i64,
    position: [f64; 2],
    battery_level: Option<f64>,
}

#[derive(Deserialize)]
struct TaskStateRecord {
    task_id: i64,
    status: Option<String>,
    #[serde(default)]
    assigned_robot_ids: Vec<i64>,
    work_done: Option<i64>,
    started_at: Option<i64>,
    completed_at: Option<i64>,
}

// ── Scenario ──────────────────────────────────────────────────────────────────

/// A fully validated scene description, ready to become a [`Simulation`].
#[derive(Clone, Debug)]
pub struct Scenario {
    pub environment:  Environment,
    pub robots:       Vec<Robot>,
    pub tasks:        Vec<Task>,
    pub robot_states: Vec<RobotState>,
    pub task_states:  Vec<TaskState>,
}

impl Scenario {
    /// Load and validate a scenario from a JSON file.
    pub fn load(path: &Path) -> ScenarioResult<Scenario> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Like [`load`][Self::load], from any `Read` source (handy for tests
    /// via `Cursor` and for embedded scenario strings).
    pub fn from_reader<R: Read>(reader: R) -> ScenarioResult<Scenario> {
        let raw: ScenarioFile = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    /// Like [`load`][Self::load], from a JSON string.
    pub fn from_json(json: &str) -> ScenarioResult<Scenario> {
        let raw: ScenarioFile = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Hand the validated parts to a [`SimulationBuilder`], strategies still
    /// unset.
    pub fn into_builder<M: MotionModel>(self) -> SimulationBuilder<M> {
        SimulationBuilder::new(self.environment)
            .robots(self.robots)
            .tasks(self.tasks)
            .robot_states(self.robot_states)
            .task_states(self.task_states)
    }

    /// Build a ready simulation with the given strategies.
    pub fn into_simulation<M: MotionModel>(
        self,
        assigner: impl AssignmentPolicy + 'static,
        pathfinder: impl Pathfinder + 'static,
    ) -> ScenarioResult<Simulation<M>> {
        self.into_builder()
            .assigner(assigner)
            .pathfinder(pathfinder)
            .build()
            .map_err(|e| invalid(e.to_string()))
    }

    // ── Validation ────────────────────────────────────────────────────────

    fn from_raw(raw: ScenarioFile) -> ScenarioResult<Scenario> {
        let environment = load_environment(raw.environment)?;
        let robots = load_robots(raw.robots)?;
        let tasks = load_tasks(raw.tasks)?;
        let robot_states = load_robot_states(raw.robot_states, &robots)?;
        let task_states = load_task_states(raw.task_states, &tasks)?;
        Ok(Scenario {
            environment,
            robots,
            tasks,
            robot_states,
            task_states,
        })
    }
}

// ── Section loaders ───────────────────────────────────────────────────────────

fn load_environment(raw: EnvironmentRecord) -> ScenarioResult<Environment> {
    if raw.width <= 0 {
        return Err(invalid(format!("width must be positive, got {}", raw.width)));
    }
    if raw.height <= 0 {
        return Err(invalid(format!("height must be positive, got {}", raw.height)));
    }
    let mut env = Environment::new(raw.width as u32, raw.height as u32);

    // Duplicate obstacle cells collapse silently (add is idempotent);
    // everything else the environment rejects becomes a loader error.
    for [x, y] in raw.obstacles {
        env.add_obstacle(Cell::new(x, y))?;
    }

    for zone in raw.zones {
        let id = non_negative(zone.id, "zone id")?;
        let zone_type: ZoneType = zone
            .zone_type
            .parse()
            .map_err(|e: String| invalid(format!("zone {id}: {e}")))?;
        if zone.positions.is_empty() {
            return Err(invalid(format!("zone {id}: positions must be non-empty")));
        }
        let cells = zone.positions.iter().map(|&[x, y]| Cell::new(x, y));
        env.add_zone(Zone::from_cells(ZoneId(id), zone_type, cells)?)?;
    }

    Ok(env)
}

fn load_robots(raw: Vec<RobotRecord>) -> ScenarioResult<Vec<Robot>> {
    let mut robots = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<RobotId> = BTreeSet::new();

    for record in raw {
        let id = RobotId(non_negative(record.id, "robot id")?);
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate robot id {}", id.0)));
        }
        let capabilities = parse_capabilities(&record.capabilities, || format!("robot {}", id.0))?;
        if !(record.speed > 0.0) {
            return Err(invalid(format!(
                "robot {}: speed must be positive, got {}",
                id.0, record.speed
            )));
        }
        let mut robot = Robot::new(id, capabilities, record.speed);
        if let Some(radius) = record.radius {
            if !(radius > 0.0) {
                return Err(invalid(format!(
                    "robot {}: radius must be positive, got {radius}",
                    id.0
                )));
            }
            robot.radius = radius;
        }
        robots.push(robot);
    }

    Ok(robots)
}

fn load_tasks(raw: Vec<TaskRecord>) -> ScenarioResult<Vec<Task>> {
    let mut tasks = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<TaskId> = BTreeSet::new();

    for record in raw {
        let id = TaskId(non_negative(record.id, "task id")?);
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate task id {}", id.0)));
        }
        let task_type: TaskType = record
            .task_type
            .parse()
            .map_err(|e: String| invalid(format!("task {}: {e}", id.0)))?;
        let work = non_negative(record.required_work_time, "required_work_time")
            .map_err(|e| invalid(format!("task {}: {e}", id.0)))?;

        let mut task = Task::new(id, task_type, record.priority, Time(work as u64));

        if let Some(constraint) = record.spatial_constraint {
            let target = match constraint.target {
                TargetRecord::Point([x, y]) => {
                    SpatialTarget::Point(Position::new(x as f64, y as f64))
                }
                TargetRecord::Zone(zone) => SpatialTarget::Zone(ZoneId(zone)),
            };
            let max_distance = match constraint.max_distance {
                None => 0,
                Some(d) => non_negative(d, "max_distance")
                    .map_err(|e| invalid(format!("task {}: {e}", id.0)))?,
            };
            task.spatial_constraint = Some(SpatialConstraint { target, max_distance });
        }

        task.required_capabilities =
            parse_capabilities(&record.required_capabilities, || format!("task {}", id.0))?;

        for dep in record.dependencies {
            let dep = non_negative(dep, "dependency")
                .map_err(|e| invalid(format!("task {}: {e}", id.0)))?;
            task.dependencies.insert(TaskId(dep));
        }

        if let Some(deadline) = record.deadline {
            let deadline = non_negative(deadline, "deadline")
                .map_err(|e| invalid(format!("task {}: {e}", id.0)))?;
            task.deadline = Some(Time(deadline as u64));
        }

        tasks.push(task);
    }

    Ok(tasks)
}

fn load_robot_states(
    raw: Vec<RobotStateRecord>,
    robots: &[Robot],
) -> ScenarioResult<Vec<RobotState>> {
    let known: BTreeSet<RobotId> = robots.iter().map(|r| r.id).collect();
    let mut states = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<RobotId> = BTreeSet::new();

    for record in raw {
        let id = RobotId(non_negative(record.robot_id, "robot_id")?);
        if !known.contains(&id) {
            return Err(invalid(format!("robot_state for unknown robot {}", id.0)));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate robot_state for robot {}", id.0)));
        }
        let [x, y] = record.position;
        let mut state = RobotState::at(id, Position::new(x, y));
        if let Some(battery) = record.battery_level {
            if !(0.0..=1.0).contains(&battery) {
                return Err(invalid(format!(
                    "robot_state {}: battery_level must be within [0, 1], got {battery}",
                    id.0
                )));
            }
            state.battery_level = battery;
        }
        states.push(state);
    }

    if let Some(robot) = robots.iter().find(|r| !seen.contains(&r.id)) {
        return Err(invalid(format!("missing robot_state for robot {}", robot.id.0)));
    }

    Ok(states)
}

fn load_task_states(raw: Vec<TaskStateRecord>, tasks: &[Task]) -> ScenarioResult<Vec<TaskState>> {
    let known: BTreeSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut states = Vec::with_capacity(raw.len());
    let mut seen: BTreeSet<TaskId> = BTreeSet::new();

    for record in raw {
        let id = TaskId(non_negative(record.task_id, "task_id")?);
        if !known.contains(&id) {
            return Err(invalid(format!("task_state for unknown task {}", id.0)));
        }
        if !seen.insert(id) {
            return Err(invalid(format!("duplicate task_state for task {}", id.0)));
        }

        let mut state = TaskState::fresh(id);
        if let Some(status) = record.status {
            state.status = status
                .parse::<TaskStatus>()
                .map_err(|e| invalid(format!("task_state {}: {e}", id.0)))?;
        }
        for robot in record.assigned_robot_ids {
            let robot = non_negative(robot, "assigned robot id")
                .map_err(|e| invalid(format!("task_state {}: {e}", id.0)))?;
            state.assigned_robot_ids.insert(RobotId(robot));
        }
        if let Some(work) = record.work_done {
            let work = non_negative(work, "work_done")
                .map_err(|e| invalid(format!("task_state {}: {e}", id.0)))?;
            state.work_done = Time(work as u64);
        }
        if let Some(started) = record.started_at {
            let started = non_negative(started, "started_at")
                .map_err(|e| invalid(format!("task_state {}: {e}", id.0)))?;
            state.started_at = Some(Time(started as u64));
        }
        if let Some(completed) = record.completed_at {
            let completed = non_negative(completed, "completed_at")
                .map_err(|e| invalid(format!("task_state {}: {e}", id.0)))?;
            state.completed_at = Some(Time(completed as u64));
        }
        states.push(state);
    }

    // Tasks without an explicit entry start fresh.
    for task in tasks {
        if !seen.contains(&task.id) {
            states.push(TaskState::fresh(task.id));
        }
    }

    Ok(states)
}

// ── Field helpers ─────────────────────────────────────────────────────────────

fn non_negative(value: i64, what: &str) -> ScenarioResult<u32> {
    u32::try_from(value).map_err(|_| invalid(format!("{what} must be non-negative, got {value}")))
}

fn parse_capabilities(
    raw: &[String],
    context: impl Fn() -> String,
) -> ScenarioResult<BTreeSet<Capability>> {
    raw.iter()
        .map(|s| {
            s.parse::<Capability>()
                .map_err(|e| invalid(format!("{}: {e}", context())))
        })
        .collect()
}
