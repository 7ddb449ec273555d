//! Fluent builder for constructing a [`Simulation`].

use std::collections::BTreeMap;
use std::sync::Arc;

use fleet_assign::AssignmentPolicy;
use fleet_core::{RobotId, TaskId, Time};
use fleet_model::{Robot, RobotState, Task, TaskState};
use fleet_path::Pathfinder;
use fleet_world::Environment;

use crate::motion::MotionModel;
use crate::{ContinuousMotion, DiscreteMotion, SimError, SimResult, Simulation};

/// Fluent builder for [`Simulation<M>`].
///
/// # Required inputs
///
/// - the [`Environment`] (fixed for the lifetime of the engine),
/// - the robot and task definition lists,
/// - one initial [`RobotState`] per robot.
///
/// # Optional inputs
///
/// | Method            | Default                                    |
/// |-------------------|--------------------------------------------|
/// | `.task_states(v)` | every task starts fresh and unassigned     |
/// | `.assigner(p)`    | unset; `step()` fails until one is bound   |
/// | `.pathfinder(p)`  | unset; `step()` fails until one is bound   |
/// | `.dt(t)`          | one tick                                   |
///
/// `build()` validates id uniqueness and the state/definition pairing, then
/// records the initial snapshot so the history always starts at the
/// construction tick.
pub struct SimulationBuilder<M: MotionModel = DiscreteMotion> {
    env:          Environment,
    robots:       Vec<Robot>,
    tasks:        Vec<Task>,
    robot_states: Vec<RobotState>,
    task_states:  Vec<TaskState>,
    assigner:     Option<Arc<dyn AssignmentPolicy>>,
    pathfinder:   Option<Arc<dyn Pathfinder>>,
    dt:           Time,
    _motion:      std::marker::PhantomData<M>,
}

impl SimulationBuilder<DiscreteMotion> {
    /// A builder for the discrete (integer-cell) engine variant.
    pub fn discrete(env: Environment) -> Self {
        Self::new(env)
    }
}

impl SimulationBuilder<ContinuousMotion> {
    /// A builder for the continuous (float-pose) engine variant.
    pub fn continuous(env: Environment) -> Self {
        Self::new(env)
    }
}

impl<M: MotionModel> SimulationBuilder<M> {
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            robots:       Vec::new(),
            tasks:        Vec::new(),
            robot_states: Vec::new(),
            task_states:  Vec::new(),
            assigner:     None,
            pathfinder:   None,
            dt:           Time(1),
            _motion:      std::marker::PhantomData,
        }
    }

    /// The robot definitions, in scenario order.
    pub fn robots(mut self, robots: Vec<Robot>) -> Self {
        self.robots = robots;
        self
    }

    /// The task definitions, in scenario order.
    pub fn tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Initial robot states; exactly one per robot is required.
    pub fn robot_states(mut self, states: Vec<RobotState>) -> Self {
        self.robot_states = states;
        self
    }

    /// Initial task states. Tasks without an entry start fresh.
    pub fn task_states(mut self, states: Vec<TaskState>) -> Self {
        self.task_states = states;
        self
    }

    pub fn assigner(mut self, policy: impl AssignmentPolicy + 'static) -> Self {
        self.assigner = Some(Arc::new(policy));
        self
    }

    pub fn pathfinder(mut self, policy: impl Pathfinder + 'static) -> Self {
        self.pathfinder = Some(Arc::new(policy));
        self
    }

    /// The tick duration. Rarely anything but the default of one.
    pub fn dt(mut self, dt: Time) -> Self {
        self.dt = dt;
        self
    }

    /// Validate, assemble, and record the initial snapshot.
    pub fn build(self) -> SimResult<Simulation<M>> {
        // ── Index the definition lists, rejecting duplicate ids ───────────
        let mut robot_lookup: BTreeMap<RobotId, usize> = BTreeMap::new();
        for (index, robot) in self.robots.iter().enumerate() {
            if robot_lookup.insert(robot.id, index).is_some() {
                return Err(SimError::DuplicateRobot(robot.id));
            }
        }
        let mut task_lookup: BTreeMap<TaskId, usize> = BTreeMap::new();
        for (index, task) in self.tasks.iter().enumerate() {
            if task_lookup.insert(task.id, index).is_some() {
                return Err(SimError::DuplicateTask(task.id));
            }
        }

        // ── Pair states with definitions ──────────────────────────────────
        let mut robot_states: BTreeMap<RobotId, RobotState> = BTreeMap::new();
        for state in self.robot_states {
            if !robot_lookup.contains_key(&state.robot_id) {
                return Err(SimError::UnknownRobotState(state.robot_id));
            }
            robot_states.insert(state.robot_id, state);
        }
        if let Some(robot) = self
            .robots
            .iter()
            .find(|robot| !robot_states.contains_key(&robot.id))
        {
            return Err(SimError::MissingRobotState(robot.id));
        }

        let mut task_states: BTreeMap<TaskId, TaskState> = BTreeMap::new();
        for state in self.task_states {
            if !task_lookup.contains_key(&state.task_id) {
                return Err(SimError::UnknownTaskState(state.task_id));
            }
            task_states.insert(state.task_id, state);
        }
        for task in &self.tasks {
            task_states
                .entry(task.id)
                .or_insert_with(|| TaskState::fresh(task.id));
        }

        let mut sim = Simulation {
            env:    Arc::new(self.env),
            robots: Arc::new(self.robots),
            tasks:  Arc::new(self.tasks),
            robot_lookup,
            task_lookup,
            robot_states,
            task_states,
            assigner:   self.assigner,
            pathfinder: self.pathfinder,
            dt:    self.dt,
            t_now: Time::ZERO,
            current_assignments: Vec::new(),
            history: BTreeMap::new(),
            _motion: std::marker::PhantomData,
        };
        sim.history.insert(Time::ZERO, sim.snapshot());
        Ok(sim)
    }
}
