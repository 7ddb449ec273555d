//! The `Simulation` struct and its tick loop.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use log::warn;
use rustc_hash::FxHashSet;

use fleet_assign::{AssignmentPolicy, FixedAssignment};
use fleet_core::{Cell, Position, RobotId, TaskId, Time};
use fleet_model::{Assignment, Robot, RobotState, SpatialTarget, Task, TaskState, TaskStatus};
use fleet_path::Pathfinder;
use fleet_world::Environment;

use crate::motion::MotionModel;
use crate::{
    DiscreteMotion, NoopObserver, SimError, SimObserver, SimResult, SimulationResult, Snapshot,
};

// ── Per-robot plan, produced by phase ④ ──────────────────────────────────────

/// What one robot will do this tick. Planned movement targets live in a
/// separate map so conflict resolution can clear them; a `Move` whose step
/// was cleared (or never found) falls through to idling.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Intent {
    /// No live assignment (or the assigned task is already terminal).
    Idle,
    /// At the goal, or the task needs no particular place: work in place.
    Work(TaskId),
    /// En route; the planned step, if any survived, is in the step map.
    Move,
}

// ── Simulation ────────────────────────────────────────────────────────────────

/// The simulation engine: world, fleet, work, strategies, and history.
///
/// The engine exclusively owns both state maps; definitions and the
/// environment are immutable after construction and shared by reference
/// with snapshots and forks. Strategies are consulted synchronously each
/// tick and may be swapped between ticks. Everything is strictly
/// single-threaded: no part of a tick suspends, yields, or blocks.
///
/// Create via [`SimulationBuilder`][crate::SimulationBuilder].
pub struct Simulation<M: MotionModel = DiscreteMotion> {
    pub(crate) env:    Arc<Environment>,
    pub(crate) robots: Arc<Vec<Robot>>,
    pub(crate) tasks:  Arc<Vec<Task>>,

    /// Robot/task list indices by id, fixed at construction.
    pub(crate) robot_lookup: BTreeMap<RobotId, usize>,
    pub(crate) task_lookup:  BTreeMap<TaskId, usize>,

    pub(crate) robot_states: BTreeMap<RobotId, RobotState>,
    pub(crate) task_states:  BTreeMap<TaskId, TaskState>,

    pub(crate) assigner:   Option<Arc<dyn AssignmentPolicy>>,
    pub(crate) pathfinder: Option<Arc<dyn Pathfinder>>,

    pub(crate) dt:    Time,
    pub(crate) t_now: Time,

    /// The assignment list the policy produced for the current tick, after
    /// validation.
    pub(crate) current_assignments: Vec<Assignment>,

    /// One snapshot per tick, keyed by the tick it captured.
    pub(crate) history: BTreeMap<Time, Snapshot>,

    pub(crate) _motion: std::marker::PhantomData<M>,
}

impl<M: MotionModel> Simulation<M> {
    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn env(&self) -> &Environment {
        &self.env
    }

    #[inline]
    pub fn robots(&self) -> &[Robot] {
        &self.robots
    }

    #[inline]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[inline]
    pub fn robot_states(&self) -> &BTreeMap<RobotId, RobotState> {
        &self.robot_states
    }

    #[inline]
    pub fn task_states(&self) -> &BTreeMap<TaskId, TaskState> {
        &self.task_states
    }

    #[inline]
    pub fn t_now(&self) -> Time {
        self.t_now
    }

    #[inline]
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// The validated assignment list from the last tick.
    #[inline]
    pub fn current_assignments(&self) -> &[Assignment] {
        &self.current_assignments
    }

    /// All recorded snapshots, keyed by tick, in time order.
    #[inline]
    pub fn history(&self) -> &BTreeMap<Time, Snapshot> {
        &self.history
    }

    /// A fresh snapshot of the current state (not recorded in the history).
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            env:          Arc::clone(&self.env),
            robots:       Arc::clone(&self.robots),
            tasks:        Arc::clone(&self.tasks),
            robot_states: self.robot_states.clone(),
            task_states:  self.task_states.clone(),
            t_now:        self.t_now,
        }
    }

    // ── Strategy setters ──────────────────────────────────────────────────

    /// Replace the assignment policy. Takes effect from the next tick.
    pub fn set_assigner(&mut self, policy: impl AssignmentPolicy + 'static) {
        self.assigner = Some(Arc::new(policy));
    }

    /// Replace the pathfinding policy. Takes effect from the next tick.
    pub fn set_pathfinder(&mut self, policy: impl Pathfinder + 'static) {
        self.pathfinder = Some(Arc::new(policy));
    }

    // ── Forking ───────────────────────────────────────────────────────────

    /// A hypothetical copy of this engine, pinned to a fixed assignment list.
    ///
    /// The fork deep-copies both state maps, shares the (immutable)
    /// environment and definition lists, keeps the pathfinder, and starts
    /// its own history at the current tick. Nothing the fork does is visible
    /// here.
    pub fn fork(&self, assignments: Vec<Assignment>) -> Simulation<M> {
        let mut fork = Simulation {
            env:    Arc::clone(&self.env),
            robots: Arc::clone(&self.robots),
            tasks:  Arc::clone(&self.tasks),
            robot_lookup: self.robot_lookup.clone(),
            task_lookup:  self.task_lookup.clone(),
            robot_states: self.robot_states.clone(),
            task_states:  self.task_states.clone(),
            assigner:   Some(Arc::new(FixedAssignment::new(assignments))),
            pathfinder: self.pathfinder.clone(),
            dt:    self.dt,
            t_now: self.t_now,
            current_assignments: Vec::new(),
            history: BTreeMap::new(),
            _motion: std::marker::PhantomData,
        };
        fork.history.insert(fork.t_now, fork.snapshot());
        fork
    }

    // ── Stepping ──────────────────────────────────────────────────────────

    /// Execute one tick.
    ///
    /// Fails with a configuration error if either strategy is unbound; never
    /// fails for in-scope physics events (dead ends, contention, overwork).
    pub fn step(&mut self) -> SimResult<()> {
        let assigner = self
            .assigner
            .clone()
            .ok_or(SimError::StrategyUnset("assignment"))?;
        let pathfinder = self
            .pathfinder
            .clone()
            .ok_or(SimError::StrategyUnset("pathfinding"))?;

        // ── Phase ①: advance time ─────────────────────────────────────────
        self.t_now = self.t_now.advance(self.dt);
        let now = self.t_now;

        // ── Phase ②: solicit assignments ──────────────────────────────────
        let proposed = assigner.assign(&self.tasks, &self.robots);
        let assignments = self.validate_assignments(proposed);

        // Reverse robot→task index. A robot named by several assignments
        // resolves last-writer-wins over the list.
        let mut robot_task: BTreeMap<RobotId, TaskId> = BTreeMap::new();
        for assignment in &assignments {
            for &robot_id in &assignment.robot_ids {
                robot_task.insert(robot_id, assignment.task_id);
            }
        }
        self.current_assignments = assignments;

        // ── Phase ③: update task assignment state ─────────────────────────
        for task in self.tasks.iter() {
            let crew: BTreeSet<RobotId> = robot_task
                .iter()
                .filter(|&(_, &task_id)| task_id == task.id)
                .map(|(&robot_id, _)| robot_id)
                .collect();
            if let Some(state) = self.task_states.get_mut(&task.id) {
                task.set_assignment(state, crew);
            }
        }

        // ── Phase ④: plan against frozen pre-tick positions ───────────────
        let pre_positions: BTreeMap<RobotId, Position> = self
            .robot_states
            .iter()
            .map(|(&id, state)| (id, state.position))
            .collect();

        let mut intents: BTreeMap<RobotId, Intent> = BTreeMap::new();
        let mut steps: BTreeMap<RobotId, Position> = BTreeMap::new();

        for (&robot_id, &position) in &pre_positions {
            let intent =
                self.plan_robot(robot_id, position, &robot_task, &pre_positions, &*pathfinder, &mut steps);
            intents.insert(robot_id, intent);
        }

        // ── Phase ⑤: conflict resolution ──────────────────────────────────
        let robots = Arc::clone(&self.robots);
        let lookup = &self.robot_lookup;
        M::resolve_conflicts(&mut steps, |id| {
            lookup
                .get(&id)
                .map_or(Robot::DEFAULT_RADIUS, |&i| robots[i].radius)
        });

        // ── Phase ⑥: execute in id order ──────────────────────────────────
        let env = &self.env;
        let task_states = &mut self.task_states;
        for (&robot_id, state) in self.robot_states.iter_mut() {
            let Some(&index) = self.robot_lookup.get(&robot_id) else {
                continue;
            };
            let robot = &robots[index];
            match intents.get(&robot_id) {
                Some(Intent::Move) => match steps.get(&robot_id) {
                    Some(&step) if step != state.position => {
                        M::advance(robot, state, step, self.dt);
                        M::settle(env, robot, state);
                    }
                    // Step cleared by conflict resolution, refused by the
                    // planner, or a no-op: wait this tick out.
                    _ => robot.idle(state, self.dt),
                },
                Some(Intent::Work(task_id)) => {
                    robot.work(state, self.dt);
                    if let (Some(&index), Some(task_state)) =
                        (self.task_lookup.get(task_id), task_states.get_mut(task_id))
                    {
                        self.tasks[index].apply_work(task_state, self.dt, now);
                    }
                }
                _ => robot.idle(state, self.dt),
            }
        }

        // ── Phase ⑦: snapshot ─────────────────────────────────────────────
        let snapshot = self.snapshot();
        self.history.insert(now, snapshot);

        Ok(())
    }

    /// Run until every task is terminal or `max_steps` ticks have elapsed.
    pub fn run(&mut self, max_steps: u64) -> SimResult<SimulationResult> {
        self.run_with(max_steps, &mut NoopObserver)
    }

    /// Like [`run`][Self::run], with observer callbacks at tick boundaries.
    pub fn run_with<O: SimObserver>(
        &mut self,
        max_steps: u64,
        observer: &mut O,
    ) -> SimResult<SimulationResult> {
        while self.t_now.tick() < max_steps && self.has_open_tasks() {
            observer.on_tick_start(self.t_now);
            self.step()?;
            if let Some(snapshot) = self.history.get(&self.t_now) {
                observer.on_tick_end(self.t_now, snapshot);
            }
        }
        let result = self.result();
        observer.on_run_end(&result);
        Ok(result)
    }

    /// `true` while any task is non-terminal.
    pub fn has_open_tasks(&self) -> bool {
        self.task_states
            .values()
            .any(|state| !state.status.is_terminal())
    }

    /// The run outcome as of now.
    fn result(&self) -> SimulationResult {
        let completed = !self.has_open_tasks();
        let tasks_succeeded = self
            .task_states
            .values()
            .filter(|state| state.status == TaskStatus::Done)
            .count();
        SimulationResult {
            completed,
            tasks_succeeded,
            tasks_total: self.tasks.len(),
            makespan: completed.then_some(self.t_now),
            snapshots: self.history.values().cloned().collect(),
        }
    }

    // ── Tick internals ────────────────────────────────────────────────────

    /// Keep only assignments whose task and every robot exist; anything else
    /// is a strategy-contract violation, dropped with a warning.
    fn validate_assignments(&self, proposed: Vec<Assignment>) -> Vec<Assignment> {
        proposed
            .into_iter()
            .filter(|assignment| {
                if !self.task_lookup.contains_key(&assignment.task_id) {
                    warn!("dropping assignment naming unknown task {}", assignment.task_id);
                    return false;
                }
                if let Some(&unknown) = assignment
                    .robot_ids
                    .iter()
                    .find(|&&id| !self.robot_lookup.contains_key(&id))
                {
                    warn!(
                        "dropping assignment for task {} naming unknown robot {}",
                        assignment.task_id, unknown
                    );
                    return false;
                }
                true
            })
            .collect()
    }

    /// Phase ④ for one robot: resolve the goal, test arrival, consult the
    /// pathfinder, and vet its answer.
    fn plan_robot(
        &self,
        robot_id: RobotId,
        position: Position,
        robot_task: &BTreeMap<RobotId, TaskId>,
        pre_positions: &BTreeMap<RobotId, Position>,
        pathfinder: &dyn Pathfinder,
        steps: &mut BTreeMap<RobotId, Position>,
    ) -> Intent {
        let Some(&task_id) = robot_task.get(&robot_id) else {
            return Intent::Idle;
        };
        let Some(&task_index) = self.task_lookup.get(&task_id) else {
            return Intent::Idle;
        };
        let task = &self.tasks[task_index];
        let terminal = self
            .task_states
            .get(&task_id)
            .is_none_or(|state| state.status.is_terminal());
        if terminal {
            // Terminal tasks free their robots within the same tick.
            return Intent::Idle;
        }

        let Some(constraint) = &task.spatial_constraint else {
            return Intent::Work(task_id);
        };

        let goal = match constraint.target {
            SpatialTarget::Point(point) => point,
            SpatialTarget::Zone(zone_id) => {
                let nearest = self
                    .env
                    .get_zone(zone_id)
                    .and_then(|zone| zone.nearest_cell(position.cell()));
                match nearest {
                    Some(cell) => cell.position(),
                    None => {
                        warn!("task {task_id} targets missing zone {zone_id}");
                        return Intent::Move; // no step recorded: robot idles
                    }
                }
            }
        };

        let tolerance = M::ARRIVAL_EPS.max(constraint.max_distance as f64);
        if position.near(goal, tolerance) {
            return Intent::Work(task_id);
        }

        let occupied: FxHashSet<Cell> = pre_positions
            .iter()
            .filter(|&(&other, _)| other != robot_id)
            .map(|(_, &pos)| pos.cell())
            .collect();

        match pathfinder.next_step(&self.env, position, goal, &occupied) {
            Some(step) if self.step_is_legal(position, step) => {
                steps.insert(robot_id, step);
                Intent::Move
            }
            Some(step) => {
                warn!("pathfinder returned illegal step {step} for robot {robot_id}, ignoring");
                Intent::Move
            }
            None => Intent::Move,
        }
    }

    /// A planned step must stay in bounds, reach at most one cell away, and
    /// not land on an obstacle. Anything else is a contract violation from
    /// the pathfinding plug-in.
    fn step_is_legal(&self, from: Position, step: Position) -> bool {
        self.env.in_bounds(step)
            && from.cell().chebyshev(step.cell()) <= 1
            && !self.env.is_obstacle(step.cell())
    }
}
