//! Seeded random workload generation.
//!
//! Produces batches of schema-shaped tasks scattered over a grid, for load
//! tests and demo scenes. All randomness flows from one caller-supplied
//! seed through a `SmallRng`, so a given (generator, seed, count) triple
//! always yields the same batch.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use fleet_core::{Capability, Position, TaskId, Time};
use fleet_model::{SpatialConstraint, Task, TaskType};

/// Generates random task batches over a `width × height` grid.
#[derive(Clone, Debug)]
pub struct WorkloadGenerator {
    pub width:  u32,
    pub height: u32,

    /// Task types to draw from. Defaults to all of them.
    pub task_types: Vec<TaskType>,

    /// Capability pool sampled for per-task requirements (one or two tags
    /// per task). Defaults to the full tag set.
    pub capability_pool: Vec<Capability>,
}

impl WorkloadGenerator {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            task_types: vec![
                TaskType::RoutineInspection,
                TaskType::AnomalyInvestigation,
                TaskType::PreventiveMaintenance,
                TaskType::EmergencyResponse,
                TaskType::Pickup,
            ],
            capability_pool: Capability::ALL.to_vec(),
        }
    }

    /// Generate `count` tasks with ids `0..count`, deterministically from
    /// `seed`.
    pub fn generate(&self, count: u32, seed: u64) -> Vec<Task> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..count).map(|i| self.generate_one(i, &mut rng)).collect()
    }

    fn generate_one(&self, id: u32, rng: &mut SmallRng) -> Task {
        let task_type = *self
            .task_types
            .choose(rng)
            .unwrap_or(&TaskType::RoutineInspection);

        let x = rng.gen_range(0..self.width.max(1)) as f64;
        let y = rng.gen_range(0..self.height.max(1)) as f64;

        let mut task = Task::new(
            TaskId(id),
            task_type,
            rng.gen_range(1..=5),
            work_time_for(task_type, rng),
        )
        .with_constraint(SpatialConstraint::at(Position::new(x, y)));

        let wanted = rng.gen_range(1..=2usize.min(self.capability_pool.len().max(1)));
        task.required_capabilities = self
            .capability_pool
            .choose_multiple(rng, wanted)
            .copied()
            .collect();

        task
    }
}

/// Type-dependent work time with ±20 % jitter.
fn work_time_for(task_type: TaskType, rng: &mut SmallRng) -> Time {
    let base: f64 = match task_type {
        TaskType::RoutineInspection => 30.0,
        TaskType::AnomalyInvestigation => 60.0,
        TaskType::PreventiveMaintenance => 120.0,
        TaskType::EmergencyResponse => 45.0,
        TaskType::Pickup => 20.0,
    };
    Time((base * rng.gen_range(0.8..1.2)).round() as u64)
}
