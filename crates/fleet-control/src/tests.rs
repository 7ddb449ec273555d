//! Tests for the control surface.

use fleet_assign::GreedyCapabilityAssigner;
use fleet_core::{Capability, Position, RobotId, TaskId, Time};
use fleet_model::{Assignment, Robot, RobotState, SpatialConstraint, Task, TaskType};
use fleet_path::BfsPathfinder;
use fleet_sim::{DiscreteMotion, Simulation, SimulationBuilder};
use fleet_world::Environment;

use crate::{ControlServer, parse_assignments, to_wire_json};

fn live_sim() -> Simulation<DiscreteMotion> {
    let robots = vec![
        Robot::new(RobotId(1), Capability::ALL, 1.0),
        Robot::new(RobotId(2), [Capability::Vision], 1.0),
    ];
    let tasks = vec![
        Task::new(TaskId(1), TaskType::Pickup, 3, Time(2))
            .with_constraint(SpatialConstraint::at(Position::new(4.0, 0.0)))
            .with_capabilities([Capability::Manipulation]),
        Task::new(TaskId(2), TaskType::RoutineInspection, 1, Time(1))
            .with_constraint(SpatialConstraint::at(Position::new(0.0, 4.0)))
            .with_capabilities([Capability::Vision]),
    ];
    SimulationBuilder::discrete(Environment::new(8, 8))
        .robots(robots)
        .tasks(tasks)
        .robot_states(vec![
            RobotState::at(RobotId(1), Position::new(0.0, 0.0)),
            RobotState::at(RobotId(2), Position::new(0.0, 1.0)),
        ])
        .assigner(GreedyCapabilityAssigner::new())
        .pathfinder(BfsPathfinder::new())
        .build()
        .unwrap()
}

#[cfg(test)]
mod wire {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let parsed =
            parse_assignments(r#"[{ "task_id": 1, "robot_ids": [1, 2] }]"#).unwrap();
        assert_eq!(
            parsed,
            vec![Assignment::new(TaskId(1), [RobotId(1), RobotId(2)])]
        );
    }

    #[test]
    fn empty_array_is_an_empty_plan() {
        assert!(parse_assignments("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(parse_assignments(r#"{ "task_id": 1 }"#).is_err());
        assert!(parse_assignments(r#"[{ "robots": [1] }]"#).is_err());
    }

    #[test]
    fn round_trips_through_json() {
        let assignments = vec![
            Assignment::new(TaskId(1), [RobotId(2)]),
            Assignment::new(TaskId(2), [RobotId(1), RobotId(3)]),
        ];
        let json = to_wire_json(&assignments).unwrap();
        assert_eq!(parse_assignments(&json).unwrap(), assignments);
    }
}

#[cfg(test)]
mod server {
    use super::*;

    #[test]
    fn step_advances_the_live_sim() {
        let mut server = ControlServer::new(live_sim());
        server.step(3).unwrap();
        assert_eq!(server.live().t_now(), Time(3));
    }

    #[test]
    fn evaluate_reports_the_outcome() {
        let server = ControlServer::new(live_sim());
        let plan = parse_assignments(
            r#"[{ "task_id": 1, "robot_ids": [1] },
                { "task_id": 2, "robot_ids": [2] }]"#,
        )
        .unwrap();
        let report = server.evaluate(plan, 200).unwrap();

        assert!(report.completed);
        assert_eq!(report.tasks_succeeded, 2);
        assert_eq!(report.tasks_total, 2);
        assert!(report.makespan.is_some());
        assert_eq!(report.per_task.len(), 2);
        assert!(report.per_task.iter().all(|t| t.status == "done"));
        assert_eq!(report.per_task[0].required_work_time, 2);

        // The report serializes for the reply payload.
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"completed\":true"));
    }

    #[test]
    fn evaluate_leaves_the_live_sim_untouched() {
        let server = ControlServer::new(live_sim());
        let before = server.snapshot();
        let plan = parse_assignments(r#"[{ "task_id": 1, "robot_ids": [1] }]"#).unwrap();
        server.evaluate(plan, 100).unwrap();

        assert_eq!(server.live().t_now(), Time(0));
        assert_eq!(server.snapshot(), before);
    }

    #[test]
    fn an_infeasible_plan_reports_incomplete() {
        let server = ControlServer::new(live_sim());
        // Nobody is sent to task 1.
        let plan = parse_assignments(r#"[{ "task_id": 2, "robot_ids": [2] }]"#).unwrap();
        let report = server.evaluate(plan, 50).unwrap();
        assert!(!report.completed);
        assert_eq!(report.makespan, None);
        assert_eq!(report.tasks_succeeded, 1);
    }

    #[test]
    fn propose_pins_the_live_assignment() {
        let mut server = ControlServer::new(live_sim());
        // Send the vision robot to task 2 and leave task 1 alone.
        let plan = parse_assignments(r#"[{ "task_id": 2, "robot_ids": [2] }]"#).unwrap();
        server.propose(plan);
        server.step(1).unwrap();

        let snapshot = server.snapshot();
        assert_eq!(
            snapshot.task_states()[&TaskId(2)].status,
            fleet_model::TaskStatus::Assigned
        );
        assert_eq!(
            snapshot.task_states()[&TaskId(1)].status,
            fleet_model::TaskStatus::Unassigned
        );
        // Robot 1 has no orders under the pinned plan: it idled in place.
        assert_eq!(
            snapshot.robot_states()[&RobotId(1)].position,
            Position::new(0.0, 0.0)
        );
    }
}
