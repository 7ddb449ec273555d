//! Tests for the built-in assignment policies.

use fleet_core::{Capability, RobotId, TaskId, Time};
use fleet_model::{Assignment, Robot, Task, TaskType};

use crate::{AssignmentPolicy, FixedAssignment, GreedyCapabilityAssigner};

fn robot(id: u32, caps: &[Capability]) -> Robot {
    Robot::new(RobotId(id), caps.iter().copied(), 1.0)
}

fn task(id: u32, caps: &[Capability]) -> Task {
    Task::new(TaskId(id), TaskType::Pickup, 1, Time(5)).with_capabilities(caps.iter().copied())
}

#[cfg(test)]
mod greedy {
    use super::*;

    #[test]
    fn assigns_in_input_order() {
        let tasks = [task(10, &[]), task(11, &[])];
        let robots = [robot(1, &[]), robot(2, &[])];
        let out = GreedyCapabilityAssigner::new().assign(&tasks, &robots);
        assert_eq!(
            out,
            vec![
                Assignment::solo(TaskId(10), RobotId(1)),
                Assignment::solo(TaskId(11), RobotId(2)),
            ]
        );
    }

    #[test]
    fn respects_capability_requirements() {
        let tasks = [task(1, &[Capability::Repair])];
        let robots = [
            robot(1, &[Capability::Vision]),
            robot(2, &[Capability::Repair, Capability::Vision]),
        ];
        let out = GreedyCapabilityAssigner::new().assign(&tasks, &robots);
        assert_eq!(out, vec![Assignment::solo(TaskId(1), RobotId(2))]);
    }

    #[test]
    fn each_robot_used_at_most_once() {
        let tasks = [task(1, &[]), task(2, &[]), task(3, &[])];
        let robots = [robot(1, &[])];
        let out = GreedyCapabilityAssigner::new().assign(&tasks, &robots);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].task_id, TaskId(1));
    }

    #[test]
    fn infeasible_tasks_are_skipped() {
        let tasks = [task(1, &[Capability::Charging]), task(2, &[])];
        let robots = [robot(1, &[Capability::Vision])];
        let out = GreedyCapabilityAssigner::new().assign(&tasks, &robots);
        // Task 1 has no feasible robot; robot 1 falls through to task 2.
        assert_eq!(out, vec![Assignment::solo(TaskId(2), RobotId(1))]);
    }

    #[test]
    fn no_robots_means_no_assignments() {
        let tasks = [task(1, &[])];
        let out = GreedyCapabilityAssigner::new().assign(&tasks, &[]);
        assert!(out.is_empty());
    }
}

#[cfg(test)]
mod fixed {
    use super::*;

    #[test]
    fn returns_the_same_list_every_call() {
        let pinned = vec![Assignment::solo(TaskId(1), RobotId(2))];
        let policy = FixedAssignment::new(pinned.clone());
        assert_eq!(policy.assign(&[], &[]), pinned);
        assert_eq!(policy.assign(&[task(9, &[])], &[robot(9, &[])]), pinned);
    }
}

#[cfg(test)]
mod closures {
    use super::*;

    #[test]
    fn a_closure_is_a_policy() {
        let policy = |tasks: &[Task], robots: &[Robot]| -> Vec<Assignment> {
            match (tasks.first(), robots.first()) {
                (Some(t), Some(r)) => vec![Assignment::solo(t.id, r.id)],
                _ => vec![],
            }
        };
        let out = AssignmentPolicy::assign(&policy, &[task(5, &[])], &[robot(6, &[])]);
        assert_eq!(out, vec![Assignment::solo(TaskId(5), RobotId(6))]);
    }
}
