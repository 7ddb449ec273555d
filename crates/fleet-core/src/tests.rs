//! Unit tests for fleet-core primitives.

#[cfg(test)]
mod ids {
    use crate::{RobotId, TaskId, ZoneId};

    #[test]
    fn ordering() {
        assert!(RobotId(0) < RobotId(1));
        assert!(TaskId(100) > TaskId(99));
    }

    #[test]
    fn display() {
        assert_eq!(RobotId(7).to_string(), "RobotId(7)");
        assert_eq!(ZoneId(2).to_string(), "ZoneId(2)");
    }

    #[test]
    fn from_raw() {
        assert_eq!(RobotId::from(3u32), RobotId(3));
    }
}

#[cfg(test)]
mod pos {
    use crate::{Cell, Position};

    #[test]
    fn neighbor_directions_follow_y_down_convention() {
        let c = Cell::new(2, 3);
        assert_eq!(c.up(), Cell::new(2, 2));
        assert_eq!(c.down(), Cell::new(2, 4));
        assert_eq!(c.left(), Cell::new(1, 3));
        assert_eq!(c.right(), Cell::new(3, 3));
    }

    #[test]
    fn neighbors4_order_is_fixed() {
        let c = Cell::new(0, 0);
        assert_eq!(
            c.neighbors4(),
            [
                Cell::new(0, -1),
                Cell::new(0, 1),
                Cell::new(-1, 0),
                Cell::new(1, 0)
            ]
        );
    }

    #[test]
    fn manhattan_and_chebyshev() {
        let a = Cell::new(0, 0);
        let b = Cell::new(3, -4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(a.chebyshev(b), 4);
    }

    #[test]
    fn position_floors_into_cell() {
        assert_eq!(Position::new(3.74, 2.12).cell(), Cell::new(3, 2));
        assert_eq!(Position::new(3.0, 2.0).cell(), Cell::new(3, 2));
        assert_eq!(Position::new(-0.5, 0.0).cell(), Cell::new(-1, 0));
    }

    #[test]
    fn euclidean_distance() {
        let a = Position::new(0.0, 0.0);
        let b = Position::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn near_is_inclusive() {
        let a = Position::new(0.0, 0.0);
        assert!(a.near(Position::new(0.5, 0.0), 0.5));
        assert!(!a.near(Position::new(0.51, 0.0), 0.5));
        assert!(a.near(a, 0.0));
    }

    #[test]
    fn position_manhattan_uses_cells() {
        let a = Position::new(0.9, 0.9);
        let b = Position::new(1.1, 0.0);
        assert_eq!(a.manhattan(b), 1);
    }
}

#[cfg(test)]
mod time {
    use crate::Time;

    #[test]
    fn advance_returns_new_value() {
        let t = Time(10);
        assert_eq!(t.advance(Time(5)), Time(15));
        assert_eq!(t, Time(10));
    }

    #[test]
    fn ordering_and_display() {
        assert!(Time(3) < Time(4));
        assert_eq!(Time::ZERO.tick(), 0);
        assert_eq!(Time(42).to_string(), "T42");
    }
}

#[cfg(test)]
mod capability {
    use crate::Capability;

    #[test]
    fn parse_roundtrip() {
        for cap in Capability::ALL {
            assert_eq!(cap.as_str().parse::<Capability>().unwrap(), cap);
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!("levitation".parse::<Capability>().is_err());
        // Parsing is case-sensitive: scenario files use lowercase tags.
        assert!("Vision".parse::<Capability>().is_err());
    }
}
