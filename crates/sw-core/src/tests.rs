//! Unit tests for sw-core primitives.

#[cfg(test)]
mod ids {
    use crate::{RequestSeq, RobotId};

    #[test]
    fn first_robot_id_is_one() {
        assert_eq!(RobotId::FIRST.0, 1);
        assert_eq!(RobotId::FIRST.next(), RobotId(2));
    }

    #[test]
    fn ordering() {
        assert!(RobotId(1) < RobotId(2));
        assert!(RequestSeq(100) > RequestSeq(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(RobotId::INVALID.0, u32::MAX);
        assert_eq!(RequestSeq::INVALID.0, u64::MAX);
        assert_eq!(RobotId::default(), RobotId::INVALID);
        assert!(!RobotId::default().is_valid());
    }

    #[test]
    fn display() {
        assert_eq!(RobotId(7).to_string(), "RobotId(7)");
        assert_eq!(u32::from(RobotId(7)), 7);
    }
}

#[cfg(test)]
mod coords {
    use crate::{Coordinates, Direction};

    #[test]
    fn step_inside_grid() {
        let c = Coordinates::new(1, 1);
        assert_eq!(c.step(Direction::North, 4, 4), Some(Coordinates::new(1, 0)));
        assert_eq!(c.step(Direction::South, 4, 4), Some(Coordinates::new(1, 2)));
        assert_eq!(c.step(Direction::East, 4, 4),  Some(Coordinates::new(2, 1)));
        assert_eq!(c.step(Direction::West, 4, 4),  Some(Coordinates::new(0, 1)));
    }

    #[test]
    fn step_never_leaves_grid() {
        let origin = Coordinates::new(0, 0);
        assert_eq!(origin.step(Direction::North, 4, 4), None);
        assert_eq!(origin.step(Direction::West, 4, 4), None);

        let corner = Coordinates::new(3, 3);
        assert_eq!(corner.step(Direction::South, 4, 4), None);
        assert_eq!(corner.step(Direction::East, 4, 4), None);
    }

    #[test]
    fn direction_to_adjacent_only() {
        let c = Coordinates::new(2, 2);
        assert_eq!(c.direction_to(Coordinates::new(2, 1)), Some(Direction::North));
        assert_eq!(c.direction_to(Coordinates::new(3, 2)), Some(Direction::East));
        assert_eq!(c.direction_to(Coordinates::new(3, 3)), None); // diagonal
        assert_eq!(c.direction_to(Coordinates::new(2, 4)), None); // two away
        assert_eq!(c.direction_to(c), None);
    }

    #[test]
    fn step_and_direction_agree() {
        let c = Coordinates::new(1, 2);
        for dir in Direction::ALL {
            let n = c.step(dir, 5, 5).unwrap();
            assert_eq!(c.direction_to(n), Some(dir));
            assert_eq!(n.direction_to(c), Some(dir.opposite()));
        }
    }

    #[test]
    fn total_order_is_usable_as_key() {
        use std::collections::BTreeSet;
        let set: BTreeSet<_> = [(1, 0), (0, 1), (1, 0)].into_iter().map(Coordinates::from).collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn manhattan_distance() {
        assert_eq!(Coordinates::new(0, 0).manhattan(Coordinates::new(3, 2)), 5);
    }
}

#[cfg(test)]
mod config {
    use std::time::Duration;

    use crate::{CoreError, SwarmConfig};

    #[test]
    fn default_is_valid_four_by_four() {
        let cfg = SwarmConfig::default();
        assert_eq!((cfg.maze_xsize, cfg.maze_ysize), (4, 4));
        assert_eq!(cfg.cell_count(), 16);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_maze_rejected() {
        let cfg = SwarmConfig { maze_xsize: 0, ..SwarmConfig::default() };
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn too_many_robots_rejected() {
        let cfg = SwarmConfig { maze_xsize: 2, maze_ysize: 2, swarm_size: 5, ..SwarmConfig::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let cfg = SwarmConfig { reply_timeout: Some(Duration::ZERO), ..SwarmConfig::default() };
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::MazeRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = MazeRng::new(7);
        let mut b = MazeRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn children_diverge() {
        let mut root = MazeRng::new(7);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        let a: Vec<u32> = (0..8).map(|_| c1.gen_range(0..u32::MAX)).collect();
        let b: Vec<u32> = (0..8).map(|_| c2.gen_range(0..u32::MAX)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = MazeRng::new(1);
        let empty: [u8; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }
}
