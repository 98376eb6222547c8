//! Unit tests for sw-map.
//!
//! Mazes are built by hand or generated from a fixed seed, so every
//! assertion is deterministic.

#[cfg(test)]
mod helpers {
    use std::collections::VecDeque;

    use sw_core::{Coordinates, Direction};

    use crate::{GridMap, Maze};

    /// Scan every cell of `maze` into a fresh map.
    pub fn fully_explored(maze: &Maze) -> GridMap {
        let mut map = GridMap::new(maze.xsize(), maze.ysize());
        for y in 0..maze.ysize() {
            for x in 0..maze.xsize() {
                let c = Coordinates::new(x, y);
                map.scan_merge(c, maze.walls_at(c)).unwrap();
            }
        }
        map
    }

    /// Shortest-path distance on the ground-truth maze, computed independently
    /// of the pathfinder.
    pub fn maze_distance(maze: &Maze, from: Coordinates, to: Coordinates) -> Option<usize> {
        let mut dist = std::collections::HashMap::new();
        dist.insert(from, 0usize);
        let mut queue = VecDeque::from([from]);
        while let Some(c) = queue.pop_front() {
            if c == to {
                return dist.get(&c).copied();
            }
            let d = dist[&c];
            for dir in Direction::ALL {
                if maze.wall(c, dir) {
                    continue;
                }
                if let Some(n) = c.step(dir, maze.xsize(), maze.ysize()) {
                    dist.entry(n).or_insert_with(|| {
                        queue.push_back(n);
                        d + 1
                    });
                }
            }
        }
        None
    }

    pub fn c(x: u32, y: u32) -> Coordinates {
        Coordinates::new(x, y)
    }
}

// ── Walls ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod walls {
    use sw_core::Direction;

    use super::helpers::c;
    use crate::{WallGrid, WallInfo};

    #[test]
    fn closed_grid_is_walled_everywhere() {
        let g = WallGrid::closed(3, 2);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(g.walls_at(c(x, y)), WallInfo::CLOSED);
            }
        }
    }

    #[test]
    fn open_grid_keeps_only_boundary() {
        let g = WallGrid::open(3, 3);
        assert_eq!(g.walls_at(c(1, 1)), WallInfo::OPEN);
        // N, S, E, W
        assert_eq!(g.walls_at(c(0, 0)), WallInfo([true, false, false, true]));
        assert_eq!(g.walls_at(c(2, 2)), WallInfo([false, true, true, false]));
    }

    #[test]
    fn edges_are_shared_between_neighbours() {
        let mut g = WallGrid::closed(2, 2);
        g.set_wall(c(0, 0), Direction::East, false);
        assert!(!g.wall(c(1, 0), Direction::West));
        g.set_wall(c(1, 1), Direction::North, false);
        assert!(!g.wall(c(1, 0), Direction::South));
    }

    #[test]
    fn out_of_bounds_reads_as_walled() {
        let g = WallGrid::open(2, 2);
        assert!(g.wall(c(5, 5), Direction::North));
        assert_eq!(g.passage(c(5, 5), Direction::South), None);
    }

    #[test]
    fn openings_follow_canonical_order() {
        let info = WallInfo([false, true, false, false]);
        let dirs: Vec<_> = info.openings().collect();
        assert_eq!(dirs, vec![Direction::North, Direction::East, Direction::West]);
    }
}

// ── GridMap ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod grid {
    use sw_core::Direction;

    use super::helpers::{c, fully_explored};
    use crate::{CellStatus, GridMap, MapError, Maze};

    #[test]
    fn fresh_map_knows_nothing() {
        let map = GridMap::new(4, 4);
        assert_eq!(map.cell_count(), 16);
        assert!(map.cells().all(|(_, s)| s == CellStatus::Unknown));
        assert_eq!(map.frontier_count(), 0);
        assert!(map.neighbors(c(1, 1)).is_empty());
    }

    #[test]
    fn scan_marks_open_neighbours_frontier() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        let out = map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        assert_eq!(out.previous, CellStatus::Unknown);
        assert_eq!(out.new_frontier, 2);
        assert!(out.newly_explored());
        assert_eq!(map.status(c(0, 0)), CellStatus::Explored);
        assert_eq!(map.status(c(1, 0)), CellStatus::Frontier);
        assert_eq!(map.status(c(0, 1)), CellStatus::Frontier);
        assert_eq!(map.status(c(1, 1)), CellStatus::Unknown);
    }

    #[test]
    fn scan_of_frontier_cell_reports_previous_status() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        let out = map.scan_merge(c(1, 0), maze.walls_at(c(1, 0))).unwrap();
        assert_eq!(out.previous, CellStatus::Frontier);
        // (0,0) is already explored; (2,0) and (1,1) are new.
        assert_eq!(out.new_frontier, 2);
    }

    #[test]
    fn scan_merge_is_idempotent() {
        let maze = Maze::open(4, 4);
        let mut once = GridMap::new(4, 4);
        once.scan_merge(c(2, 1), maze.walls_at(c(2, 1))).unwrap();
        let mut twice = once.clone();
        let out = twice.scan_merge(c(2, 1), maze.walls_at(c(2, 1))).unwrap();
        assert!(!out.newly_explored());
        assert_eq!(out.new_frontier, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn explored_cell_walls_are_not_overwritten() {
        let maze = Maze::open(2, 2);
        let mut map = GridMap::new(2, 2);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        let before = map.clone();
        map.scan_merge(c(0, 0), crate::WallInfo::CLOSED).unwrap();
        assert_eq!(map, before);
    }

    #[test]
    fn scan_out_of_bounds_is_an_error() {
        let mut map = GridMap::new(2, 2);
        let err = map.scan_merge(c(2, 0), crate::WallInfo::OPEN).unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds(p) if p == c(2, 0)));
    }

    #[test]
    fn corner_cell_never_reads_outside() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        assert!(map.wall(c(0, 0), Direction::North));
        assert!(map.wall(c(0, 0), Direction::West));
        assert_eq!(c(0, 0).step(Direction::North, 4, 4), None);
        assert_eq!(c(0, 0).step(Direction::West, 4, 4), None);

        map.scan_merge(c(3, 3), maze.walls_at(c(3, 3))).unwrap();
        assert!(map.wall(c(3, 3), Direction::South));
        assert!(map.wall(c(3, 3), Direction::East));
    }

    #[test]
    fn neighbors_are_open_seen_and_ordered() {
        let map = fully_explored(&Maze::open(3, 3));
        assert_eq!(
            map.neighbors(c(1, 1)),
            vec![c(1, 0), c(1, 2), c(2, 1), c(0, 1)],
        );
        assert_eq!(map.neighbors(c(0, 0)), vec![c(0, 1), c(1, 0)]);
    }

    #[test]
    fn mark_frontier_only_promotes_unknown() {
        let maze = Maze::open(2, 2);
        let mut map = GridMap::new(2, 2);
        assert!(map.mark_frontier(c(1, 1)));
        assert!(!map.mark_frontier(c(1, 1)));
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        assert!(!map.mark_frontier(c(0, 0)));
        assert_eq!(map.status(c(0, 0)), CellStatus::Explored);
        assert!(!map.mark_frontier(c(9, 9)));
    }

    #[test]
    fn full_exploration_counts() {
        let map = fully_explored(&Maze::open(4, 4));
        assert!(map.is_fully_explored());
        assert_eq!(map.explored_count(), 16);
        assert_eq!(map.frontier_count(), 0);
    }

    #[test]
    fn status_codes_match_legacy_encoding() {
        assert_eq!(CellStatus::Unknown.code(), 0);
        assert_eq!(CellStatus::Explored.code(), 1);
        assert_eq!(CellStatus::Frontier.code(), 2);
    }
}

// ── Sub-maps ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod submap {
    use super::helpers::{c, fully_explored};
    use crate::{CellStatus, GridMap, Maze};

    #[test]
    fn target_then_entry_lead_the_bfs() {
        let global = fully_explored(&Maze::open(3, 3));
        let sub = global.extract_submap(c(1, 1), c(0, 1));
        assert_eq!(sub.cells[0].coords, c(1, 1));
        assert_eq!(sub.cells[1].coords, c(0, 1));
        assert_eq!(sub.len(), 9);
        assert!(sub.cells.iter().all(|cell| cell.status == CellStatus::Explored));
    }

    #[test]
    fn frontier_cells_are_leaves() {
        let maze = Maze::open(4, 4);
        let mut global = GridMap::new(4, 4);
        global.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();

        let sub = global.extract_submap(c(0, 0), c(1, 0));
        let coords: Vec<_> = sub.cells.iter().map(|cell| cell.coords).collect();
        assert_eq!(coords, vec![c(0, 0), c(1, 0), c(0, 1)]);
        assert_eq!(sub.get(c(1, 0)).map(|cell| cell.status), Some(CellStatus::Frontier));
    }

    #[test]
    fn unknown_target_yields_empty_submap() {
        let global = GridMap::new(3, 3);
        let sub = global.extract_submap(c(1, 1), c(0, 1));
        assert!(sub.is_empty());
    }

    #[test]
    fn merge_adds_knowledge() {
        let global = fully_explored(&Maze::open(3, 3));
        let sub = global.extract_submap(c(2, 2), c(2, 1));
        let mut local = GridMap::new(3, 3);
        assert_eq!(local.merge_submap(&sub), 9);
        assert_eq!(local, global);
    }

    #[test]
    fn merge_never_regresses() {
        let maze = Maze::open(4, 4);
        let mut global = GridMap::new(4, 4);
        global.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        let sub = global.extract_submap(c(0, 0), c(1, 0));

        let mut local = GridMap::new(4, 4);
        local.scan_merge(c(1, 0), maze.walls_at(c(1, 0))).unwrap();
        let newly = local.merge_submap(&sub);

        assert_eq!(newly, 1);
        assert_eq!(local.status(c(1, 0)), CellStatus::Explored);
        assert_eq!(local.status(c(0, 0)), CellStatus::Explored);
        assert_eq!(local.status(c(0, 1)), CellStatus::Frontier);
    }
}

// ── Pathfinding ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod pathfind {
    use std::collections::BTreeSet;

    use sw_core::MazeRng;

    use super::helpers::{c, fully_explored, maze_distance};
    use crate::{BfsPathfinder, CellStatus, GridMap, MapError, Maze, MazeBuilder, Pathfinder};

    #[test]
    fn nearest_frontier_from_corner_is_one_step() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();

        let path = BfsPathfinder
            .path_to_frontier(&map, c(0, 0), &BTreeSet::new())
            .unwrap()
            .expect("frontier reachable");
        assert_eq!(path.len(), 1);
        // South is expanded before East.
        assert_eq!(path.target(), c(0, 1));
        assert_eq!(path.entry(), c(0, 0));
        assert_eq!(map.status(path.target()), CellStatus::Frontier);
    }

    #[test]
    fn exclusions_are_skipped() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();

        let exclude = BTreeSet::from([c(0, 1)]);
        let path = BfsPathfinder.path_to_frontier(&map, c(0, 0), &exclude).unwrap().unwrap();
        assert_eq!(path.steps, vec![c(1, 0)]);

        let exclude = BTreeSet::from([c(0, 1), c(1, 0)]);
        assert!(BfsPathfinder.path_to_frontier(&map, c(0, 0), &exclude).unwrap().is_none());
    }

    #[test]
    fn no_frontier_when_fully_explored() {
        let map = fully_explored(&Maze::open(4, 4));
        let found = BfsPathfinder.path_to_frontier(&map, c(2, 2), &BTreeSet::new()).unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn frontier_path_crosses_no_walls() {
        let mut rng = MazeRng::new(7);
        let maze = Maze::generate(6, 6, &mut rng);
        let mut map = GridMap::new(6, 6);
        // Explore the first column only.
        for y in 0..6 {
            map.scan_merge(c(0, y), maze.walls_at(c(0, y))).unwrap();
        }
        let path = BfsPathfinder
            .path_to_frontier(&map, c(0, 0), &BTreeSet::new())
            .unwrap()
            .expect("a connected maze always leaves a frontier beside column 0");
        assert!(!path.is_trivial());
        assert_eq!(map.status(path.target()), CellStatus::Frontier);
        let mut prev = path.origin;
        for &step in path.iter() {
            let dir = prev.direction_to(step).expect("adjacent");
            assert!(!maze.wall(prev, dir), "path crosses wall at {prev} {dir}");
            prev = step;
        }
    }

    #[test]
    fn path_to_self_is_trivial() {
        let map = fully_explored(&Maze::open(2, 2));
        let path = BfsPathfinder.path_to(&map, c(1, 1), c(1, 1)).unwrap();
        assert!(path.is_trivial());
        assert_eq!(path.target(), c(1, 1));
    }

    #[test]
    fn path_to_unknown_destination_fails() {
        let maze = Maze::open(4, 4);
        let mut map = GridMap::new(4, 4);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        let err = BfsPathfinder.path_to(&map, c(0, 0), c(3, 3)).unwrap_err();
        assert!(matches!(err, MapError::DestinationUnknown(p) if p == c(3, 3)));
    }

    #[test]
    fn path_out_of_bounds_fails() {
        let map = fully_explored(&Maze::open(2, 2));
        let err = BfsPathfinder.path_to(&map, c(0, 0), c(4, 0)).unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds(_)));
        let err = BfsPathfinder.path_to_frontier(&map, c(4, 0), &BTreeSet::new()).unwrap_err();
        assert!(matches!(err, MapError::OutOfBounds(_)));
    }

    #[test]
    fn walled_off_destination_has_no_path() {
        let maze = MazeBuilder::new(2, 1).build();
        let map = fully_explored(&maze);
        let err = BfsPathfinder.path_to(&map, c(0, 0), c(1, 0)).unwrap_err();
        assert!(matches!(err, MapError::NoPath { .. }));
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let map = fully_explored(&Maze::open(4, 4));
        let path = BfsPathfinder.path_to(&map, c(0, 0), c(3, 3)).unwrap();
        assert_eq!(path.len(), 6);
        assert_eq!(path.target(), c(3, 3));
        assert_eq!(path.origin, c(0, 0));
    }

    #[test]
    fn path_length_equals_bfs_depth() {
        let mut rng = MazeRng::new(11);
        let maze = MazeBuilder::new(8, 8).generate(&mut rng).braid(&mut rng, 0.5).build();
        let map = fully_explored(&maze);
        for target in [c(7, 7), c(0, 7), c(4, 3), c(7, 0)] {
            let path = BfsPathfinder.path_to(&map, c(0, 0), target).unwrap();
            assert_eq!(Some(path.len()), maze_distance(&maze, c(0, 0), target));
        }
    }
}

// ── Maze ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod maze {
    use sw_core::{Direction, MazeRng};

    use super::helpers::c;
    use crate::{MapError, Maze, MazeBuilder};

    fn open_interior_edges(maze: &Maze) -> usize {
        let mut n = 0;
        for y in 0..maze.ysize() {
            for x in 0..maze.xsize() {
                if !maze.wall(c(x, y), Direction::East) {
                    n += 1;
                }
                if !maze.wall(c(x, y), Direction::South) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn generated_maze_is_perfect() {
        let mut rng = MazeRng::new(42);
        let maze = Maze::generate(10, 7, &mut rng);
        assert!(maze.is_connected());
        // A spanning tree over 70 cells has 69 edges.
        assert_eq!(open_interior_edges(&maze), 69);
    }

    #[test]
    fn generation_is_reproducible() {
        let a = Maze::generate(6, 6, &mut MazeRng::new(3));
        let b = Maze::generate(6, 6, &mut MazeRng::new(3));
        assert_eq!(a, b);
    }

    #[test]
    fn braiding_adds_loops_and_stays_connected() {
        let mut rng = MazeRng::new(5);
        let maze = MazeBuilder::new(8, 8).generate(&mut rng).braid(&mut rng, 1.0).build();
        assert!(maze.is_connected());
        assert!(open_interior_edges(&maze) > 63);
    }

    #[test]
    fn boundary_cannot_be_carved() {
        let mut b = MazeBuilder::new(2, 2);
        assert!(!b.carve(c(0, 0), Direction::North));
        assert!(!b.carve(c(1, 1), Direction::East));
        assert!(b.carve(c(0, 0), Direction::East));
        let maze = b.build();
        assert!(maze.wall(c(0, 0), Direction::North));
        assert!(!maze.wall(c(1, 0), Direction::West));
        assert!(!maze.is_connected());
    }

    #[test]
    fn closed_maze_is_disconnected() {
        assert!(!MazeBuilder::new(3, 3).build().is_connected());
        assert!(Maze::open(3, 3).is_connected());
    }

    #[test]
    fn size_check() {
        let maze = Maze::open(4, 3);
        assert!(maze.check_size(4, 3).is_ok());
        assert!(matches!(
            maze.check_size(4, 4),
            Err(MapError::SizeMismatch { want_y: 4, got_y: 3, .. })
        ));
    }

    #[test]
    fn parse_reads_rendered_diagram() {
        let maze = Maze::generate(5, 4, &mut MazeRng::new(9));
        let parsed = Maze::parse(&maze.to_string()).unwrap();
        assert_eq!(parsed, maze);
    }

    #[test]
    fn parse_hand_written_diagram() {
        let text = "\
+---+---+
|   |   |
+   +   +
|       |
+---+---+
";
        let maze = Maze::parse(text).unwrap();
        assert_eq!((maze.xsize(), maze.ysize()), (2, 2));
        assert!(maze.wall(c(0, 0), Direction::East));
        assert!(!maze.wall(c(0, 0), Direction::South));
        assert!(!maze.wall(c(0, 1), Direction::East));
    }

    #[test]
    fn parse_rejects_open_boundary() {
        let text = "\
+---+   +
|       |
+---+---+
";
        assert!(matches!(Maze::parse(text), Err(MapError::Parse { .. })));
        assert!(matches!(Maze::parse("+---+\n"), Err(MapError::Parse { .. })));
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod render {
    use sw_core::RobotId;

    use super::helpers::c;
    use crate::{render, GridMap, Maze};

    #[test]
    fn unknown_map() {
        let map = GridMap::new(2, 1);
        assert_eq!(render(&map, &[]), "+---+---+\n| X | X |\n+---+---+\n");
    }

    #[test]
    fn explored_frontier_and_robot() {
        let maze = Maze::open(2, 1);
        let mut map = GridMap::new(2, 1);
        map.scan_merge(c(0, 0), maze.walls_at(c(0, 0))).unwrap();
        assert_eq!(map.to_string(), "+---+---+\n|     * |\n+---+---+\n");
        assert_eq!(
            render(&map, &[(RobotId(1), c(0, 0))]),
            "+---+---+\n| 1   * |\n+---+---+\n",
        );
    }

    #[test]
    fn wide_ids_fall_back_to_marker() {
        let map = GridMap::new(1, 1);
        assert_eq!(render(&map, &[(RobotId(12), c(0, 0))]), "+---+\n|12 |\n+---+\n");
        assert_eq!(render(&map, &[(RobotId(1234), c(0, 0))]), "+---+\n| R |\n+---+\n");
    }

    #[test]
    fn maze_display() {
        assert_eq!(Maze::open(2, 1).to_string(), "+---+---+\n|       |\n+---+---+\n");
    }
}
