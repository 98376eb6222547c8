//! Breadth-first pathfinding over a robot's known map.
//!
//! # Pluggability
//!
//! Robots call pathfinding through the [`Pathfinder`] trait, so a different
//! search (A*, wall-following, a cost model that avoids other robots) can be
//! dropped in without touching the robot state machine.  The default
//! [`BfsPathfinder`] is what the swarm runs with.
//!
//! # Search space
//!
//! Both searches expand only through [`GridMap::neighbors`]: open edges into
//! cells that have been seen.  Unknown cells are never entered, so every path
//! crosses only edges the robot has positively observed as open.

use std::collections::{BTreeSet, VecDeque};

use sw_core::Coordinates;

use crate::grid::{CellStatus, GridMap};
use crate::{CellMap, MapError, MapResult};

// ── Path ──────────────────────────────────────────────────────────────────────

/// An origin plus the cells to walk through, in walking order.
///
/// `steps` excludes the origin and ends at the destination.  Consecutive
/// cells are always orthogonally adjacent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    pub origin: Coordinates,
    pub steps:  Vec<Coordinates>,
}

impl Path {
    /// Number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if origin and destination coincide.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    /// Final cell of the path (the origin for a trivial path).
    pub fn target(&self) -> Coordinates {
        self.steps.last().copied().unwrap_or(self.origin)
    }

    /// The cell the path enters its target from.
    pub fn entry(&self) -> Coordinates {
        match self.steps.len() {
            0 | 1 => self.origin,
            n => self.steps[n - 2],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Coordinates> {
        self.steps.iter()
    }

    pub fn into_steps(self) -> Vec<Coordinates> {
        self.steps
    }
}

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable search engine.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`; each robot thread owns one, and a
/// shared instance may be cloned into many threads.
pub trait Pathfinder: Send + Sync {
    /// Shortest path from `from` to `to`.
    ///
    /// `from == to` yields a trivial path.  Fails with
    /// [`MapError::DestinationUnknown`] if `to` has never been seen and with
    /// [`MapError::NoPath`] if no known route connects the two.
    fn path_to(&self, map: &GridMap, from: Coordinates, to: Coordinates) -> MapResult<Path>;

    /// Path to the nearest frontier cell not listed in `exclude`.
    ///
    /// `Ok(None)` means nothing is left to explore from `from`; it is not an
    /// error.
    fn path_to_frontier(
        &self,
        map: &GridMap,
        from: Coordinates,
        exclude: &BTreeSet<Coordinates>,
    ) -> MapResult<Option<Path>>;
}

// ── BfsPathfinder ─────────────────────────────────────────────────────────────

/// Unweighted breadth-first search.
///
/// Neighbours are expanded in North, South, East, West order, so among
/// equally short answers the result is deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BfsPathfinder;

impl Pathfinder for BfsPathfinder {
    fn path_to(&self, map: &GridMap, from: Coordinates, to: Coordinates) -> MapResult<Path> {
        if !map.in_bounds(from) {
            return Err(MapError::OutOfBounds(from));
        }
        if !map.in_bounds(to) {
            return Err(MapError::OutOfBounds(to));
        }
        if map.status(to) == CellStatus::Unknown {
            return Err(MapError::DestinationUnknown(to));
        }
        if from == to {
            return Ok(Path { origin: from, steps: Vec::new() });
        }
        bfs(map, from, |c| c == to).ok_or(MapError::NoPath { from, to })
    }

    fn path_to_frontier(
        &self,
        map: &GridMap,
        from: Coordinates,
        exclude: &BTreeSet<Coordinates>,
    ) -> MapResult<Option<Path>> {
        if !map.in_bounds(from) {
            return Err(MapError::OutOfBounds(from));
        }
        Ok(bfs(map, from, |c| {
            c != from && map.status(c) == CellStatus::Frontier && !exclude.contains(&c)
        }))
    }
}

// ── BFS internals ─────────────────────────────────────────────────────────────

/// Search outward from `start` until a dequeued cell satisfies `is_goal`.
fn bfs(map: &GridMap, start: Coordinates, is_goal: impl Fn(Coordinates) -> bool) -> Option<Path> {
    // parent[c] = cell `c` was first reached from; the start is its own parent.
    let mut parent: CellMap<Coordinates> = CellMap::default();
    parent.insert(start, start);
    let mut queue = VecDeque::from([start]);

    while let Some(c) = queue.pop_front() {
        if is_goal(c) {
            return Some(reconstruct(&parent, start, c));
        }
        for n in map.neighbors(c) {
            if !parent.contains_key(&n) {
                parent.insert(n, c);
                queue.push_back(n);
            }
        }
    }
    None
}

/// Walk parent links back from `goal` to `start`, then reverse so the steps
/// come out in walking order.
fn reconstruct(parent: &CellMap<Coordinates>, start: Coordinates, goal: Coordinates) -> Path {
    let mut steps = Vec::new();
    let mut cur = goal;
    while cur != start {
        steps.push(cur);
        match parent.get(&cur) {
            Some(&p) => cur = p,
            None => break,
        }
    }
    steps.reverse();
    Path { origin: start, steps }
}
