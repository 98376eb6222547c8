//! Exploration map: per-cell status plus the walls learned so far.
//!
//! The same type serves as a robot's private local map and as the
//! coordinator's global map.  Neither is ever shared by reference across
//! threads; information flows between them only as scan reports and
//! [`SubMap`](crate::SubMap)s.
//!
//! # Status lifecycle
//!
//! ```text
//! Unknown ──(neighbour scanned, no wall)──▶ Frontier ──(scanned)──▶ Explored
//!    └───────────────────────(scanned)──────────────────────────────────┘
//! ```
//!
//! Transitions are monotonic.  No public method moves a cell backwards.

use sw_core::{Coordinates, Direction};

use crate::walls::{WallGrid, WallInfo};
use crate::{MapError, MapResult};

// ── CellStatus ────────────────────────────────────────────────────────────────

/// How much is known about a cell.
///
/// The discriminants match the legacy integer encoding (0 unknown,
/// 1 explored, 2 frontier) used in log output and CSV rows.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CellStatus {
    /// Never observed.
    #[default]
    Unknown  = 0,
    /// Scanned: all four walls are known.
    Explored = 1,
    /// Seen through an open edge of an explored neighbour, not yet scanned.
    Frontier = 2,
}

impl CellStatus {
    /// `true` for any status other than `Unknown`.
    #[inline]
    pub fn is_seen(self) -> bool {
        !matches!(self, CellStatus::Unknown)
    }

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Rank along the lifecycle; a merge may only increase it.
    #[inline]
    fn rank(self) -> u8 {
        match self {
            CellStatus::Unknown  => 0,
            CellStatus::Frontier => 1,
            CellStatus::Explored => 2,
        }
    }
}

// ── MergeOutcome ──────────────────────────────────────────────────────────────

/// What a [`GridMap::scan_merge`] changed.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct MergeOutcome {
    /// Status of the scanned cell before the merge.
    pub previous: CellStatus,
    /// Neighbours promoted from `Unknown` to `Frontier`.
    pub new_frontier: u32,
}

impl MergeOutcome {
    /// `false` when the cell was already explored and nothing changed.
    #[inline]
    pub fn newly_explored(&self) -> bool {
        self.previous != CellStatus::Explored
    }
}

// ── GridMap ───────────────────────────────────────────────────────────────────

/// Cell statuses and known walls for an `xsize` × `ysize` maze.
///
/// A fresh map knows nothing: every cell is `Unknown` and every edge is
/// recorded as a wall, meaning "not known to be passable".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    walls: WallGrid,
    /// Row-major, length `xsize * ysize`.
    nodes: Vec<CellStatus>,
}

impl GridMap {
    pub fn new(xsize: u32, ysize: u32) -> Self {
        Self {
            walls: WallGrid::closed(xsize, ysize),
            nodes: vec![CellStatus::Unknown; xsize as usize * ysize as usize],
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn xsize(&self) -> u32 {
        self.walls.xsize()
    }

    #[inline]
    pub fn ysize(&self) -> u32 {
        self.walls.ysize()
    }

    #[inline]
    pub fn in_bounds(&self, c: Coordinates) -> bool {
        self.walls.in_bounds(c)
    }

    pub fn cell_count(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    fn node_index(&self, c: Coordinates) -> usize {
        c.y as usize * self.xsize() as usize + c.x as usize
    }

    fn check_bounds(&self, c: Coordinates) -> MapResult<()> {
        if self.in_bounds(c) { Ok(()) } else { Err(MapError::OutOfBounds(c)) }
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// Status of `c`; cells outside the map read as `Unknown`.
    #[inline]
    pub fn status(&self, c: Coordinates) -> CellStatus {
        if !self.in_bounds(c) {
            return CellStatus::Unknown;
        }
        self.nodes[self.node_index(c)]
    }

    /// `true` if the known walls put one on the `dir` side of `c`.
    #[inline]
    pub fn wall(&self, c: Coordinates, dir: Direction) -> bool {
        self.walls.wall(c, dir)
    }

    #[inline]
    pub fn walls_at(&self, c: Coordinates) -> WallInfo {
        self.walls.walls_at(c)
    }

    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    /// Adjacent cells that are reachable through an open edge and have been
    /// seen, in North, South, East, West order.
    ///
    /// This is the expansion step of every BFS in the workspace.
    pub fn neighbors(&self, c: Coordinates) -> Vec<Coordinates> {
        Direction::ALL
            .into_iter()
            .filter_map(|dir| self.walls.passage(c, dir))
            .filter(|&n| self.status(n).is_seen())
            .collect()
    }

    /// Every cell with its status, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (Coordinates, CellStatus)> + '_ {
        let xsize = self.xsize();
        self.nodes.iter().enumerate().map(move |(i, &s)| {
            let i = i as u32;
            (Coordinates::new(i % xsize, i / xsize), s)
        })
    }

    pub fn frontier_count(&self) -> usize {
        self.nodes.iter().filter(|&&s| s == CellStatus::Frontier).count()
    }

    pub fn explored_count(&self) -> usize {
        self.nodes.iter().filter(|&&s| s == CellStatus::Explored).count()
    }

    pub fn is_fully_explored(&self) -> bool {
        self.nodes.iter().all(|&s| s == CellStatus::Explored)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Record a scan of `c` whose four walls are `walls`.
    ///
    /// Marks `c` explored, stores its walls, and promotes every `Unknown`
    /// neighbour behind an open edge to `Frontier`.  Merging a cell that is
    /// already explored changes nothing, so repeating a scan is harmless.
    pub fn scan_merge(&mut self, c: Coordinates, walls: WallInfo) -> MapResult<MergeOutcome> {
        self.check_bounds(c)?;
        let previous = self.status(c);
        if previous == CellStatus::Explored {
            return Ok(MergeOutcome { previous, new_frontier: 0 });
        }

        self.walls.set_walls_at(c, walls);
        let idx = self.node_index(c);
        self.nodes[idx] = CellStatus::Explored;

        let mut new_frontier = 0;
        for dir in Direction::ALL {
            if let Some(n) = self.walls.passage(c, dir) {
                if self.mark_frontier(n) {
                    new_frontier += 1;
                }
            }
        }
        Ok(MergeOutcome { previous, new_frontier })
    }

    /// Promote an `Unknown` cell to `Frontier`.
    ///
    /// Returns `true` only if the status changed.
    pub fn mark_frontier(&mut self, c: Coordinates) -> bool {
        if self.status(c) != CellStatus::Unknown || !self.in_bounds(c) {
            return false;
        }
        let idx = self.node_index(c);
        self.nodes[idx] = CellStatus::Frontier;
        true
    }

    /// Raise `c` to at least `status`, never lowering it.
    ///
    /// Only used for non-explored statuses; exploring goes through
    /// [`scan_merge`](Self::scan_merge) so walls stay consistent.
    pub(crate) fn raise_status(&mut self, c: Coordinates, status: CellStatus) -> bool {
        debug_assert_ne!(status, CellStatus::Explored);
        if !self.in_bounds(c) || self.status(c).rank() >= status.rank() {
            return false;
        }
        let idx = self.node_index(c);
        self.nodes[idx] = status;
        true
    }
}

impl std::fmt::Display for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render(self, &[]))
    }
}
