//! Sub-map transfer between the global map and a robot's local map.
//!
//! When a robot asks to reserve a cell that somebody else has already
//! explored, the coordinator answers with the connected region of its global
//! map around that cell.  The robot folds it into its own map and replans
//! with the extra knowledge.

use std::collections::VecDeque;

use sw_core::Coordinates;

use crate::grid::{CellStatus, GridMap};
use crate::walls::WallInfo;
use crate::CellSet;

/// One cell of a [`SubMap`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubMapCell {
    pub coords: Coordinates,
    pub walls:  WallInfo,
    pub status: CellStatus,
}

/// A connected region copied out of a [`GridMap`].
///
/// Cells are stored in BFS discovery order starting at `target`.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubMap {
    /// The cell the robot asked for.
    pub target: Coordinates,
    /// The cell the robot planned to enter `target` from.
    pub entry: Coordinates,
    pub cells: Vec<SubMapCell>,
}

impl SubMap {
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, c: Coordinates) -> Option<&SubMapCell> {
        self.cells.iter().find(|cell| cell.coords == c)
    }
}

impl GridMap {
    /// Copy the seen region connected to `target`.
    ///
    /// BFS starts at `target`; `entry` is enqueued directly after it so the
    /// robot's approach is always part of the answer.  Explored cells are
    /// expanded through their open edges, frontier cells are included but not
    /// expanded (their walls are not known yet).  Unknown cells never appear.
    pub fn extract_submap(&self, target: Coordinates, entry: Coordinates) -> SubMap {
        let mut cells = Vec::new();
        let mut visited = CellSet::default();
        let mut queue = VecDeque::new();

        for seed in [target, entry] {
            if self.status(seed).is_seen() && visited.insert(seed) {
                queue.push_back(seed);
            }
        }

        while let Some(c) = queue.pop_front() {
            let status = self.status(c);
            cells.push(SubMapCell { coords: c, walls: self.walls_at(c), status });
            if status != CellStatus::Explored {
                continue;
            }
            for n in self.neighbors(c) {
                if visited.insert(n) {
                    queue.push_back(n);
                }
            }
        }

        SubMap { target, entry, cells }
    }

    /// Fold `sub` into this map without ever lowering a cell's status.
    ///
    /// Explored cells are merged exactly like a local scan (walls copied,
    /// neighbours promoted); frontier cells only promote `Unknown`.
    /// Returns the number of cells that became explored here.
    pub fn merge_submap(&mut self, sub: &SubMap) -> u32 {
        let mut newly_explored = 0;
        for cell in &sub.cells {
            match cell.status {
                CellStatus::Explored => {
                    if let Ok(outcome) = self.scan_merge(cell.coords, cell.walls) {
                        if outcome.newly_explored() {
                            newly_explored += 1;
                        }
                    }
                }
                CellStatus::Frontier => {
                    self.raise_status(cell.coords, CellStatus::Frontier);
                }
                CellStatus::Unknown => {}
            }
        }
        newly_explored
    }
}
