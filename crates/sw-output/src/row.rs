//! Plain data rows written by output backends.

use sw_map::CellStatus;

/// One processed `UpdateGlobalMap` request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapUpdateRow {
    /// Coordinator sequence number of the request.
    pub seq:          u64,
    pub robot:        u32,
    pub x:            u32,
    pub y:            u32,
    /// Status of the cell before the scan was merged.
    pub previous:     CellStatus,
    pub new_frontier: u32,
    /// Global frontier count after the merge.
    pub unexplored:   usize,
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummaryRow {
    pub requests:          u64,
    pub robots_registered: usize,
    pub cells_total:       usize,
    pub cells_explored:    usize,
    pub unexplored:        usize,
    pub elapsed_ms:        u64,
}

impl RunSummaryRow {
    pub fn fully_explored(&self) -> bool {
        self.cells_explored == self.cells_total
    }
}
