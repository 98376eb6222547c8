//! Cell reservations.
//!
//! A reservation says "this robot is on its way to scan this cell".  The
//! table is indexed both ways so that each cell has at most one holder and
//! each robot holds at most one cell; reserving a new cell silently drops
//! the robot's previous one.

use std::collections::BTreeMap;

use sw_core::{Coordinates, RobotId};

#[derive(Debug, Default)]
pub struct ReservationTable {
    by_cell:  BTreeMap<Coordinates, RobotId>,
    by_robot: BTreeMap<RobotId, Coordinates>,
}

impl ReservationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self, cell: Coordinates) -> Option<RobotId> {
        self.by_cell.get(&cell).copied()
    }

    pub fn held_by(&self, robot: RobotId) -> Option<Coordinates> {
        self.by_robot.get(&robot).copied()
    }

    /// Give `cell` to `robot`, returning the cell the robot held before (if
    /// it was a different one).
    ///
    /// The caller must already have checked that no other robot holds `cell`.
    pub fn reserve(&mut self, cell: Coordinates, robot: RobotId) -> Option<Coordinates> {
        debug_assert!(self.holder(cell).is_none_or(|h| h == robot));
        let previous = self.by_robot.insert(robot, cell).filter(|&p| p != cell);
        if let Some(p) = previous {
            self.by_cell.remove(&p);
        }
        self.by_cell.insert(cell, robot);
        previous
    }

    /// Drop whatever reservation exists on `cell`.
    pub fn release_cell(&mut self, cell: Coordinates) -> Option<RobotId> {
        let holder = self.by_cell.remove(&cell)?;
        self.by_robot.remove(&holder);
        Some(holder)
    }

    /// Drop whatever `robot` holds.
    pub fn release_robot(&mut self, robot: RobotId) -> Option<Coordinates> {
        let cell = self.by_robot.remove(&robot)?;
        self.by_cell.remove(&cell);
        Some(cell)
    }

    pub fn len(&self) -> usize {
        self.by_cell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_cell.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coordinates, RobotId)> + '_ {
        self.by_cell.iter().map(|(&c, &r)| (c, r))
    }
}
