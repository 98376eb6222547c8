use sw_core::{Coordinates, RobotId};

/// Per-robot tallies, returned when the robot's loop ends.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RobotSummary {
    pub id: RobotId,
    pub final_position: Coordinates,
    /// Cells this robot scanned that were new to its local map.
    pub cells_scanned: u32,
    pub moves: u32,
    /// Steps refused by a wall or another robot.
    pub moves_blocked: u32,
    pub reservations_granted: u32,
    pub reservations_denied: u32,
    pub submaps_merged: u32,
}
