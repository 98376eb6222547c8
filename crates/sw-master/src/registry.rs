//! Registered robots as the coordinator sees them.

use std::collections::BTreeMap;

use sw_core::{Coordinates, RobotId};
use sw_protocol::{RobotLink, RobotStatus};

/// What the coordinator tracks per robot.
#[derive(Debug, Clone)]
pub struct RobotRecord {
    pub id:       RobotId,
    pub position: Coordinates,
    /// Latest known state: the last one commanded, or the phase implied by
    /// the robot's most recent request, whichever came later.
    pub status:   RobotStatus,
    pub link:     RobotLink,
}

/// Live robots keyed by id.
///
/// Ids are handed out sequentially from [`RobotId::FIRST`] and never reused,
/// even after a robot leaves.
#[derive(Debug)]
pub struct Registry {
    robots:  BTreeMap<RobotId, RobotRecord>,
    next_id: RobotId,
}

impl Default for Registry {
    fn default() -> Self {
        Registry { robots: BTreeMap::new(), next_id: RobotId::FIRST }
    }
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a robot standing on `position`; it starts in `StandBy`.
    pub fn register(&mut self, position: Coordinates, link: RobotLink) -> RobotId {
        let id = self.next_id;
        self.next_id = id.next();
        self.robots.insert(id, RobotRecord { id, position, status: RobotStatus::StandBy, link });
        id
    }

    pub fn get(&self, id: RobotId) -> Option<&RobotRecord> {
        self.robots.get(&id)
    }

    pub fn get_mut(&mut self, id: RobotId) -> Option<&mut RobotRecord> {
        self.robots.get_mut(&id)
    }

    pub fn contains(&self, id: RobotId) -> bool {
        self.robots.contains_key(&id)
    }

    pub fn remove(&mut self, id: RobotId) -> Option<RobotRecord> {
        self.robots.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.robots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.robots.is_empty()
    }

    /// Total ids handed out so far.
    pub fn registered_total(&self) -> usize {
        (self.next_id.0 - RobotId::FIRST.0) as usize
    }

    /// A robot other than `except` standing on `cell`, lowest id first.
    pub fn occupant_of(&self, cell: Coordinates, except: RobotId) -> Option<RobotId> {
        self.robots
            .values()
            .find(|r| r.id != except && r.position == cell)
            .map(|r| r.id)
    }

    /// `(id, position)` of every live robot, ordered by id.
    pub fn positions(&self) -> Vec<(RobotId, Coordinates)> {
        self.robots.values().map(|r| (r.id, r.position)).collect()
    }

    /// Send `status` to every live robot.  Returns how many were reached.
    pub fn broadcast(&mut self, status: RobotStatus) -> usize {
        let mut reached = 0;
        for record in self.robots.values_mut() {
            record.status = status;
            if record.link.set_state(status) {
                reached += 1;
            }
        }
        reached
    }
}
