//! Robot → coordinator requests.
//!
//! Each request is an owned value moved into the coordinator's queue.  It
//! carries a [`Reply`] for its typed answer; the coordinator consumes the
//! request, answers exactly once, and drops it.

use crossbeam_channel::{Receiver, Sender};

use sw_core::{Coordinates, RobotId};
use sw_map::{SubMap, WallInfo};

use crate::channel::RobotLink;

// ── Reply ─────────────────────────────────────────────────────────────────────

/// One-shot answer slot held by the coordinator.
///
/// Sending consumes the slot, so a request can never be answered twice.
pub struct Reply<T>(Sender<T>);

impl<T> Reply<T> {
    /// Answer the request.  If the requester is gone the answer is dropped.
    pub fn send(self, value: T) {
        let _ = self.0.send(value);
    }
}

impl<T> std::fmt::Debug for Reply<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Reply(..)")
    }
}

/// A fresh reply slot and the receiver the requester blocks on.
///
/// [`MasterHandle`](crate::MasterHandle) uses this for every call; it is
/// public so a coordinator can be driven request by request without robot
/// threads.
pub fn reply_channel<T>() -> (Reply<T>, Receiver<T>) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    (Reply(tx), rx)
}

// ── ReserveOutcome ────────────────────────────────────────────────────────────

/// Answer to [`MasterRequest::ReserveCell`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// The cell is now held by the requester.
    Granted,
    /// Someone else holds the cell (or is standing on it).  `holder` is
    /// `None` when no specific robot is responsible.
    Denied { holder: Option<RobotId> },
    /// The cell has been explored already; here is what the coordinator
    /// knows around it.
    AlreadyExplored(SubMap),
}

impl ReserveOutcome {
    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, ReserveOutcome::Granted)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReserveOutcome::Granted            => "granted",
            ReserveOutcome::Denied { .. }      => "denied",
            ReserveOutcome::AlreadyExplored(_) => "already_explored",
        }
    }
}

// ── MasterRequest ─────────────────────────────────────────────────────────────

/// Everything a robot can ask the coordinator.
#[derive(Debug)]
pub enum MasterRequest {
    /// Register a robot standing on `position`.  `link` is where the
    /// coordinator sends state changes for it.
    AddRobot {
        position: Coordinates,
        link:     RobotLink,
        reply:    Reply<RobotId>,
    },
    /// `robot` scanned `position` and saw `walls`.
    UpdateGlobalMap {
        robot:    RobotId,
        position: Coordinates,
        walls:    WallInfo,
        reply:    Reply<()>,
    },
    /// `robot` wants to explore `target`, arriving from `entry`.
    ReserveCell {
        robot:  RobotId,
        target: Coordinates,
        entry:  Coordinates,
        reply:  Reply<ReserveOutcome>,
    },
    /// `robot` is now standing on `position`.
    UpdateLocation {
        robot:    RobotId,
        position: Coordinates,
        reply:    Reply<()>,
    },
    /// May `robot` step onto `target` without colliding?
    MoveToCell {
        robot:  RobotId,
        target: Coordinates,
        reply:  Reply<bool>,
    },
    /// `robot` is leaving the run.
    ShutDown {
        robot: RobotId,
        reply: Reply<()>,
    },
}

impl MasterRequest {
    /// Short name used in log lines and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            MasterRequest::AddRobot { .. }        => "add_robot",
            MasterRequest::UpdateGlobalMap { .. } => "update_global_map",
            MasterRequest::ReserveCell { .. }     => "reserve_cell",
            MasterRequest::UpdateLocation { .. }  => "update_location",
            MasterRequest::MoveToCell { .. }      => "move_to_cell",
            MasterRequest::ShutDown { .. }        => "shut_down",
        }
    }

    /// The sender, or `None` for a registration that has no id yet.
    pub fn robot(&self) -> Option<RobotId> {
        match self {
            MasterRequest::AddRobot { .. } => None,
            MasterRequest::UpdateGlobalMap { robot, .. }
            | MasterRequest::ReserveCell { robot, .. }
            | MasterRequest::UpdateLocation { robot, .. }
            | MasterRequest::MoveToCell { robot, .. }
            | MasterRequest::ShutDown { robot, .. } => Some(*robot),
        }
    }
}
