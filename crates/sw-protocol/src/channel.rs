//! Channel endpoints.
//!
//! ```text
//!            MasterHandle (one clone per robot)
//! Robot ───────────────────────────────────────▶ MasterInbox ── RobotMaster
//!   ▲          request + Reply<T>                                   │
//!   │                                                               │
//!   └──── RobotInbox ◀──────────────────── RobotLink ◀──────────────┘
//!                        RobotCommand (fire-and-forget)
//! ```
//!
//! All queues are unbounded FIFO `crossbeam-channel`s, so sends never block.
//! The only blocking points are a robot waiting for its reply, a robot
//! waiting in `StandBy`, and the coordinator waiting for the next request.

use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, TryRecvError};

use sw_core::{Coordinates, RobotId};
use sw_map::WallInfo;

use crate::request::{reply_channel, MasterRequest, Reply, ReserveOutcome};
use crate::status::{RobotCommand, RobotStatus};
use crate::{ProtocolError, ProtocolResult};

/// Create the coordinator's request queue.
pub fn master_channel() -> (MasterHandle, MasterInbox) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (MasterHandle { tx, timeout: None }, MasterInbox { rx })
}

/// Create one robot's command queue.
pub fn robot_channel() -> (RobotLink, RobotInbox) {
    let (tx, rx) = crossbeam_channel::unbounded();
    (RobotLink { tx }, RobotInbox { rx })
}

// ── MasterHandle ──────────────────────────────────────────────────────────────

/// Robot-side sender of [`MasterRequest`]s.
///
/// Every method sends one request and blocks until its reply arrives, the
/// coordinator disappears, or the optional timeout expires.
#[derive(Clone, Debug)]
pub struct MasterHandle {
    tx:      Sender<MasterRequest>,
    timeout: Option<Duration>,
}

impl MasterHandle {
    /// Bound every wait for a reply.  `None` waits indefinitely.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn add_robot(&self, position: Coordinates, link: RobotLink) -> ProtocolResult<RobotId> {
        self.call(|reply| MasterRequest::AddRobot { position, link, reply })
    }

    pub fn update_global_map(
        &self,
        robot: RobotId,
        position: Coordinates,
        walls: WallInfo,
    ) -> ProtocolResult<()> {
        self.call(|reply| MasterRequest::UpdateGlobalMap { robot, position, walls, reply })
    }

    pub fn reserve_cell(
        &self,
        robot: RobotId,
        target: Coordinates,
        entry: Coordinates,
    ) -> ProtocolResult<ReserveOutcome> {
        self.call(|reply| MasterRequest::ReserveCell { robot, target, entry, reply })
    }

    pub fn update_location(&self, robot: RobotId, position: Coordinates) -> ProtocolResult<()> {
        self.call(|reply| MasterRequest::UpdateLocation { robot, position, reply })
    }

    pub fn move_to_cell(&self, robot: RobotId, target: Coordinates) -> ProtocolResult<bool> {
        self.call(|reply| MasterRequest::MoveToCell { robot, target, reply })
    }

    pub fn shut_down(&self, robot: RobotId) -> ProtocolResult<()> {
        self.call(|reply| MasterRequest::ShutDown { robot, reply })
    }

    fn call<T>(&self, make: impl FnOnce(Reply<T>) -> MasterRequest) -> ProtocolResult<T> {
        let (reply, rx) = reply_channel();
        let request = make(reply);
        let kind = request.kind();
        self.tx
            .send(request)
            .map_err(|_| ProtocolError::Disconnected { request: kind })?;

        match self.timeout {
            None => rx.recv().map_err(|_| ProtocolError::Disconnected { request: kind }),
            Some(timeout) => rx.recv_timeout(timeout).map_err(|e| match e {
                RecvTimeoutError::Timeout => ProtocolError::Timeout { request: kind, timeout },
                RecvTimeoutError::Disconnected => ProtocolError::Disconnected { request: kind },
            }),
        }
    }
}

// ── MasterInbox ───────────────────────────────────────────────────────────────

/// Coordinator-side receiver.
#[derive(Debug)]
pub struct MasterInbox {
    rx: Receiver<MasterRequest>,
}

impl MasterInbox {
    /// Block until the next request.  Fails once every [`MasterHandle`] has
    /// been dropped and the queue is empty.
    pub fn wait(&self) -> ProtocolResult<MasterRequest> {
        self.rx.recv().map_err(|_| ProtocolError::Disconnected { request: "wait" })
    }

    /// The next request, if one is already queued.
    pub fn poll(&self) -> Option<MasterRequest> {
        self.rx.try_recv().ok()
    }

    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

// ── RobotLink / RobotInbox ────────────────────────────────────────────────────

/// Coordinator-side sender of [`RobotCommand`]s to one robot.
#[derive(Clone, Debug)]
pub struct RobotLink {
    tx: Sender<RobotCommand>,
}

impl RobotLink {
    /// Queue a state change.  Never blocks; returns `false` if the robot has
    /// already dropped its inbox.
    pub fn set_state(&self, status: RobotStatus) -> bool {
        self.tx.send(RobotCommand::SetState(status)).is_ok()
    }
}

/// Robot-side receiver.
#[derive(Debug)]
pub struct RobotInbox {
    rx: Receiver<RobotCommand>,
}

impl RobotInbox {
    /// Block until the coordinator sends a command.
    pub fn wait(&self) -> ProtocolResult<RobotCommand> {
        self.rx.recv().map_err(|_| ProtocolError::Disconnected { request: "wait" })
    }

    /// A queued command, if any.  A disconnected coordinator reads as empty;
    /// the next blocking request will report it.
    pub fn poll(&self) -> Option<RobotCommand> {
        match self.rx.try_recv() {
            Ok(cmd) => Some(cmd),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }
}
