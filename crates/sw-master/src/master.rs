//! The coordinator actor.
//!
//! # Request loop
//!
//! ```text
//! loop:
//!   req ← inbox.wait()              (blocks while the queue is empty)
//!   seq += 1
//!   AddRobot         → register; mark start cell frontier; start when full
//!   UpdateGlobalMap  → release cell; scan-merge; adjust unexplored count;
//!                      broadcast ShutDown when it reaches zero
//!   ReserveCell      → AlreadyExplored(sub-map) | Denied | Granted
//!   UpdateLocation   → track position
//!   MoveToCell       → claim the cell unless another robot stands there
//!   ShutDown         → deregister, release; finish when nobody is left
//! ```
//!
//! All global state lives here and is touched only by this loop, so the
//! order in which requests are dequeued is the order in which the swarm's
//! knowledge changes.  Two robots racing for one cell are settled by whose
//! `ReserveCell` arrives first.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use sw_core::{Coordinates, RequestSeq, RobotId, SwarmConfig};
use sw_map::{CellStatus, GridMap, WallInfo};
use sw_protocol::{MasterInbox, MasterRequest, ReserveOutcome, RobotLink, RobotStatus};

use crate::observer::{MapUpdate, MasterObserver};
use crate::registry::Registry;
use crate::reservations::ReservationTable;
use crate::{MasterError, MasterResult};

/// Whether the request loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Every registered robot has shut down.
    Finished,
}

/// What the coordinator knew when the run ended.
#[derive(Debug, Clone)]
pub struct MasterReport {
    /// Requests processed.
    pub requests: u64,
    pub robots_registered: usize,
    pub cells_total: usize,
    pub cells_explored: usize,
    /// Frontier cells still in the global map.
    pub unexplored: usize,
    pub elapsed: Duration,
    pub final_map: GridMap,
    /// Where each robot stood when it shut down, ordered by id.
    pub final_positions: Vec<(RobotId, Coordinates)>,
}

impl MasterReport {
    pub fn fully_explored(&self) -> bool {
        self.cells_explored == self.cells_total
    }
}

pub struct RobotMaster {
    swarm_size:       usize,
    collision_checks: bool,
    inbox:            MasterInbox,
    global:           GridMap,
    registry:         Registry,
    reservations:     ReservationTable,
    seq:              RequestSeq,
    /// Frontier cells in `global`; kept equal to `global.frontier_count()`.
    unexplored:       usize,
    started:          bool,
    shutdown_sent:    bool,
    final_positions:  Vec<(RobotId, Coordinates)>,
    started_at:       Instant,
}

impl RobotMaster {
    pub fn new(config: &SwarmConfig, inbox: MasterInbox) -> Self {
        RobotMaster {
            swarm_size: config.swarm_size,
            collision_checks: false,
            inbox,
            global: GridMap::new(config.maze_xsize, config.maze_ysize),
            registry: Registry::new(),
            reservations: ReservationTable::new(),
            seq: RequestSeq::ZERO,
            unexplored: 0,
            started: false,
            shutdown_sent: false,
            final_positions: Vec::new(),
            started_at: Instant::now(),
        }
    }

    /// Refuse reservations of cells another robot is standing on.
    pub fn with_collision_checks(mut self, on: bool) -> Self {
        self.collision_checks = on;
        self
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn global_map(&self) -> &GridMap {
        &self.global
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn reservations(&self) -> &ReservationTable {
        &self.reservations
    }

    pub fn unexplored(&self) -> usize {
        self.unexplored
    }

    pub fn seq(&self) -> RequestSeq {
        self.seq
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    // ── Loop ──────────────────────────────────────────────────────────────

    /// Serve requests until every registered robot has shut down.
    ///
    /// Fails with [`MasterError::Disconnected`] if every robot hangs up
    /// first (a robot thread died without shutting down).
    pub fn run<O: MasterObserver>(&mut self, observer: &mut O) -> MasterResult<MasterReport> {
        self.started_at = Instant::now();
        loop {
            let request = self.inbox.wait().map_err(|_| MasterError::Disconnected)?;
            if self.handle(request, observer) == Flow::Finished {
                break;
            }
        }
        let report = self.report();
        info!(
            requests = report.requests,
            explored = report.cells_explored,
            total = report.cells_total,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "exploration finished"
        );
        observer.on_exploration_finished(&report);
        Ok(report)
    }

    /// Process one request and answer it.
    pub fn handle<O: MasterObserver>(&mut self, request: MasterRequest, observer: &mut O) -> Flow {
        self.seq = self.seq.next();
        debug!(seq = self.seq.0, kind = request.kind(), robot = ?request.robot(), "request");
        if let (Some(robot), Some(phase)) = (request.robot(), phase_of(&request)) {
            if let Some(record) = self.registry.get_mut(robot) {
                record.status = phase;
            }
        }

        match request {
            MasterRequest::AddRobot { position, link, reply } => {
                reply.send(self.add_robot(position, link, observer));
                Flow::Continue
            }
            MasterRequest::UpdateGlobalMap { robot, position, walls, reply } => {
                self.update_global_map(robot, position, walls, observer);
                reply.send(());
                Flow::Continue
            }
            MasterRequest::ReserveCell { robot, target, entry, reply } => {
                let outcome = self.reserve_cell(robot, target, entry);
                observer.on_reservation(self.seq, robot, target, &outcome);
                reply.send(outcome);
                Flow::Continue
            }
            MasterRequest::UpdateLocation { robot, position, reply } => {
                self.update_location(robot, position, observer);
                reply.send(());
                Flow::Continue
            }
            MasterRequest::MoveToCell { robot, target, reply } => {
                reply.send(self.move_to_cell(robot, target, observer));
                Flow::Continue
            }
            MasterRequest::ShutDown { robot, reply } => {
                let flow = self.shut_down(robot, observer);
                reply.send(());
                flow
            }
        }
    }

    // ── Handlers ──────────────────────────────────────────────────────────

    fn add_robot<O: MasterObserver>(
        &mut self,
        position: Coordinates,
        link: RobotLink,
        observer: &mut O,
    ) -> RobotId {
        if !self.global.in_bounds(position) {
            warn!(seq = self.seq.0, %position, "registration outside the maze ignored");
            return RobotId::INVALID;
        }

        let id = self.registry.register(position, link);
        if self.global.mark_frontier(position) {
            self.unexplored += 1;
        }
        info!(seq = self.seq.0, robot = %id, x = position.x, y = position.y, "robot registered");
        observer.on_robot_registered(self.seq, id, position);

        if self.shutdown_sent {
            // Late arrival after the map was finished.
            self.send_state(id, RobotStatus::ShutDown);
        } else if self.started {
            self.send_state(id, RobotStatus::ScanCell);
        } else if self.registry.len() >= self.swarm_size {
            self.started = true;
            let reached = self.registry.broadcast(RobotStatus::ScanCell);
            info!(seq = self.seq.0, robots = reached, "exploration started");
            observer.on_exploration_started(self.seq, reached);
        }
        id
    }

    fn update_global_map<O: MasterObserver>(
        &mut self,
        robot: RobotId,
        position: Coordinates,
        walls: WallInfo,
        observer: &mut O,
    ) {
        let Some(record) = self.registry.get_mut(robot) else {
            warn!(seq = self.seq.0, %robot, "map update from unknown robot ignored");
            return;
        };
        let outcome = match self.global.scan_merge(position, walls) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(seq = self.seq.0, %robot, error = %e, "map update rejected");
                return;
            }
        };
        record.position = position;
        self.reservations.release_cell(position);

        if outcome.previous == CellStatus::Frontier {
            self.unexplored = self.unexplored.saturating_sub(1);
        }
        self.unexplored += outcome.new_frontier as usize;
        debug_assert_eq!(self.unexplored, self.global.frontier_count());

        debug!(
            seq = self.seq.0,
            %robot,
            x = position.x,
            y = position.y,
            new_frontier = outcome.new_frontier,
            unexplored = self.unexplored,
            "map updated"
        );
        let update = MapUpdate {
            seq: self.seq,
            robot,
            position,
            previous: outcome.previous,
            new_frontier: outcome.new_frontier,
            unexplored: self.unexplored,
        };
        observer.on_map_update(&update, &self.global, &self.registry.positions());

        if self.unexplored == 0 && self.started && !self.shutdown_sent {
            self.shutdown_sent = true;
            let reached = self.registry.broadcast(RobotStatus::ShutDown);
            info!(seq = self.seq.0, robots = reached, "map complete, shutting swarm down");
        }
    }

    fn reserve_cell(&mut self, robot: RobotId, target: Coordinates, entry: Coordinates) -> ReserveOutcome {
        if !self.registry.contains(robot) {
            warn!(seq = self.seq.0, %robot, "reservation from unknown robot refused");
            return ReserveOutcome::Denied { holder: None };
        }
        if !self.global.in_bounds(target) {
            warn!(seq = self.seq.0, %robot, %target, "reservation outside the maze refused");
            return ReserveOutcome::Denied { holder: None };
        }

        let outcome = if self.global.status(target) == CellStatus::Explored {
            ReserveOutcome::AlreadyExplored(self.global.extract_submap(target, entry))
        } else if let Some(holder) = self.reservations.holder(target).filter(|&h| h != robot) {
            ReserveOutcome::Denied { holder: Some(holder) }
        } else if let Some(occupant) = self
            .registry
            .occupant_of(target, robot)
            .filter(|_| self.collision_checks)
        {
            ReserveOutcome::Denied { holder: Some(occupant) }
        } else {
            if let Some(previous) = self.reservations.reserve(target, robot) {
                debug!(seq = self.seq.0, %robot, %previous, "previous reservation released");
            }
            ReserveOutcome::Granted
        };
        debug!(seq = self.seq.0, %robot, %target, outcome = outcome.as_str(), "reservation");
        outcome
    }

    fn update_location<O: MasterObserver>(&mut self, robot: RobotId, position: Coordinates, observer: &mut O) {
        match self.registry.get_mut(robot) {
            // A granted `MoveToCell` has already claimed the cell.
            Some(record) if record.position == position => {}
            Some(record) => {
                record.position = position;
                observer.on_robot_moved(self.seq, robot, position);
            }
            None => warn!(seq = self.seq.0, %robot, "location from unknown robot ignored"),
        }
    }

    /// Check and claim in one step: a granted move puts the robot on
    /// `target` at once, so no later check can hand the same cell out.
    fn move_to_cell<O: MasterObserver>(&mut self, robot: RobotId, target: Coordinates, observer: &mut O) -> bool {
        if !self.registry.contains(robot) {
            warn!(seq = self.seq.0, %robot, "move check from unknown robot refused");
            return false;
        }
        if let Some(occupant) = self.registry.occupant_of(target, robot) {
            debug!(seq = self.seq.0, %robot, %target, %occupant, "move blocked");
            return false;
        }
        if let Some(record) = self.registry.get_mut(robot) {
            if record.position != target {
                record.position = target;
                observer.on_robot_moved(self.seq, robot, target);
            }
        }
        true
    }

    fn shut_down<O: MasterObserver>(&mut self, robot: RobotId, observer: &mut O) -> Flow {
        let Some(record) = self.registry.remove(robot) else {
            warn!(seq = self.seq.0, %robot, "shutdown from unknown robot ignored");
            return Flow::Continue;
        };
        self.reservations.release_robot(robot);
        self.final_positions.push((robot, record.position));
        let remaining = self.registry.len();
        info!(seq = self.seq.0, %robot, remaining, "robot shut down");
        observer.on_robot_shutdown(self.seq, robot, remaining);

        if remaining == 0 && self.registry.registered_total() >= self.swarm_size {
            Flow::Finished
        } else {
            Flow::Continue
        }
    }

    fn send_state(&mut self, robot: RobotId, status: RobotStatus) {
        if let Some(record) = self.registry.get_mut(robot) {
            record.status = status;
            record.link.set_state(status);
        }
    }

    fn report(&self) -> MasterReport {
        let mut final_positions = self.final_positions.clone();
        final_positions.sort_by_key(|&(id, _)| id);
        MasterReport {
            requests: self.seq.0,
            robots_registered: self.registry.registered_total(),
            cells_total: self.global.cell_count(),
            cells_explored: self.global.explored_count(),
            unexplored: self.unexplored,
            elapsed: self.started_at.elapsed(),
            final_map: self.global.clone(),
            final_positions,
        }
    }
}

/// The phase a robot must be in to send `request`.  Registration has none.
fn phase_of(request: &MasterRequest) -> Option<RobotStatus> {
    match request {
        MasterRequest::AddRobot { .. } => None,
        MasterRequest::UpdateGlobalMap { .. } => Some(RobotStatus::ScanCell),
        MasterRequest::ReserveCell { .. } => Some(RobotStatus::PathFind),
        MasterRequest::UpdateLocation { .. } | MasterRequest::MoveToCell { .. } => Some(RobotStatus::MoveRobot),
        MasterRequest::ShutDown { .. } => Some(RobotStatus::ShutDown),
    }
}
