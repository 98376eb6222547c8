//! The explorer state machine.
//!
//! A robot owns everything it knows: its local map, its current plan, and
//! the set of frontier cells it has been told to keep away from.  The only
//! shared state it touches is the read-only ground-truth maze, and only
//! while scanning.  Everything else goes through the coordinator.
//!
//! # One step per state
//!
//! [`Robot::step`] performs exactly one state's work and picks the next
//! state.  [`Robot::run`] loops `step` until `ExitLoop`.  Before every step
//! outside `StandBy` the robot drains its inbox, so a `ShutDown` broadcast
//! pre-empts whatever it was about to do.

use std::collections::{BTreeSet, VecDeque};
use std::sync::Arc;
use std::thread;

use tracing::{debug, info, warn};

use sw_core::{Coordinates, RobotId};
use sw_map::{BfsPathfinder, CellStatus, GridMap, Maze, Pathfinder};
use sw_protocol::{
    robot_channel, MasterHandle, ReserveOutcome, RobotCommand, RobotInbox, RobotLink, RobotStatus,
};

use crate::{RobotError, RobotOptions, RobotResult, RobotSummary};

/// Consecutive blocked moves after which the robot gives up on its target.
const MAX_BLOCKED_MOVES: u32 = 8;

pub struct Robot<P: Pathfinder = BfsPathfinder> {
    id:         RobotId,
    status:     RobotStatus,
    position:   Coordinates,
    local:      GridMap,
    maze:       Arc<Maze>,
    master:     MasterHandle,
    inbox:      RobotInbox,
    /// Handed to the coordinator on registration.
    link:       Option<RobotLink>,
    pathfinder: P,
    options:    RobotOptions,
    /// Remaining steps of the current plan, next step first.
    plan:       VecDeque<Coordinates>,
    /// Goal of the current plan.
    target:     Option<Coordinates>,
    /// Frontier cells never to pick as a goal again.
    exclude:    BTreeSet<Coordinates>,
    blocked_in_a_row: u32,
    summary:    RobotSummary,
}

impl Robot<BfsPathfinder> {
    pub fn new(maze: Arc<Maze>, start: Coordinates, master: MasterHandle, options: RobotOptions) -> Self {
        Robot::with_pathfinder(maze, start, master, options, BfsPathfinder)
    }
}

impl<P: Pathfinder> Robot<P> {
    pub fn with_pathfinder(
        maze: Arc<Maze>,
        start: Coordinates,
        master: MasterHandle,
        options: RobotOptions,
        pathfinder: P,
    ) -> Self {
        let (link, inbox) = robot_channel();
        let local = GridMap::new(maze.xsize(), maze.ysize());
        Robot {
            id: RobotId::INVALID,
            status: RobotStatus::StandBy,
            position: start,
            local,
            maze,
            master,
            inbox,
            link: Some(link),
            pathfinder,
            options,
            plan: VecDeque::new(),
            target: None,
            exclude: BTreeSet::new(),
            blocked_in_a_row: 0,
            summary: RobotSummary { final_position: start, ..RobotSummary::default() },
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn id(&self) -> RobotId {
        self.id
    }

    pub fn status(&self) -> RobotStatus {
        self.status
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    pub fn local_map(&self) -> &GridMap {
        &self.local
    }

    pub fn options(&self) -> RobotOptions {
        self.options
    }

    pub fn summary(&self) -> &RobotSummary {
        &self.summary
    }

    /// Remaining steps of the current plan.
    pub fn plan(&self) -> impl Iterator<Item = &Coordinates> {
        self.plan.iter()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Announce this robot to the coordinator and receive its id.
    pub fn register(&mut self) -> RobotResult<RobotId> {
        let link = self.link.take().ok_or(RobotError::AlreadyRegistered(self.id))?;
        self.id = self.master.add_robot(self.position, link)?;
        self.summary.id = self.id;
        info!(robot = %self.id, x = self.position.x, y = self.position.y, "registered");
        Ok(self.id)
    }

    /// Register if needed, then step until the coordinator confirms shutdown.
    pub fn run(mut self) -> RobotResult<RobotSummary> {
        if !self.id.is_valid() {
            self.register()?;
        }
        while self.status != RobotStatus::ExitLoop {
            self.step()?;
        }
        info!(
            robot = %self.id,
            scanned = self.summary.cells_scanned,
            moves = self.summary.moves,
            "exited"
        );
        Ok(self.summary)
    }

    /// Do one state's work and return the state the robot is in afterwards.
    pub fn step(&mut self) -> RobotResult<RobotStatus> {
        if !self.id.is_valid() {
            return Err(RobotError::NotRegistered);
        }
        if self.status != RobotStatus::StandBy && !self.status.is_terminal() {
            self.drain_inbox();
        }

        let before = self.status;
        match self.status {
            RobotStatus::StandBy   => self.stand_by()?,
            RobotStatus::ScanCell  => self.scan_cell()?,
            RobotStatus::PathFind  => self.path_find()?,
            RobotStatus::MoveRobot => self.move_robot()?,
            RobotStatus::ShutDown  => self.shut_down()?,
            RobotStatus::ExitLoop  => {}
        }
        if self.status != before {
            debug!(robot = %self.id, from = %before, to = %self.status, "transition");
        }
        Ok(self.status)
    }

    // ── Commands ──────────────────────────────────────────────────────────

    fn drain_inbox(&mut self) {
        while let Some(cmd) = self.inbox.poll() {
            self.apply_command(cmd);
        }
    }

    fn apply_command(&mut self, cmd: RobotCommand) {
        let RobotCommand::SetState(status) = cmd;
        match status {
            RobotStatus::ShutDown | RobotStatus::ExitLoop => {
                if !self.status.is_terminal() {
                    debug!(robot = %self.id, "shutdown received");
                    self.status = RobotStatus::ShutDown;
                }
            }
            // Start broadcast: only meaningful while waiting for it.
            other if self.status == RobotStatus::StandBy => self.status = other,
            _ => {}
        }
    }

    // ── States ────────────────────────────────────────────────────────────

    fn stand_by(&mut self) -> RobotResult<()> {
        let cmd = self.inbox.wait()?;
        self.apply_command(cmd);
        Ok(())
    }

    fn scan_cell(&mut self) -> RobotResult<()> {
        let walls = self.maze.walls_at(self.position);
        let outcome = self.local.scan_merge(self.position, walls)?;
        if outcome.newly_explored() {
            self.summary.cells_scanned += 1;
        }
        self.master.update_global_map(self.id, self.position, walls)?;
        self.status = RobotStatus::PathFind;
        Ok(())
    }

    fn path_find(&mut self) -> RobotResult<()> {
        let found = self.pathfinder.path_to_frontier(&self.local, self.position, &self.exclude)?;
        let Some(path) = found else {
            debug!(robot = %self.id, excluded = self.exclude.len(), "no reachable frontier");
            self.status = RobotStatus::ShutDown;
            return Ok(());
        };
        let target = path.target();

        if !self.options.reservations {
            self.start_plan(target, path.into_steps());
            return Ok(());
        }

        match self.master.reserve_cell(self.id, target, path.entry())? {
            ReserveOutcome::Granted => {
                self.summary.reservations_granted += 1;
                self.start_plan(target, path.into_steps());
            }
            ReserveOutcome::AlreadyExplored(sub) => {
                self.summary.submaps_merged += 1;
                let gained = self.local.merge_submap(&sub);
                debug!(robot = %self.id, %target, cells = sub.len(), gained, "merged sub-map");
                if self.local.status(target) != CellStatus::Explored {
                    self.exclude.insert(target);
                }
            }
            ReserveOutcome::Denied { holder } => {
                self.summary.reservations_denied += 1;
                debug!(robot = %self.id, %target, ?holder, "reservation denied");
                self.exclude.insert(target);
            }
        }
        Ok(())
    }

    fn start_plan(&mut self, target: Coordinates, steps: Vec<Coordinates>) {
        self.plan = steps.into();
        self.target = Some(target);
        self.status = if self.plan.is_empty() { RobotStatus::ScanCell } else { RobotStatus::MoveRobot };
    }

    fn move_robot(&mut self) -> RobotResult<()> {
        let Some(next) = self.plan.front().copied() else {
            self.status = RobotStatus::ScanCell;
            return Ok(());
        };
        if let Some(delay) = self.options.step_delay {
            thread::sleep(delay);
        }

        if self.try_step(next)? {
            self.plan.pop_front();
            self.blocked_in_a_row = 0;
            self.status = if self.plan.is_empty() { RobotStatus::ScanCell } else { RobotStatus::MoveRobot };
        } else {
            self.plan.clear();
            self.blocked_in_a_row += 1;
            if self.blocked_in_a_row >= MAX_BLOCKED_MOVES {
                if let Some(target) = self.target.take() {
                    warn!(robot = %self.id, %target, "giving up on blocked target");
                    self.exclude.insert(target);
                }
                self.blocked_in_a_row = 0;
            }
            self.status = RobotStatus::PathFind;
        }
        Ok(())
    }

    /// Move one cell to `next` if the local map shows no wall and, with
    /// collision checks on, the coordinator says the cell is free.
    pub(crate) fn try_step(&mut self, next: Coordinates) -> RobotResult<bool> {
        let open = self
            .position
            .direction_to(next)
            .is_some_and(|dir| !self.local.wall(self.position, dir));
        if !open {
            warn!(robot = %self.id, from = %self.position, to = %next, "step blocked by wall");
            self.summary.moves_blocked += 1;
            return Ok(false);
        }
        if self.options.collision_checks && !self.master.move_to_cell(self.id, next)? {
            debug!(robot = %self.id, to = %next, "step blocked by robot");
            self.summary.moves_blocked += 1;
            return Ok(false);
        }

        self.position = next;
        self.summary.moves += 1;
        self.summary.final_position = next;
        self.master.update_location(self.id, next)?;
        Ok(true)
    }

    fn shut_down(&mut self) -> RobotResult<()> {
        self.master.shut_down(self.id)?;
        self.plan.clear();
        self.status = RobotStatus::ExitLoop;
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn register_for_test(&mut self, id: RobotId) {
        self.link = None;
        self.id = id;
        self.summary.id = id;
    }

    /// Scan the current cell into the local map without telling anyone.
    #[cfg(test)]
    pub(crate) fn scan_for_test(&mut self) {
        let walls = self.maze.walls_at(self.position);
        let _ = self.local.scan_merge(self.position, walls);
    }
}
