//! Coordinator observer trait for progress reporting and data collection.

use tracing::info;

use sw_core::{Coordinates, RequestSeq, RobotId};
use sw_map::{render, CellStatus, GridMap};
use sw_protocol::ReserveOutcome;

use crate::MasterReport;

/// One processed scan report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapUpdate {
    pub seq:          RequestSeq,
    pub robot:        RobotId,
    pub position:     Coordinates,
    /// Global status of `position` before the scan was merged.
    pub previous:     CellStatus,
    pub new_frontier: u32,
    /// Frontier cells left in the global map after the merge.
    pub unexplored:   usize,
}

/// Callbacks invoked by [`RobotMaster::run`][crate::RobotMaster::run] as it
/// processes requests.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Callbacks run on the coordinator's
/// thread between requests; a slow observer slows the whole swarm.
///
/// # Example: scan counter
///
/// ```rust,ignore
/// struct ScanCounter(usize);
///
/// impl MasterObserver for ScanCounter {
///     fn on_map_update(&mut self, _: &MapUpdate, _: &GridMap, _: &[(RobotId, Coordinates)]) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait MasterObserver {
    fn on_robot_registered(&mut self, _seq: RequestSeq, _robot: RobotId, _position: Coordinates) {}

    /// The last expected robot registered and `ScanCell` was broadcast.
    fn on_exploration_started(&mut self, _seq: RequestSeq, _robots: usize) {}

    /// A scan report was merged into `map`.  `robots` holds every live
    /// robot's tracked position.
    fn on_map_update(
        &mut self,
        _update: &MapUpdate,
        _map:    &GridMap,
        _robots: &[(RobotId, Coordinates)],
    ) {}

    fn on_reservation(
        &mut self,
        _seq:     RequestSeq,
        _robot:   RobotId,
        _target:  Coordinates,
        _outcome: &ReserveOutcome,
    ) {}

    /// `robot`'s tracked cell changed to `position`.  With collision checks
    /// this fires when the move is granted, before the robot reports it.
    fn on_robot_moved(&mut self, _seq: RequestSeq, _robot: RobotId, _position: Coordinates) {}

    /// `robot` left; `remaining` robots are still registered.
    fn on_robot_shutdown(&mut self, _seq: RequestSeq, _robot: RobotId, _remaining: usize) {}

    /// Called once when the last robot has left.
    fn on_exploration_finished(&mut self, _report: &MasterReport) {}
}

/// A [`MasterObserver`] that does nothing.
pub struct NoopObserver;

impl MasterObserver for NoopObserver {}

/// Logs the rendered global map at `info` level after every merged scan and
/// once more at the end of the run.
#[derive(Debug, Default)]
pub struct RenderObserver;

impl MasterObserver for RenderObserver {
    fn on_map_update(&mut self, update: &MapUpdate, map: &GridMap, robots: &[(RobotId, Coordinates)]) {
        info!(
            seq = update.seq.0,
            robot = %update.robot,
            unexplored = update.unexplored,
            "global map\n{}",
            render(map, robots)
        );
    }

    fn on_exploration_finished(&mut self, report: &MasterReport) {
        info!("final map\n{}", render(&report.final_map, &report.final_positions));
    }
}

/// An absent observer is a no-op.
impl<O: MasterObserver> MasterObserver for Option<O> {
    fn on_robot_registered(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        if let Some(o) = self {
            o.on_robot_registered(seq, robot, position);
        }
    }

    fn on_exploration_started(&mut self, seq: RequestSeq, robots: usize) {
        if let Some(o) = self {
            o.on_exploration_started(seq, robots);
        }
    }

    fn on_map_update(&mut self, update: &MapUpdate, map: &GridMap, robots: &[(RobotId, Coordinates)]) {
        if let Some(o) = self {
            o.on_map_update(update, map, robots);
        }
    }

    fn on_reservation(
        &mut self,
        seq: RequestSeq,
        robot: RobotId,
        target: Coordinates,
        outcome: &ReserveOutcome,
    ) {
        if let Some(o) = self {
            o.on_reservation(seq, robot, target, outcome);
        }
    }

    fn on_robot_moved(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        if let Some(o) = self {
            o.on_robot_moved(seq, robot, position);
        }
    }

    fn on_robot_shutdown(&mut self, seq: RequestSeq, robot: RobotId, remaining: usize) {
        if let Some(o) = self {
            o.on_robot_shutdown(seq, robot, remaining);
        }
    }

    fn on_exploration_finished(&mut self, report: &MasterReport) {
        if let Some(o) = self {
            o.on_exploration_finished(report);
        }
    }
}

/// Both observers see every event, the first one first.
impl<A: MasterObserver, B: MasterObserver> MasterObserver for (A, B) {
    fn on_robot_registered(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        self.0.on_robot_registered(seq, robot, position);
        self.1.on_robot_registered(seq, robot, position);
    }

    fn on_exploration_started(&mut self, seq: RequestSeq, robots: usize) {
        self.0.on_exploration_started(seq, robots);
        self.1.on_exploration_started(seq, robots);
    }

    fn on_map_update(&mut self, update: &MapUpdate, map: &GridMap, robots: &[(RobotId, Coordinates)]) {
        self.0.on_map_update(update, map, robots);
        self.1.on_map_update(update, map, robots);
    }

    fn on_reservation(
        &mut self,
        seq: RequestSeq,
        robot: RobotId,
        target: Coordinates,
        outcome: &ReserveOutcome,
    ) {
        self.0.on_reservation(seq, robot, target, outcome);
        self.1.on_reservation(seq, robot, target, outcome);
    }

    fn on_robot_moved(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        self.0.on_robot_moved(seq, robot, position);
        self.1.on_robot_moved(seq, robot, position);
    }

    fn on_robot_shutdown(&mut self, seq: RequestSeq, robot: RobotId, remaining: usize) {
        self.0.on_robot_shutdown(seq, robot, remaining);
        self.1.on_robot_shutdown(seq, robot, remaining);
    }

    fn on_exploration_finished(&mut self, report: &MasterReport) {
        self.0.on_exploration_finished(report);
        self.1.on_exploration_finished(report);
    }
}

impl<O: MasterObserver + ?Sized> MasterObserver for &mut O {
    fn on_robot_registered(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        (**self).on_robot_registered(seq, robot, position);
    }

    fn on_exploration_started(&mut self, seq: RequestSeq, robots: usize) {
        (**self).on_exploration_started(seq, robots);
    }

    fn on_map_update(&mut self, update: &MapUpdate, map: &GridMap, robots: &[(RobotId, Coordinates)]) {
        (**self).on_map_update(update, map, robots);
    }

    fn on_reservation(
        &mut self,
        seq: RequestSeq,
        robot: RobotId,
        target: Coordinates,
        outcome: &ReserveOutcome,
    ) {
        (**self).on_reservation(seq, robot, target, outcome);
    }

    fn on_robot_moved(&mut self, seq: RequestSeq, robot: RobotId, position: Coordinates) {
        (**self).on_robot_moved(seq, robot, position);
    }

    fn on_robot_shutdown(&mut self, seq: RequestSeq, robot: RobotId, remaining: usize) {
        (**self).on_robot_shutdown(seq, robot, remaining);
    }

    fn on_exploration_finished(&mut self, report: &MasterReport) {
        (**self).on_exploration_finished(report);
    }
}
