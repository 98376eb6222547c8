//! `OutputObserver<W>`: bridges `MasterObserver` to an `ExplorationWriter`.

use tracing::warn;

use sw_core::{Coordinates, RobotId};
use sw_map::GridMap;
use sw_master::{MapUpdate, MasterObserver, MasterReport};

use crate::row::{MapUpdateRow, RunSummaryRow};
use crate::writer::ExplorationWriter;
use crate::{OutputError, OutputResult};

/// A [`MasterObserver`] that logs every map update and the final totals to
/// any [`ExplorationWriter`].
///
/// Observer hooks cannot fail, so write errors are kept here.  After the run
/// returns, check with [`take_error`][Self::take_error].
pub struct OutputObserver<W: ExplorationWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: ExplorationWriter> OutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// The first write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Map update rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                warn!(error = %e, "exploration output failed; further errors are dropped");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: ExplorationWriter> MasterObserver for OutputObserver<W> {
    fn on_map_update(&mut self, update: &MapUpdate, _map: &GridMap, _robots: &[(RobotId, Coordinates)]) {
        let row = MapUpdateRow {
            seq:          update.seq.0,
            robot:        update.robot.0,
            x:            update.position.x,
            y:            update.position.y,
            previous:     update.previous,
            new_frontier: update.new_frontier,
            unexplored:   update.unexplored,
        };
        let result = self.writer.write_map_update(&row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_exploration_finished(&mut self, report: &MasterReport) {
        let row = RunSummaryRow {
            requests:          report.requests,
            robots_registered: report.robots_registered,
            cells_total:       report.cells_total,
            cells_explored:    report.cells_explored,
            unexplored:        report.unexplored,
            elapsed_ms:        report.elapsed.as_millis() as u64,
        };
        let result = self.writer.write_run_summary(&row);
        self.store_err(result);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
