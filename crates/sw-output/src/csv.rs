//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `map_updates.csv`
//! - `run_summary.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::ExplorationWriter;
use crate::{MapUpdateRow, OutputResult, RunSummaryRow};

pub const MAP_UPDATES_FILE: &str = "map_updates.csv";
pub const RUN_SUMMARY_FILE: &str = "run_summary.csv";

pub struct CsvWriter {
    updates:  Writer<File>,
    summary:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open both files and write their headers.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut updates = Writer::from_path(dir.join(MAP_UPDATES_FILE))?;
        updates.write_record(["seq", "robot_id", "x", "y", "previous_status", "new_frontier", "unexplored"])?;

        let mut summary = Writer::from_path(dir.join(RUN_SUMMARY_FILE))?;
        summary.write_record([
            "requests",
            "robots_registered",
            "cells_total",
            "cells_explored",
            "unexplored",
            "elapsed_ms",
            "fully_explored",
        ])?;

        Ok(Self { updates, summary, finished: false })
    }
}

impl ExplorationWriter for CsvWriter {
    fn write_map_update(&mut self, row: &MapUpdateRow) -> OutputResult<()> {
        self.updates.write_record(&[
            row.seq.to_string(),
            row.robot.to_string(),
            row.x.to_string(),
            row.y.to_string(),
            row.previous.code().to_string(),
            row.new_frontier.to_string(),
            row.unexplored.to_string(),
        ])?;
        Ok(())
    }

    fn write_run_summary(&mut self, row: &RunSummaryRow) -> OutputResult<()> {
        self.summary.write_record(&[
            row.requests.to_string(),
            row.robots_registered.to_string(),
            row.cells_total.to_string(),
            row.cells_explored.to_string(),
            row.unexplored.to_string(),
            row.elapsed_ms.to_string(),
            (row.fully_explored() as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.updates.flush()?;
        self.summary.flush()?;
        Ok(())
    }
}
