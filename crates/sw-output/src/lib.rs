//! `sw-output`: exploration logs written while a swarm runs.
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`row`]      | `MapUpdateRow`, `RunSummaryRow`                           |
//! | [`writer`]   | the `ExplorationWriter` trait                             |
//! | [`csv`]      | `CsvWriter`: `map_updates.csv`, `run_summary.csv`         |
//! | [`observer`] | `OutputObserver<W>`, the `MasterObserver` bridge          |
//! | [`error`]    | `OutputError`, `OutputResult<T>`                          |
//!
//! # Usage
//!
//! ```rust,ignore
//! use sw_output::{CsvWriter, OutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = OutputObserver::new(writer);
//! let report = swarm.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::OutputObserver;
pub use row::{MapUpdateRow, RunSummaryRow};
pub use writer::ExplorationWriter;
