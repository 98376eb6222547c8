//! `sw-master`: the coordinator and the swarm launcher.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`master`]       | `RobotMaster` request loop, `MasterReport`, `Flow`        |
//! | [`registry`]     | `Registry`, `RobotRecord`                                 |
//! | [`reservations`] | `ReservationTable`                                        |
//! | [`observer`]     | `MasterObserver`, `NoopObserver`, `RenderObserver`        |
//! | [`builder`]      | `SwarmBuilder`, `Swarm`, `SwarmReport`                    |
//! | [`error`]        | `MasterError`, `MasterResult<T>`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use sw_core::SwarmConfig;
//! use sw_master::{NoopObserver, SwarmBuilder};
//!
//! let config = SwarmConfig { maze_xsize: 8, maze_ysize: 8, swarm_size: 3, ..Default::default() };
//! let report = SwarmBuilder::new(config).build()?.run(&mut NoopObserver)?;
//! println!("{}", report.master.final_map);
//! ```

pub mod builder;
pub mod error;
pub mod master;
pub mod observer;
pub mod registry;
pub mod reservations;


pub use builder::{Swarm, SwarmBuilder, SwarmReport};
pub use error::{MasterError, MasterResult};
pub use master::{Flow, MasterReport, RobotMaster};
pub use observer::{MapUpdate, MasterObserver, NoopObserver, RenderObserver};
pub use registry::{Registry, RobotRecord};
pub use reservations::ReservationTable;
