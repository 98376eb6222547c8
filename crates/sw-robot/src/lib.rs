//! `sw-robot`: one explorer of the swarm.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`robot`]   | `Robot<P>` state machine                                  |
//! | [`options`] | `RobotOptions` (reservations, collision checks, pacing)   |
//! | [`summary`] | `RobotSummary` returned by `Robot::run`                   |
//! | [`error`]   | `RobotError`, `RobotResult<T>`                            |
//!
//! A robot runs on its own thread and blocks only on its own channels; see
//! `sw-protocol` for the call discipline.

pub mod error;
pub mod options;
pub mod robot;
pub mod summary;


pub use error::{RobotError, RobotResult};
pub use options::RobotOptions;
pub use robot::Robot;
pub use summary::RobotSummary;
