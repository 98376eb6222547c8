//! `sw-protocol`: the messages robots and the coordinator exchange.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                       |
//! |-------------|----------------------------------------------------------------|
//! | [`status`]  | `RobotStatus` lifecycle, `RobotCommand`                        |
//! | [`request`] | `MasterRequest`, `ReserveOutcome`, one-shot `Reply<T>`         |
//! | [`channel`] | `MasterHandle`/`MasterInbox`, `RobotLink`/`RobotInbox`         |
//! | [`error`]   | `ProtocolError`, `ProtocolResult<T>`                           |
//!
//! # Call discipline
//!
//! Robot → coordinator traffic is strictly request/response: the robot moves
//! an owned request into the coordinator's queue and blocks on that request's
//! private reply channel.  Coordinator → robot traffic is one-way: the
//! coordinator never waits on a robot, so a slow robot can never stall it.

pub mod channel;
pub mod error;
pub mod request;
pub mod status;


pub use channel::{master_channel, robot_channel, MasterHandle, MasterInbox, RobotInbox, RobotLink};
pub use error::{ProtocolError, ProtocolResult};
pub use request::{reply_channel, MasterRequest, Reply, ReserveOutcome};
pub use status::{RobotCommand, RobotStatus};
