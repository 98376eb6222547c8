//! `sw-core`: foundational types for the `maze_swarm` workspace.
//!
//! This crate is a dependency of every other `sw-*` crate.  It intentionally
//! has no `sw-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `RobotId`, `RequestSeq`                               |
//! | [`coords`]      | `Coordinates`, an integer grid cell                    |
//! | [`direction`]   | `Direction` (N, S, E, W)                              |
//! | [`config`]      | `SwarmConfig`                                         |
//! | [`rng`]         | `MazeRng` (seeded, reproducible)                      |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod coords;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SwarmConfig;
pub use coords::Coordinates;
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::{RequestSeq, RobotId};
pub use rng::MazeRng;
