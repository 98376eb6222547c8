//! `sw-map`: grid maps, maze ground truth, and breadth-first pathfinding.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`walls`]    | `WallGrid` (edge arrays), `WallInfo` (per-cell N/S/E/W)    |
//! | [`grid`]     | `GridMap`, `CellStatus`, `MergeOutcome`                    |
//! | [`maze`]     | `Maze` (read-only ground truth), `MazeBuilder`             |
//! | [`submap`]   | `SubMap` extraction and merging                            |
//! | [`pathfind`] | `Pathfinder` trait, `Path`, `BfsPathfinder`                |
//! | [`render`]   | Text diagram of a map with robot markers                   |
//! | [`error`]    | `MapError`, `MapResult<T>`                                 |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for BFS bookkeeping.             |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public data types.    |

pub mod error;
pub mod grid;
pub mod maze;
pub mod pathfind;
pub mod render;
pub mod submap;
pub mod walls;

#[cfg(test)]
mod tests;

pub use error::{MapError, MapResult};
pub use grid::{CellStatus, GridMap, MergeOutcome};
pub use maze::{Maze, MazeBuilder};
pub use pathfind::{BfsPathfinder, Path, Pathfinder};
pub use render::render;
pub use submap::{SubMap, SubMapCell};
pub use walls::{WallGrid, WallInfo};

/// Hash map keyed by grid cell, FxHash-backed with the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub(crate) type CellMap<V> = rustc_hash::FxHashMap<sw_core::Coordinates, V>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type CellMap<V> = std::collections::HashMap<sw_core::Coordinates, V>;

/// Hash set of grid cells, FxHash-backed with the `fx-hash` feature.
#[cfg(feature = "fx-hash")]
pub(crate) type CellSet = rustc_hash::FxHashSet<sw_core::Coordinates>;
#[cfg(not(feature = "fx-hash"))]
pub(crate) type CellSet = std::collections::HashSet<sw_core::Coordinates>;
