//! Map-subsystem error type.

use thiserror::Error;

use sw_core::Coordinates;

/// Errors produced by `sw-map`.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("no path from {from} to {to}")]
    NoPath { from: Coordinates, to: Coordinates },

    #[error("destination {0} has never been observed")]
    DestinationUnknown(Coordinates),

    #[error("cell {0} lies outside the map")]
    OutOfBounds(Coordinates),

    #[error("maze dimensions {got_x}x{got_y} do not match expected {want_x}x{want_y}")]
    SizeMismatch {
        want_x: u32,
        want_y: u32,
        got_x:  u32,
        got_y:  u32,
    },

    #[error("maze diagram line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

pub type MapResult<T> = Result<T, MapError>;
