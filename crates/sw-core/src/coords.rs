//! Integer grid coordinates.
//!
//! `Coordinates` identify one maze cell.  They are the key type of every
//! map-shaped structure in the workspace (parent maps, reservation tables,
//! sub-maps), so they derive a total order and a hash.

use crate::Direction;

/// A cell position `(x, y)` with the origin in the north-west corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinates {
    pub x: u32,
    pub y: u32,
}

impl Coordinates {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// `true` if the cell lies inside an `xsize` × `ysize` grid.
    #[inline]
    pub fn in_bounds(self, xsize: u32, ysize: u32) -> bool {
        self.x < xsize && self.y < ysize
    }

    /// The neighbouring cell one step towards `dir`.
    ///
    /// Returns `None` when the step would leave the `xsize` × `ysize` grid,
    /// so callers never have to reason about wrap-around or underflow.
    pub fn step(self, dir: Direction, xsize: u32, ysize: u32) -> Option<Coordinates> {
        let (dx, dy) = dir.delta();
        let nx = self.x as i64 + dx;
        let ny = self.y as i64 + dy;
        if nx < 0 || ny < 0 || nx >= xsize as i64 || ny >= ysize as i64 {
            return None;
        }
        Some(Coordinates::new(nx as u32, ny as u32))
    }

    /// Direction of an orthogonally adjacent cell, or `None` if `other` is
    /// not exactly one step away.
    pub fn direction_to(self, other: Coordinates) -> Option<Direction> {
        let dx = other.x as i64 - self.x as i64;
        let dy = other.y as i64 - self.y as i64;
        match (dx, dy) {
            (0, -1) => Some(Direction::North),
            (0, 1)  => Some(Direction::South),
            (1, 0)  => Some(Direction::East),
            (-1, 0) => Some(Direction::West),
            _       => None,
        }
    }

    /// Manhattan (L1) distance in cells.
    #[inline]
    pub fn manhattan(self, other: Coordinates) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(u32, u32)> for Coordinates {
    fn from((x, y): (u32, u32)) -> Self {
        Coordinates::new(x, y)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
