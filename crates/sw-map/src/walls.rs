//! Edge arrays shared by maps and mazes.
//!
//! # Data layout
//!
//! Walls live on the edges between cells, not in the cells themselves.  For
//! an `xsize` × `ysize` grid:
//!
//! ```text
//! x_edges[y][x]  x ∈ [0, xsize]   wall between (x-1, y) and (x, y)
//! y_edges[y][x]  y ∈ [0, ysize]   wall between (x, y-1) and (x, y)
//! ```
//!
//! Each array is one larger than the grid along the axis it crosses, so the
//! outer boundary is stored like any other edge and a boundary cell's four
//! walls can always be read without a bounds check.  Both arrays are flat,
//! row-major `Vec<bool>`s indexed through the private `*_index` helpers.

use sw_core::{Coordinates, Direction};

// ── WallInfo ──────────────────────────────────────────────────────────────────

/// The four walls around one cell, indexed by [`Direction::index`]
/// (North, South, East, West).  `true` = wall.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallInfo(pub [bool; 4]);

impl WallInfo {
    /// Walls on all four sides.
    pub const CLOSED: WallInfo = WallInfo([true; 4]);
    /// No walls at all.
    pub const OPEN: WallInfo = WallInfo([false; 4]);

    #[inline]
    pub fn wall(self, dir: Direction) -> bool {
        self.0[dir.index()]
    }

    #[inline]
    pub fn set(&mut self, dir: Direction, wall: bool) {
        self.0[dir.index()] = wall;
    }

    /// Directions without a wall, in canonical order.
    pub fn openings(self) -> impl Iterator<Item = Direction> {
        Direction::ALL.into_iter().filter(move |&d| !self.wall(d))
    }
}

// ── WallGrid ──────────────────────────────────────────────────────────────────

enum Edge {
    X(usize),
    Y(usize),
}

/// Wall state of every edge of an `xsize` × `ysize` grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    xsize: u32,
    ysize: u32,
    /// Length `ysize * (xsize + 1)`.
    x_edges: Vec<bool>,
    /// Length `(ysize + 1) * xsize`.
    y_edges: Vec<bool>,
}

impl WallGrid {
    /// Every edge is a wall.
    pub fn closed(xsize: u32, ysize: u32) -> Self {
        let (xs, ys) = (xsize as usize, ysize as usize);
        Self {
            xsize,
            ysize,
            x_edges: vec![true; ys * (xs + 1)],
            y_edges: vec![true; (ys + 1) * xs],
        }
    }

    /// Only the outer boundary is walled.
    pub fn open(xsize: u32, ysize: u32) -> Self {
        let mut grid = Self::closed(xsize, ysize);
        for y in 0..ysize {
            for x in 0..xsize {
                let c = Coordinates::new(x, y);
                if x + 1 < xsize {
                    grid.set_wall(c, Direction::East, false);
                }
                if y + 1 < ysize {
                    grid.set_wall(c, Direction::South, false);
                }
            }
        }
        grid
    }

    #[inline]
    pub fn xsize(&self) -> u32 {
        self.xsize
    }

    #[inline]
    pub fn ysize(&self) -> u32 {
        self.ysize
    }

    #[inline]
    pub fn in_bounds(&self, c: Coordinates) -> bool {
        c.in_bounds(self.xsize, self.ysize)
    }

    #[inline]
    fn x_edge_index(&self, x: u32, y: u32) -> usize {
        y as usize * (self.xsize as usize + 1) + x as usize
    }

    #[inline]
    fn y_edge_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.xsize as usize + x as usize
    }

    /// Flat slot of the edge on the `dir` side of an in-bounds cell.
    #[inline]
    fn edge(&self, c: Coordinates, dir: Direction) -> Edge {
        match dir {
            Direction::North => Edge::Y(self.y_edge_index(c.x, c.y)),
            Direction::South => Edge::Y(self.y_edge_index(c.x, c.y + 1)),
            Direction::West  => Edge::X(self.x_edge_index(c.x, c.y)),
            Direction::East  => Edge::X(self.x_edge_index(c.x + 1, c.y)),
        }
    }

    /// `true` if there is a wall on the `dir` side of `c`.
    ///
    /// Cells outside the grid are reported as fully walled.
    pub fn wall(&self, c: Coordinates, dir: Direction) -> bool {
        if !self.in_bounds(c) {
            return true;
        }
        match self.edge(c, dir) {
            Edge::X(i) => self.x_edges[i],
            Edge::Y(i) => self.y_edges[i],
        }
    }

    /// Set the edge on the `dir` side of `c`.  Out-of-bounds cells are ignored.
    pub fn set_wall(&mut self, c: Coordinates, dir: Direction, wall: bool) {
        if !self.in_bounds(c) {
            return;
        }
        match self.edge(c, dir) {
            Edge::X(i) => self.x_edges[i] = wall,
            Edge::Y(i) => self.y_edges[i] = wall,
        }
    }

    /// All four walls of `c`.
    pub fn walls_at(&self, c: Coordinates) -> WallInfo {
        let mut info = WallInfo::CLOSED;
        for dir in Direction::ALL {
            info.set(dir, self.wall(c, dir));
        }
        info
    }

    /// Overwrite all four walls of `c`.
    pub fn set_walls_at(&mut self, c: Coordinates, walls: WallInfo) {
        for dir in Direction::ALL {
            self.set_wall(c, dir, walls.wall(dir));
        }
    }

    /// The cell reached by leaving `c` towards `dir`, if no wall is in the
    /// way and the step stays inside the grid.
    #[inline]
    pub fn passage(&self, c: Coordinates, dir: Direction) -> Option<Coordinates> {
        if self.wall(c, dir) {
            return None;
        }
        c.step(dir, self.xsize, self.ysize)
    }
}
