//! Ground-truth maze and its builder.
//!
//! A [`Maze`] is what the robots' sensors see.  It is built once, wrapped
//! in an `Arc`, and read concurrently by every robot thread during its scan
//! step.  Nothing mutates it after [`MazeBuilder::build`].

use std::collections::VecDeque;

use sw_core::{Coordinates, Direction, MazeRng};

use crate::walls::{WallGrid, WallInfo};
use crate::{CellSet, MapError, MapResult};

// ── Maze ──────────────────────────────────────────────────────────────────────

/// Read-only wall layout of the maze being explored.
///
/// The outer boundary is always walled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    walls: WallGrid,
}

impl Maze {
    /// A maze with no interior walls.
    pub fn open(xsize: u32, ysize: u32) -> Self {
        Maze { walls: WallGrid::open(xsize, ysize) }
    }

    /// A perfect maze (exactly one path between any two cells) carved with a
    /// randomized depth-first search.
    pub fn generate(xsize: u32, ysize: u32, rng: &mut MazeRng) -> Self {
        MazeBuilder::new(xsize, ysize).generate(rng).build()
    }

    #[inline]
    pub fn xsize(&self) -> u32 {
        self.walls.xsize()
    }

    #[inline]
    pub fn ysize(&self) -> u32 {
        self.walls.ysize()
    }

    #[inline]
    pub fn in_bounds(&self, c: Coordinates) -> bool {
        self.walls.in_bounds(c)
    }

    /// What a robot standing on `c` senses.
    #[inline]
    pub fn walls_at(&self, c: Coordinates) -> WallInfo {
        self.walls.walls_at(c)
    }

    #[inline]
    pub fn wall(&self, c: Coordinates, dir: Direction) -> bool {
        self.walls.wall(c, dir)
    }

    pub fn walls(&self) -> &WallGrid {
        &self.walls
    }

    /// Fails with [`MapError::SizeMismatch`] unless the maze is
    /// `xsize` × `ysize`.
    pub fn check_size(&self, xsize: u32, ysize: u32) -> MapResult<()> {
        if self.xsize() == xsize && self.ysize() == ysize {
            return Ok(());
        }
        Err(MapError::SizeMismatch {
            want_x: xsize,
            want_y: ysize,
            got_x:  self.xsize(),
            got_y:  self.ysize(),
        })
    }

    /// `true` if every cell can be reached from every other one.
    pub fn is_connected(&self) -> bool {
        let total = self.xsize() as usize * self.ysize() as usize;
        if total == 0 {
            return true;
        }
        let start = Coordinates::new(0, 0);
        let mut seen = CellSet::default();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);
        while let Some(c) = queue.pop_front() {
            for dir in Direction::ALL {
                if let Some(n) = self.walls.passage(c, dir) {
                    if seen.insert(n) {
                        queue.push_back(n);
                    }
                }
            }
        }
        seen.len() == total
    }

    /// Parse a wall diagram in the format produced by [`render`](crate::render).
    ///
    /// The diagram has `2 * ysize + 1` lines of `4 * xsize + 1` characters.
    /// Even lines carry north/south walls (`---` for a wall, spaces for a
    /// gap); odd lines carry west/east walls (`|` or a space) with three
    /// characters of cell content in between, which are ignored.
    pub fn parse(text: &str) -> MapResult<Maze> {
        let lines: Vec<&str> = text.lines().map(str::trim_end).filter(|l| !l.is_empty()).collect();
        if lines.len() < 3 || lines.len() % 2 == 0 {
            return Err(MapError::Parse {
                line:   lines.len(),
                reason: "expected an odd number of at least three lines".to_string(),
            });
        }
        let width = lines[0].chars().count();
        if width < 5 || (width - 1) % 4 != 0 {
            return Err(MapError::Parse {
                line:   1,
                reason: format!("row width {width} is not 4 * xsize + 1"),
            });
        }
        let xsize = ((width - 1) / 4) as u32;
        let ysize = ((lines.len() - 1) / 2) as u32;
        let mut walls = WallGrid::closed(xsize, ysize);

        for (i, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            // Trailing spaces were trimmed, so pad back to full width.
            let at = |col: usize| chars.get(col).copied().unwrap_or(' ');
            if chars.len() > width {
                return Err(MapError::Parse {
                    line:   i + 1,
                    reason: format!("row is {} characters wide, expected {width}", chars.len()),
                });
            }
            let y = (i / 2) as u32;
            if i % 2 == 0 {
                // Horizontal edges above row `y` (or below the last row).
                for x in 0..xsize {
                    let wall = at(4 * x as usize + 2) == '-';
                    if i == lines.len() - 1 {
                        walls.set_wall(Coordinates::new(x, y - 1), Direction::South, wall);
                    } else {
                        walls.set_wall(Coordinates::new(x, y), Direction::North, wall);
                    }
                }
            } else {
                for x in 0..=xsize {
                    let wall = at(4 * x as usize) == '|';
                    if x < xsize {
                        walls.set_wall(Coordinates::new(x, y), Direction::West, wall);
                    } else {
                        walls.set_wall(Coordinates::new(x - 1, y), Direction::East, wall);
                    }
                }
            }
        }

        check_boundary(&walls)?;
        Ok(Maze { walls })
    }
}

fn check_boundary(walls: &WallGrid) -> MapResult<()> {
    let (xsize, ysize) = (walls.xsize(), walls.ysize());
    for y in 0..ysize {
        for x in 0..xsize {
            let c = Coordinates::new(x, y);
            let open_edge = Direction::ALL
                .into_iter()
                .find(|&d| c.step(d, xsize, ysize).is_none() && !walls.wall(c, d));
            if let Some(dir) = open_edge {
                return Err(MapError::Parse {
                    line:   2 * y as usize + 2,
                    reason: format!("boundary wall missing on the {dir} side of {c}"),
                });
            }
        }
    }
    Ok(())
}

impl std::fmt::Display for Maze {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::render::draw(&self.walls, |_| None))
    }
}

// ── MazeBuilder ───────────────────────────────────────────────────────────────

/// Fluent builder for [`Maze`].
///
/// Starts fully walled.  Boundary edges can never be carved.
///
/// ```ignore
/// let maze = MazeBuilder::new(8, 8)
///     .generate(&mut rng)
///     .braid(&mut rng, 0.3)
///     .build();
/// ```
pub struct MazeBuilder {
    walls: WallGrid,
}

impl MazeBuilder {
    pub fn new(xsize: u32, ysize: u32) -> Self {
        MazeBuilder { walls: WallGrid::closed(xsize, ysize) }
    }

    /// Remove every interior wall.
    pub fn open_all(mut self) -> Self {
        self.walls = WallGrid::open(self.walls.xsize(), self.walls.ysize());
        self
    }

    /// Open the edge on the `dir` side of `c`.
    ///
    /// Returns `false` and leaves the maze unchanged if the edge is on the
    /// boundary or `c` is out of bounds.
    pub fn carve(&mut self, c: Coordinates, dir: Direction) -> bool {
        if c.step(dir, self.walls.xsize(), self.walls.ysize()).is_none() {
            return false;
        }
        self.walls.set_wall(c, dir, false);
        true
    }

    /// Close the edge on the `dir` side of `c`.
    pub fn close(&mut self, c: Coordinates, dir: Direction) {
        self.walls.set_wall(c, dir, true);
    }

    /// Carve a perfect maze with an iterative randomized depth-first search.
    pub fn generate(mut self, rng: &mut MazeRng) -> Self {
        let (xsize, ysize) = (self.walls.xsize(), self.walls.ysize());
        if xsize == 0 || ysize == 0 {
            return self;
        }
        let start = Coordinates::new(rng.gen_range(0..xsize), rng.gen_range(0..ysize));
        let mut visited = CellSet::default();
        visited.insert(start);
        let mut stack = vec![start];

        while let Some(&c) = stack.last() {
            let unvisited: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&d| c.step(d, xsize, ysize).is_some_and(|n| !visited.contains(&n)))
                .collect();
            match rng.choose(&unvisited) {
                Some(&dir) => {
                    self.carve(c, dir);
                    if let Some(n) = c.step(dir, xsize, ysize) {
                        visited.insert(n);
                        stack.push(n);
                    }
                }
                None => {
                    stack.pop();
                }
            }
        }
        self
    }

    /// Knock one extra wall out of each dead end with probability `p`,
    /// introducing loops.
    pub fn braid(mut self, rng: &mut MazeRng, p: f64) -> Self {
        let (xsize, ysize) = (self.walls.xsize(), self.walls.ysize());
        for y in 0..ysize {
            for x in 0..xsize {
                let c = Coordinates::new(x, y);
                let walled: Vec<Direction> = Direction::ALL
                    .into_iter()
                    .filter(|&d| self.walls.wall(c, d) && c.step(d, xsize, ysize).is_some())
                    .collect();
                let open = Direction::ALL.into_iter().filter(|&d| !self.walls.wall(c, d)).count();
                if open != 1 || !rng.gen_bool(p) {
                    continue;
                }
                if let Some(&dir) = rng.choose(&walled) {
                    self.carve(c, dir);
                }
            }
        }
        self
    }

    pub fn build(self) -> Maze {
        Maze { walls: self.walls }
    }
}
