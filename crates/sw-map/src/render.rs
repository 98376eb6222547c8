//! Text diagram of a map.
//!
//! ```text
//! +---+---+---+
//! | 1   * | X |
//! +   +---+---+
//! |       | X |
//! +---+---+---+
//! ```
//!
//! Every cell is three characters wide.  Explored cells are blank, frontier
//! cells show ` * `, unknown cells ` X `, and a cell with a robot on it
//! shows the robot's id.

use sw_core::{Coordinates, Direction, RobotId};

use crate::grid::{CellStatus, GridMap};
use crate::walls::WallGrid;

/// Render `map` with each `(robot, position)` pair drawn on its cell.
///
/// Positions outside the map are ignored.  When several robots share a cell
/// the first one listed is shown.
pub fn render(map: &GridMap, robots: &[(RobotId, Coordinates)]) -> String {
    draw(map.walls(), |c| {
        if let Some((id, _)) = robots.iter().find(|(_, pos)| *pos == c) {
            return Some(robot_label(*id));
        }
        match map.status(c) {
            CellStatus::Unknown  => Some(" X ".to_string()),
            CellStatus::Frontier => Some(" * ".to_string()),
            CellStatus::Explored => None,
        }
    })
}

fn robot_label(id: RobotId) -> String {
    if id.is_valid() && id.0 < 1000 {
        format!("{:^3}", id.0)
    } else {
        " R ".to_string()
    }
}

/// Draw `walls`, asking `label` for the three-character content of each
/// cell (`None` = blank).
pub(crate) fn draw(walls: &WallGrid, label: impl Fn(Coordinates) -> Option<String>) -> String {
    let (xsize, ysize) = (walls.xsize(), walls.ysize());
    let mut out = String::with_capacity((2 * ysize as usize + 1) * (4 * xsize as usize + 2));

    for y in 0..ysize {
        horizontal(&mut out, xsize, |x| walls.wall(Coordinates::new(x, y), Direction::North));

        for x in 0..xsize {
            let c = Coordinates::new(x, y);
            out.push(if walls.wall(c, Direction::West) { '|' } else { ' ' });
            match label(c) {
                Some(text) => out.push_str(&text),
                None => out.push_str("   "),
            }
        }
        if xsize > 0 {
            let last = Coordinates::new(xsize - 1, y);
            out.push(if walls.wall(last, Direction::East) { '|' } else { ' ' });
        }
        out.push('\n');
    }

    if ysize > 0 {
        horizontal(&mut out, xsize, |x| walls.wall(Coordinates::new(x, ysize - 1), Direction::South));
    }
    out
}

fn horizontal(out: &mut String, xsize: u32, wall: impl Fn(u32) -> bool) {
    for x in 0..xsize {
        out.push('+');
        out.push_str(if wall(x) { "---" } else { "   " });
    }
    out.push_str("+\n");
}
