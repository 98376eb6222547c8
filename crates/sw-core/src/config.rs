//! Run configuration.
//!
//! `SwarmConfig` is a plain data struct.  The application crate fills it from
//! command-line arguments (or a serialized file with the `serde` feature) and
//! hands it to `sw_master::SwarmBuilder`.

use std::time::Duration;

use crate::{CoreError, CoreResult};

/// Top-level swarm configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwarmConfig {
    /// Maze width in cells.
    pub maze_xsize: u32,

    /// Maze height in cells.
    pub maze_ysize: u32,

    /// Number of robots that must register before exploration starts.
    pub swarm_size: usize,

    /// Master RNG seed.  The same seed always produces the same maze and the
    /// same random start positions.
    pub seed: u64,

    /// Render the global map to the log after every map update.
    pub render_map_updates: bool,

    /// Upper bound on how long a robot waits for any single reply from the
    /// coordinator.  `None` blocks indefinitely.
    pub reply_timeout: Option<Duration>,
}

impl SwarmConfig {
    /// Number of cells in the maze.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.maze_xsize as usize * self.maze_ysize as usize
    }

    /// Reject configurations no run could complete with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.maze_xsize == 0 || self.maze_ysize == 0 {
            return Err(CoreError::Config(format!(
                "maze must be at least 1x1, got {}x{}",
                self.maze_xsize, self.maze_ysize
            )));
        }
        if self.swarm_size == 0 {
            return Err(CoreError::Config("swarm_size must be at least 1".into()));
        }
        if self.swarm_size > self.cell_count() {
            return Err(CoreError::Config(format!(
                "swarm_size {} exceeds the {} cells of the maze",
                self.swarm_size,
                self.cell_count()
            )));
        }
        if self.reply_timeout == Some(Duration::ZERO) {
            return Err(CoreError::Config("reply_timeout must be non-zero".into()));
        }
        Ok(())
    }
}

impl Default for SwarmConfig {
    /// A 4×4 maze explored by a single robot.
    fn default() -> Self {
        Self {
            maze_xsize:         4,
            maze_ysize:         4,
            swarm_size:         1,
            seed:               42,
            render_map_updates: false,
            reply_timeout:      None,
        }
    }
}
