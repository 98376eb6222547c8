//! Fluent builder that assembles and launches a whole swarm.

use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use sw_core::{Coordinates, MazeRng, SwarmConfig};
use sw_map::Maze;
use sw_protocol::master_channel;
use sw_robot::{Robot, RobotOptions, RobotSummary};

use crate::observer::{MasterObserver, RenderObserver};
use crate::{MasterError, MasterReport, MasterResult, RobotMaster};

/// RNG stream offsets, one per consumer.
const MAZE_STREAM: u64 = 1;
const START_STREAM: u64 = 2;

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct SwarmReport {
    pub master: MasterReport,
    /// One summary per robot, ordered by id.
    pub robots: Vec<RobotSummary>,
}

/// Fluent builder for [`Swarm`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                          |
/// |---------------------|--------------------------------------------------|
/// | `.maze(m)`          | Perfect maze generated from `config.seed`        |
/// | `.starts(v)`        | `swarm_size` distinct cells drawn from the seed  |
/// | `.robot_options(o)` | [`RobotOptions::informed`]                       |
///
/// # Example
///
/// ```rust,ignore
/// let report = SwarmBuilder::new(config)
///     .maze(Maze::open(4, 4))
///     .starts(vec![Coordinates::new(0, 0)])
///     .build()?
///     .run(&mut NoopObserver)?;
/// assert!(report.master.fully_explored());
/// ```
pub struct SwarmBuilder {
    config:  SwarmConfig,
    maze:    Option<Maze>,
    starts:  Option<Vec<Coordinates>>,
    options: RobotOptions,
}

impl SwarmBuilder {
    pub fn new(config: SwarmConfig) -> Self {
        SwarmBuilder { config, maze: None, starts: None, options: RobotOptions::informed() }
    }

    /// Ground truth to explore.  Must match the configured dimensions.
    pub fn maze(mut self, maze: Maze) -> Self {
        self.maze = Some(maze);
        self
    }

    /// One start cell per robot, in registration order.  Cells may repeat.
    pub fn starts(mut self, starts: Vec<Coordinates>) -> Self {
        self.starts = Some(starts);
        self
    }

    pub fn robot_options(mut self, options: RobotOptions) -> Self {
        self.options = options;
        self
    }

    /// Validate inputs and fill in defaults.
    pub fn build(self) -> MasterResult<Swarm> {
        self.config.validate()?;
        let (xsize, ysize) = (self.config.maze_xsize, self.config.maze_ysize);
        let mut rng = MazeRng::new(self.config.seed);

        let maze = match self.maze {
            Some(m) => {
                m.check_size(xsize, ysize)?;
                m
            }
            None => Maze::generate(xsize, ysize, &mut rng.child(MAZE_STREAM)),
        };

        let starts = match self.starts {
            Some(s) => {
                if s.len() != self.config.swarm_size {
                    return Err(MasterError::StartCountMismatch {
                        expected: self.config.swarm_size,
                        got:      s.len(),
                    });
                }
                if let Some(&bad) = s.iter().find(|c| !maze.in_bounds(**c)) {
                    return Err(MasterError::StartOutOfBounds(bad));
                }
                s
            }
            None => random_starts(xsize, ysize, self.config.swarm_size, &mut rng.child(START_STREAM)),
        };

        Ok(Swarm { config: self.config, maze: Arc::new(maze), starts, options: self.options })
    }
}

/// `count` distinct cells, uniformly drawn.  `count` never exceeds the cell
/// count because the config was validated.
fn random_starts(xsize: u32, ysize: u32, count: usize, rng: &mut MazeRng) -> Vec<Coordinates> {
    let mut cells: Vec<Coordinates> = (0..ysize)
        .flat_map(|y| (0..xsize).map(move |x| Coordinates::new(x, y)))
        .collect();
    rng.shuffle(&mut cells);
    cells.truncate(count);
    cells
}

/// A validated swarm, ready to run.
pub struct Swarm {
    config:  SwarmConfig,
    maze:    Arc<Maze>,
    starts:  Vec<Coordinates>,
    options: RobotOptions,
}

impl Swarm {
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn starts(&self) -> &[Coordinates] {
        &self.starts
    }

    /// Spawn one named thread per robot, run the coordinator on the calling
    /// thread, and join every robot once the coordinator is done.
    pub fn run<O: MasterObserver>(self, observer: &mut O) -> MasterResult<SwarmReport> {
        let (handle, inbox) = master_channel();
        let handle = handle.with_timeout(self.config.reply_timeout);
        let mut master =
            RobotMaster::new(&self.config, inbox).with_collision_checks(self.options.collision_checks);

        info!(
            robots = self.starts.len(),
            xsize = self.config.maze_xsize,
            ysize = self.config.maze_ysize,
            seed = self.config.seed,
            "launching swarm"
        );

        let mut workers = Vec::with_capacity(self.starts.len());
        for (i, &start) in self.starts.iter().enumerate() {
            let name = format!("robot-{i}");
            let robot = Robot::new(Arc::clone(&self.maze), start, handle.clone(), self.options);
            let worker = thread::Builder::new().name(name.clone()).spawn(move || robot.run())?;
            workers.push((name, worker));
        }
        // Only robots may keep the coordinator's queue open.
        drop(handle);

        let render = self.config.render_map_updates.then_some(RenderObserver);
        let outcome = master.run(&mut (render, observer));

        let mut robots = Vec::with_capacity(workers.len());
        let mut failure = None;
        for (name, worker) in workers {
            match worker.join() {
                Ok(Ok(summary)) => robots.push(summary),
                Ok(Err(source)) => {
                    warn!(thread = %name, error = %source, "robot failed");
                    failure.get_or_insert(MasterError::Robot { thread: name, source });
                }
                Err(_) => {
                    warn!(thread = %name, "robot panicked");
                    failure.get_or_insert(MasterError::RobotPanicked(name));
                }
            }
        }
        robots.sort_by_key(|s| s.id);

        match (outcome, failure) {
            (Ok(master), None) => Ok(SwarmReport { master, robots }),
            (_, Some(err)) => Err(err),
            (Err(err), None) => Err(err),
        }
    }
}
