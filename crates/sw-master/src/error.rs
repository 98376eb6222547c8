use thiserror::Error;

use sw_core::{Coordinates, CoreError};
use sw_map::MapError;
use sw_robot::RobotError;

#[derive(Debug, Error)]
pub enum MasterError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error("maze error: {0}")]
    Map(#[from] MapError),

    #[error("{got} start positions supplied for a swarm of {expected}")]
    StartCountMismatch { expected: usize, got: usize },

    #[error("start position {0} lies outside the maze")]
    StartOutOfBounds(Coordinates),

    #[error("every robot hung up before the run finished")]
    Disconnected,

    #[error("failed to spawn robot thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("robot thread {0} panicked")]
    RobotPanicked(String),

    #[error("robot thread {thread} failed: {source}")]
    Robot {
        thread: String,
        #[source]
        source: RobotError,
    },
}

pub type MasterResult<T> = Result<T, MasterError>;
