use thiserror::Error;

use sw_core::RobotId;
use sw_map::MapError;
use sw_protocol::ProtocolError;

#[derive(Debug, Error)]
pub enum RobotError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("map error: {0}")]
    Map(#[from] MapError),

    #[error("robot has not registered with the coordinator")]
    NotRegistered,

    #[error("robot is already registered as {0}")]
    AlreadyRegistered(RobotId),
}

pub type RobotResult<T> = Result<T, RobotError>;
