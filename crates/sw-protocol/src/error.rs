//! Protocol error type.

use std::time::Duration;

use thiserror::Error;

/// Failures of the transport itself.
///
/// Protocol-level refusals (a denied reservation, a blocked move) are
/// ordinary reply values, never errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The other endpoint hung up before `request` was answered.
    #[error("{request}: peer disconnected")]
    Disconnected { request: &'static str },

    #[error("{request}: no reply within {timeout:?}")]
    Timeout { request: &'static str, timeout: Duration },
}

pub type ProtocolResult<T> = Result<T, ProtocolError>;
