//! Workspace-wide base error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where configuration failures propagate upwards.

use thiserror::Error;

/// The top-level error type for `sw-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `sw-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;
