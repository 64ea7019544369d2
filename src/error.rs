//! Crate error type

use thiserror::Error;

/// Errors from parsing host-supplied data and configuration
#[derive(Debug, Error)]
pub enum Error {
    /// A stroke colour string that is not a supported CSS colour
    #[error("invalid colour: {0:?}")]
    InvalidColor(String),
    /// Tuning values that would break motion or frame timing
    #[error("invalid tuning: {0}")]
    InvalidTuning(String),
    /// Malformed roster or tuning JSON
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Reading a tuning file failed (native only)
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
