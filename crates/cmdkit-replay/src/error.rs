//! Replay error types.

use cmdkit_core::error::CommandError;
use thiserror::Error;

/// Errors raised while recording, writing, reading or replaying a script.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A required environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading or writing the script file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Building, encoding, decoding or running a command failed.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// The final report could not be rendered.
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}
