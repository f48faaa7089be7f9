//! Replay configuration read from the environment.

use std::path::PathBuf;

use crate::error::ReplayError;

const DEFAULT_SCRIPT_PATH: &str = "command-script.bin";

/// Settings for one replay run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Where the recorded script is written and read back from.
    pub script_path: PathBuf,
    /// Whether reversible commands are undone, newest first, after replay.
    pub undo: bool,
}

impl ReplayConfig {
    /// Reads `REPLAY_SCRIPT_PATH` and `REPLAY_UNDO` from the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Config` if `REPLAY_UNDO` is not a boolean.
    pub fn from_env() -> Result<Self, ReplayError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ReplayError::Config` if `REPLAY_UNDO` is not a boolean.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ReplayError> {
        let script_path = lookup("REPLAY_SCRIPT_PATH")
            .map_or_else(|| PathBuf::from(DEFAULT_SCRIPT_PATH), PathBuf::from);
        let undo = match lookup("REPLAY_UNDO") {
            Some(value) => value.parse::<bool>().map_err(|e| {
                ReplayError::Config(format!("REPLAY_UNDO must be true or false: {e}"))
            })?,
            None => false,
        };
        Ok(Self { script_path, undo })
    }
}
