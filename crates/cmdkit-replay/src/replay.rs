//! Recording a game session as a command script and replaying it.

use std::fs;
use std::path::Path;
use std::rc::Rc;

use cmdkit_core::codec;
use cmdkit_core::command::Command;
use cmdkit_core::error::CommandError;
use cmdkit_core::portable::PortableCommand;
use cmdkit_core::registry::{Registry, TargetId};
use cmdkit_game_state::application::commands;
use cmdkit_game_state::application::registration::register_game_state_operations;
use cmdkit_game_state::domain::state::{GameState, GameStateHandle};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::ReplayConfig;
use crate::error::ReplayError;

/// Outcome of one replay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Number of commands read back from the script.
    pub commands: usize,
    /// Number of reversible commands undone after replay.
    pub undone: usize,
    /// Game state when the recording finished.
    pub recorded_state: GameState,
    /// Game state after replay (and undo, if enabled).
    pub final_state: GameState,
}

/// A registry holding the game state operations and one game state.
#[derive(Debug)]
pub struct Session {
    /// Registry the session's commands resolve against.
    pub registry: Registry,
    /// The session's game state.
    pub state: GameStateHandle,
}

impl Session {
    /// Creates a session whose game state is registered under `state_id`.
    ///
    /// # Errors
    ///
    /// Returns `CommandError` if the operations cannot be registered.
    pub fn new(state_id: TargetId) -> Result<Self, CommandError> {
        let mut registry = Registry::new();
        register_game_state_operations(&mut registry)?;
        let state = GameState::shared();
        registry.register_target(state_id, Rc::clone(&state));
        Ok(Self { registry, state })
    }
}

/// Plays a short session, executing every command as it is built so that
/// reversible commands snapshot the state they actually change.
///
/// # Errors
///
/// Returns `CommandError` if a command cannot be built or fails.
pub fn record(session: &Session, state_id: TargetId) -> Result<Vec<PortableCommand>, CommandError> {
    let registry = &session.registry;
    let mut script = Vec::with_capacity(4);

    let set_up = commands::set_players_and_enemies(registry, state_id, 1, 2)?;
    keep(&mut script, set_up)?;
    keep(&mut script, commands::increase_enemies(registry, state_id)?)?;
    keep(&mut script, commands::spawn_enemy(registry, state_id)?)?;
    keep(&mut script, commands::set_players(registry, state_id, 4)?)?;

    Ok(script)
}

fn keep(script: &mut Vec<PortableCommand>, command: PortableCommand) -> Result<(), CommandError> {
    command.execute()?;
    info!(
        operation = command.record().forward.tag(),
        reversible = command.is_reversible(),
        "recorded command"
    );
    script.push(command);
    Ok(())
}

/// Encodes `script` and writes it to `path`.
///
/// # Errors
///
/// Returns `ReplayError` if encoding or writing fails.
#[instrument(skip(registry, script), fields(count = script.len()))]
pub fn write_script(
    path: &Path,
    registry: &Registry,
    script: &[PortableCommand],
) -> Result<(), ReplayError> {
    let bytes = codec::serialize(registry, script)?;
    fs::write(path, &bytes)?;
    info!(bytes = bytes.len(), "wrote command script");
    Ok(())
}

/// Reads `path` and rebuilds its commands against `registry`.
///
/// # Errors
///
/// Returns `ReplayError` if reading or decoding fails.
#[instrument(skip(registry))]
pub fn read_script(path: &Path, registry: &Registry) -> Result<Vec<PortableCommand>, ReplayError> {
    let bytes = fs::read(path)?;
    Ok(codec::deserialize(registry, &bytes)?)
}

/// Executes `script` in order, then, if `undo` is set, undoes its
/// reversible commands newest first. Returns how many were undone.
///
/// # Errors
///
/// Returns the first `CommandError`; effects of earlier commands remain.
pub fn replay(script: &[PortableCommand], undo: bool) -> Result<usize, CommandError> {
    for command in script {
        command.execute()?;
    }
    if !undo {
        return Ok(0);
    }

    let mut undone = 0;
    for reversible in script.iter().rev().filter_map(Command::as_reversible) {
        reversible.undo()?;
        undone += 1;
    }
    Ok(undone)
}

/// Records a session, writes it to the configured path, reads it back into a
/// fresh session and replays it there.
///
/// # Errors
///
/// Returns `ReplayError` on any command or I/O failure.
pub fn run(config: &ReplayConfig) -> Result<ReplayReport, ReplayError> {
    let state_id = TargetId::random();

    let recording = Session::new(state_id)?;
    let script = record(&recording, state_id)?;
    write_script(&config.script_path, &recording.registry, &script)?;
    let recorded_state = *recording.state.borrow();

    let playback = Session::new(state_id)?;
    let loaded = read_script(&config.script_path, &playback.registry)?;
    let undone = replay(&loaded, config.undo)?;
    let final_state = *playback.state.borrow();
    info!(commands = loaded.len(), undone, "replayed command script");

    Ok(ReplayReport {
        commands: loaded.len(),
        undone,
        recorded_state,
        final_state,
    })
}
