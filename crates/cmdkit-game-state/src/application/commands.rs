//! Builders for portable game state commands.
//!
//! Every builder resolves against a [`Registry`] that has the game state
//! operations registered and the target game state inserted.

use std::cell::RefCell;

use cmdkit_core::error::CommandError;
use cmdkit_core::portable::{OperationRef, PortableCommand};
use cmdkit_core::registry::{Registry, TargetId};
use tracing::debug;

use crate::application::registration::{
    DECREASE_ENEMIES_TAG, INCREASE_ENEMIES_TAG, SET_PLAYERS_AND_ENEMIES_TAG, SET_PLAYERS_TAG,
};
use crate::domain::state::GameState;

/// Command that adds one enemy.
///
/// # Errors
///
/// Returns `CommandError` if the state or operation is not registered.
pub fn increase_enemies(
    registry: &Registry,
    state: TargetId,
) -> Result<PortableCommand, CommandError> {
    registry.command(state, OperationRef::new(INCREASE_ENEMIES_TAG, &())?)
}

/// Reversible command that adds one enemy and removes it again on undo.
///
/// # Errors
///
/// Returns `CommandError` if the state or operations are not registered.
pub fn spawn_enemy(registry: &Registry, state: TargetId) -> Result<PortableCommand, CommandError> {
    registry.reversible_command(
        state,
        OperationRef::new(INCREASE_ENEMIES_TAG, &())?,
        OperationRef::new(DECREASE_ENEMIES_TAG, &())?,
    )
}

/// Command that overwrites both counts.
///
/// # Errors
///
/// Returns `CommandError` if the state or operation is not registered.
pub fn set_players_and_enemies(
    registry: &Registry,
    state: TargetId,
    players: u32,
    enemies: u32,
) -> Result<PortableCommand, CommandError> {
    registry.command(
        state,
        OperationRef::new(SET_PLAYERS_AND_ENEMIES_TAG, &(players, enemies))?,
    )
}

/// Reversible command that sets the number of players; undo restores the
/// number the state held when this command was built.
///
/// # Errors
///
/// Returns `CommandError::UnknownTarget` if `state` is not a registered game
/// state, or any error from building the command.
pub fn set_players(
    registry: &Registry,
    state: TargetId,
    players: u32,
) -> Result<PortableCommand, CommandError> {
    let handle = registry
        .target::<RefCell<GameState>>(state)
        .ok_or(CommandError::UnknownTarget(state))?;
    let previous = handle.borrow().number_of_players;
    debug!(target_id = %state, players, previous, "building set_players command");

    registry.reversible_command(
        state,
        OperationRef::new(SET_PLAYERS_TAG, &players)?,
        OperationRef::new(SET_PLAYERS_TAG, &previous)?,
    )
}
