//! Registration of game state operations under stable tags.

use cmdkit_core::error::CommandError;
use cmdkit_core::registry::Registry;

use crate::domain::operations;

/// Tag for [`operations::increase_number_of_enemies`].
pub const INCREASE_ENEMIES_TAG: &str = "game_state.increase_number_of_enemies";
/// Tag for [`operations::decrease_number_of_enemies`].
pub const DECREASE_ENEMIES_TAG: &str = "game_state.decrease_number_of_enemies";
/// Tag for [`operations::set_number_of_players`].
pub const SET_PLAYERS_TAG: &str = "game_state.set_number_of_players";
/// Tag for [`operations::set_players_and_enemies`].
pub const SET_PLAYERS_AND_ENEMIES_TAG: &str = "game_state.set_players_and_enemies";

/// Registers every game state operation. Game states are registered as
/// [`GameStateHandle`](crate::domain::state::GameStateHandle)s.
///
/// # Errors
///
/// Returns `CommandError::DuplicateOperation` if any tag is already taken.
pub fn register_game_state_operations(registry: &mut Registry) -> Result<(), CommandError> {
    registry.register_operation(INCREASE_ENEMIES_TAG, operations::increase_number_of_enemies)?;
    registry.register_operation(DECREASE_ENEMIES_TAG, operations::decrease_number_of_enemies)?;
    registry.register_operation(SET_PLAYERS_TAG, operations::set_number_of_players)?;
    registry.register_operation(
        SET_PLAYERS_AND_ENEMIES_TAG,
        operations::set_players_and_enemies,
    )?;
    Ok(())
}
