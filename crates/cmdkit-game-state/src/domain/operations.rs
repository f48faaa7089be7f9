//! Operations that change the game state.
//!
//! Each takes the state cell and the arguments bound when the command was
//! built, so they can be registered under a tag and rebuilt from bytes.

use std::cell::RefCell;

use cmdkit_core::error::CommandError;

use super::state::GameState;

/// Adds one enemy.
///
/// # Errors
///
/// Returns `CommandError::Invocation` if the count would overflow.
pub fn increase_number_of_enemies(state: &RefCell<GameState>, (): &()) -> Result<(), CommandError> {
    let mut state = state.borrow_mut();
    state.number_of_enemies = state
        .number_of_enemies
        .checked_add(1)
        .ok_or_else(|| CommandError::invocation("number of enemies overflowed"))?;
    Ok(())
}

/// Removes one enemy.
///
/// # Errors
///
/// Returns `CommandError::Invocation` if there are no enemies left.
pub fn decrease_number_of_enemies(state: &RefCell<GameState>, (): &()) -> Result<(), CommandError> {
    let mut state = state.borrow_mut();
    state.number_of_enemies = state
        .number_of_enemies
        .checked_sub(1)
        .ok_or_else(|| CommandError::invocation("no enemies left to remove"))?;
    Ok(())
}

/// Overwrites the number of players.
///
/// # Errors
///
/// Never fails.
pub fn set_number_of_players(state: &RefCell<GameState>, number: &u32) -> Result<(), CommandError> {
    state.borrow_mut().number_of_players = *number;
    Ok(())
}

/// Overwrites both counts at once.
///
/// # Errors
///
/// Never fails.
pub fn set_players_and_enemies(
    state: &RefCell<GameState>,
    &(players, enemies): &(u32, u32),
) -> Result<(), CommandError> {
    let mut state = state.borrow_mut();
    state.number_of_players = players;
    state.number_of_enemies = enemies;
    Ok(())
}
