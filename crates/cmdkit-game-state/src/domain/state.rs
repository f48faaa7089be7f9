//! The game state object.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;

/// Counts of players and enemies in a running game.
///
/// Constructed explicitly and handed to commands through a
/// [`GameStateHandle`]; there is no process-wide instance.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Enemies currently in play.
    pub number_of_enemies: u32,
    /// Players currently in play.
    pub number_of_players: u32,
}

/// Shared handle to a [`GameState`].
pub type GameStateHandle = Rc<RefCell<GameState>>;

impl GameState {
    /// Creates an empty game state behind a shared handle.
    #[must_use]
    pub fn shared() -> GameStateHandle {
        Rc::new(RefCell::new(Self::default()))
    }
}
