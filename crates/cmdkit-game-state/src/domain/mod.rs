//! Domain layer for the game state context.

pub mod operations;
pub mod state;
