//! Application layer for the game state context.

pub mod commands;
pub mod registration;
