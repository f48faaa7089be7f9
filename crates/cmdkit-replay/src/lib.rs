//! cmdkit replay: records a game state command script, writes it to disk
//! and replays it in a fresh session.

pub mod config;
pub mod error;
pub mod replay;
