//! cmdkit game state context.
//!
//! Holds the explicitly constructed game state, the operations that change
//! it, and builders for portable commands over those operations.

pub mod application;
pub mod domain;
