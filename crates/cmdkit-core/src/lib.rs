//! cmdkit core: undoable command wrappers.
//!
//! [`command::SimpleCommand`] and [`command::ReversibleCommand`] bind a target
//! handle to one or two operations. Commands that have to be written to bytes
//! are built through a [`registry::Registry`] and encoded with [`codec`].

pub mod codec;
pub mod command;
pub mod error;
pub mod operation;
pub mod portable;
pub mod registry;
