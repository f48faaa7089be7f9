//! Shared test fixtures and operations for cmdkit.

mod counter;
mod operations;

pub use counter::{Counter, SharedCounter, shared_counter};
pub use operations::{
    DECREASE_TAG, INCREASE_TAG, SET_NUMBER_TAG, decrease, failing, increase, mixed_commands,
    register_counter_operations,
};
