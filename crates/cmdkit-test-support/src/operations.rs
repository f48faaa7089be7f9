//! Counter operations, as closures and as registered tags.

use std::cell::RefCell;

use cmdkit_core::command::{Command, ReversibleCommand, SimpleCommand};
use cmdkit_core::error::CommandError;
use cmdkit_core::operation::Operation;
use cmdkit_core::registry::Registry;

use crate::counter::{Counter, SharedCounter};

/// Tag of the registered increase operation (no arguments).
pub const INCREASE_TAG: &str = "counter.increase_number";
/// Tag of the registered decrease operation (no arguments).
pub const DECREASE_TAG: &str = "counter.decrease_number";
/// Tag of the registered set operation (argument: `i32`).
pub const SET_NUMBER_TAG: &str = "counter.set_number";

/// Increases a shared counter by one.
///
/// # Errors
///
/// Never fails; the signature matches [`Operation`].
pub fn increase(counter: &SharedCounter) -> Result<(), CommandError> {
    counter.borrow_mut().increase_number();
    Ok(())
}

/// Decreases a shared counter by one.
///
/// # Errors
///
/// Never fails; the signature matches [`Operation`].
pub fn decrease(counter: &SharedCounter) -> Result<(), CommandError> {
    counter.borrow_mut().decrease_number();
    Ok(())
}

/// An operation that always fails with `CommandError::Invocation(message)`.
pub fn failing<T: ?Sized>(message: &'static str) -> impl Fn(&T) -> Result<(), CommandError> {
    move |_| Err(CommandError::invocation(message))
}

/// Builds `n` commands against `target`: even indices are plain commands
/// running `execute`, odd indices are reversible commands running `execute`
/// and undoing with `undo`.
pub fn mixed_commands<T, F, G>(n: usize, target: &T, execute: F, undo: G) -> Vec<Box<dyn Command>>
where
    T: Clone + 'static,
    F: Operation<T> + Clone + 'static,
    G: Operation<T> + Clone + 'static,
{
    (0..n)
        .map(|i| -> Box<dyn Command> {
            if i % 2 == 0 {
                Box::new(SimpleCommand::new(target.clone(), execute.clone()))
            } else {
                Box::new(ReversibleCommand::new(
                    target.clone(),
                    execute.clone(),
                    undo.clone(),
                ))
            }
        })
        .collect()
}

fn registered_increase(counter: &RefCell<Counter>, (): &()) -> Result<(), CommandError> {
    counter.borrow_mut().increase_number();
    Ok(())
}

fn registered_decrease(counter: &RefCell<Counter>, (): &()) -> Result<(), CommandError> {
    counter.borrow_mut().decrease_number();
    Ok(())
}

fn registered_set_number(counter: &RefCell<Counter>, number: &i32) -> Result<(), CommandError> {
    counter.borrow_mut().set_number(*number);
    Ok(())
}

/// Registers the counter operations under [`INCREASE_TAG`],
/// [`DECREASE_TAG`] and [`SET_NUMBER_TAG`]. Targets are registered as
/// [`SharedCounter`] handles.
///
/// # Errors
///
/// Returns `CommandError::DuplicateOperation` if any tag is already taken.
pub fn register_counter_operations(registry: &mut Registry) -> Result<(), CommandError> {
    registry.register_operation(INCREASE_TAG, registered_increase)?;
    registry.register_operation(DECREASE_TAG, registered_decrease)?;
    registry.register_operation(SET_NUMBER_TAG, registered_set_number)?;
    Ok(())
}
