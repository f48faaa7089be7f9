//! Command abstractions.

use std::fmt;

use tracing::debug;

use crate::error::CommandError;
use crate::operation::{Binding, Operation};

/// Trait that all commands implement.
pub trait Command: fmt::Debug {
    /// Applies the forward operation to the bound target once.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged.
    fn execute(&self) -> Result<(), CommandError>;

    /// Capability query: returns the undo side of this command if it has one.
    fn as_reversible(&self) -> Option<&dyn Reversible> {
        None
    }

    /// Returns `true` if [`Command::as_reversible`] yields an undo handle.
    fn is_reversible(&self) -> bool {
        self.as_reversible().is_some()
    }
}

/// A command that can also apply an inverse operation.
pub trait Reversible: Command {
    /// Applies the inverse operation to the bound target once.
    ///
    /// Nothing stops this from running before [`Command::execute`].
    ///
    /// # Errors
    ///
    /// Returns the inverse operation's error unchanged.
    fn undo(&self) -> Result<(), CommandError>;
}

/// Capability query over a type-erased command.
pub fn as_reversible(command: &dyn Command) -> Option<&dyn Reversible> {
    command.as_reversible()
}

/// A target bound to a single forward operation.
pub struct SimpleCommand<T, F> {
    binding: Binding<T, F>,
}

impl<T, F> SimpleCommand<T, F>
where
    F: Operation<T>,
{
    /// Creates a command that applies `operation` to `target` on every
    /// [`Command::execute`].
    pub fn new(target: T, operation: F) -> Self {
        Self {
            binding: Binding::new(target, operation),
        }
    }
}

impl<T, F> Command for SimpleCommand<T, F>
where
    F: Operation<T>,
{
    fn execute(&self) -> Result<(), CommandError> {
        debug!(
            target_type = std::any::type_name::<T>(),
            "executing command"
        );
        self.binding.invoke()
    }
}

impl<T, F> fmt::Debug for SimpleCommand<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimpleCommand")
            .field("binding", &self.binding)
            .finish()
    }
}

/// A target bound to a forward operation and its inverse.
///
/// The wrapper does not check that `inverse` really undoes `operation`.
/// An inverse that restores an earlier value of the target has to capture
/// that value when the command is built:
///
/// ```
/// use std::cell::Cell;
/// use cmdkit_core::command::{Command, Reversible, ReversibleCommand};
///
/// let number = Cell::new(10);
/// let old_number = number.get();
/// let command = ReversibleCommand::new(
///     &number,
///     |n: &&Cell<i32>| {
///         n.set(77);
///         Ok(())
///     },
///     move |n: &&Cell<i32>| {
///         n.set(old_number);
///         Ok(())
///     },
/// );
///
/// command.execute().unwrap();
/// assert_eq!(number.get(), 77);
/// command.undo().unwrap();
/// assert_eq!(number.get(), 10);
/// ```
///
/// Reading the target inside the inverse instead (`n.set(n.get())`) would
/// restore whatever the target holds at undo time, not the old value.
pub struct ReversibleCommand<T, F, G> {
    binding: Binding<T, F>,
    inverse: G,
}

impl<T, F, G> ReversibleCommand<T, F, G>
where
    F: Operation<T>,
    G: Operation<T>,
{
    /// Creates a command that applies `operation` on execute and `inverse`
    /// on undo, both against `target`.
    pub fn new(target: T, operation: F, inverse: G) -> Self {
        Self {
            binding: Binding::new(target, operation),
            inverse,
        }
    }
}

impl<T, F, G> Command for ReversibleCommand<T, F, G>
where
    F: Operation<T>,
    G: Operation<T>,
{
    fn execute(&self) -> Result<(), CommandError> {
        debug!(
            target_type = std::any::type_name::<T>(),
            "executing reversible command"
        );
        self.binding.invoke()
    }

    fn as_reversible(&self) -> Option<&dyn Reversible> {
        Some(self)
    }
}

impl<T, F, G> Reversible for ReversibleCommand<T, F, G>
where
    F: Operation<T>,
    G: Operation<T>,
{
    fn undo(&self) -> Result<(), CommandError> {
        debug!(
            target_type = std::any::type_name::<T>(),
            "undoing reversible command"
        );
        self.inverse.apply(self.binding.target())
    }
}

impl<T, F, G> fmt::Debug for ReversibleCommand<T, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversibleCommand")
            .field("binding", &self.binding)
            .field("inverse", &std::any::type_name::<G>())
            .finish()
    }
}
