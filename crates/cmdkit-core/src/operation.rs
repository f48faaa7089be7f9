//! Operations and the target/operation binding they are stored in.

use std::fmt;

use crate::error::CommandError;

/// A unit of behaviour applied to a target.
///
/// Any `Fn(&T) -> Result<(), CommandError>` closure is an operation, so call
/// sites can write `|counter: &RefCell<Counter>| { ... }` directly.
pub trait Operation<T: ?Sized> {
    /// Applies the operation to `target`.
    ///
    /// # Errors
    ///
    /// Returns whatever error the operation itself produces.
    fn apply(&self, target: &T) -> Result<(), CommandError>;
}

impl<T, F> Operation<T> for F
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), CommandError>,
{
    fn apply(&self, target: &T) -> Result<(), CommandError> {
        self(target)
    }
}

/// A target paired with the operation that acts on it.
///
/// Both halves are fixed at construction.
pub struct Binding<T, F> {
    target: T,
    operation: F,
}

impl<T, F> Binding<T, F>
where
    F: Operation<T>,
{
    /// Binds `operation` to `target`.
    pub fn new(target: T, operation: F) -> Self {
        Self { target, operation }
    }

    /// Applies the bound operation to the bound target once.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged.
    pub fn invoke(&self) -> Result<(), CommandError> {
        self.operation.apply(&self.target)
    }

    /// Returns the bound target.
    pub fn target(&self) -> &T {
        &self.target
    }
}

impl<T, F> fmt::Debug for Binding<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("target", &std::any::type_name::<T>())
            .field("operation", &std::any::type_name::<F>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_invoke_applies_operation_to_bound_target() {
        // Arrange
        let binding = Binding::new(Cell::new(3), |cell: &Cell<i32>| {
            cell.set(cell.get() * 2);
            Ok(())
        });

        // Act
        binding.invoke().unwrap();

        // Assert
        assert_eq!(binding.target().get(), 6);
    }

    #[test]
    fn test_invoke_returns_operation_error_unchanged() {
        // Arrange
        let binding = Binding::new((), |(): &()| Err(CommandError::invocation("out of range")));

        // Act
        let result = binding.invoke();

        // Assert
        assert_eq!(result, Err(CommandError::invocation("out of range")));
    }

    #[test]
    fn test_binding_holds_borrowed_targets() {
        // Arrange
        let shared = Cell::new(0);
        let first = Binding::new(&shared, |cell: &&Cell<i32>| {
            cell.set(cell.get() + 1);
            Ok(())
        });
        let second = Binding::new(&shared, |cell: &&Cell<i32>| {
            cell.set(cell.get() + 10);
            Ok(())
        });

        // Act
        first.invoke().unwrap();
        second.invoke().unwrap();

        // Assert
        assert_eq!(shared.get(), 11);
    }
}
