//! Toy mutable target used across command tests.

use std::cell::RefCell;
use std::rc::Rc;

/// A number that commands increase, decrease, or overwrite.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counter {
    /// Current value.
    pub number: i32,
}

impl Counter {
    /// Adds one.
    pub fn increase_number(&mut self) {
        self.number += 1;
    }

    /// Subtracts one.
    pub fn decrease_number(&mut self) {
        self.number -= 1;
    }

    /// Overwrites the value.
    pub fn set_number(&mut self, number: i32) {
        self.number = number;
    }
}

/// Handle through which several commands share one counter.
pub type SharedCounter = Rc<RefCell<Counter>>;

/// Creates a shared counter starting at `number`.
#[must_use]
pub fn shared_counter(number: i32) -> SharedCounter {
    Rc::new(RefCell::new(Counter { number }))
}
