//! Shared classes and an ordered side-effect recorder for the test suites.
use std::cell::RefCell;
use std::sync::LazyLock;

use fault_rail::ErrorClass;

pub static FRUIT_ERROR: LazyLock<ErrorClass> = LazyLock::new(|| ErrorClass::new(None, "fruit"));
pub static APPLE_ERROR: LazyLock<ErrorClass> = LazyLock::new(|| FRUIT_ERROR.subclass("apple"));
pub static GRAPE_ERROR: LazyLock<ErrorClass> = LazyLock::new(|| FRUIT_ERROR.subclass("grape"));
pub static ROCK_ERROR: LazyLock<ErrorClass> = LazyLock::new(|| ErrorClass::new(None, "rock"));

/// Records which parts of a plan ran, in order.
#[derive(Default)]
pub struct Trace(RefCell<Vec<String>>);

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, step: impl Into<String>) {
        self.0.borrow_mut().push(step.into());
    }

    pub fn steps(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}
