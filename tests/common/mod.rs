//! Common test utilities for integration tests.

#![allow(dead_code)]

pub mod harness;

use std::cell::RefCell;
use std::rc::Rc;

/// Tracks frame requests and model rows for testing.
#[derive(Default, Clone)]
pub struct FrameTracker {
    /// Count of animation frames requested by the editor
    pub requested: Rc<RefCell<usize>>,
}

impl FrameTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        *self.requested.borrow()
    }

    pub fn clear(&self) {
        *self.requested.borrow_mut() = 0;
    }
}

/// Route `log` output through env_logger once per test binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
