// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction for testable time handling

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// A clock that provides the current time.
///
/// Object-safe on purpose: schedulers hold an `Rc<dyn Clock>` so the whole
/// primitive stack stays non-generic.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Fake clock for testing with controllable time
///
/// Clones share the same underlying instant, so a test can keep one handle
/// and advance time under a scheduler that holds another.
#[derive(Clone)]
pub struct FakeClock {
    current: Rc<Cell<Instant>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            current: Rc::new(Cell::new(Instant::now())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: Duration) {
        self.current.set(self.current.get() + duration);
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: Instant) {
        self.current.set(instant);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Instant {
        self.current.get()
    }
}
