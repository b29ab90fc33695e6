// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-shot value holder
//!
//! A [`Future`] holds the eventual value of work not yet executed. The first
//! write wins: later writes are silently ignored, which is what protects a
//! timed-out task's stale result from corrupting state. There is no separate
//! error channel; an error is just a resolved `Err` value and consumers check
//! the kind.

use crate::condition::Condition;
use crate::error::TaskError;
use crate::scheduler::Scheduler;
use std::cell::RefCell;
use std::rc::Rc;

/// Payload carried by a resolved future
pub type TaskValue = serde_json::Value;

/// A resolved future value: a normal result or an error-kind value
pub type TaskResult = Result<TaskValue, TaskError>;

struct FutureInner {
    value: Option<TaskResult>,
    value_set: Condition,
}

/// Shared-handle one-shot value holder
#[derive(Clone)]
pub struct Future {
    inner: Rc<RefCell<FutureInner>>,
}

impl Future {
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            inner: Rc::new(RefCell::new(FutureInner {
                value: None,
                value_set: Condition::new(scheduler),
            })),
        }
    }

    /// The resolved value, if any
    ///
    /// Check [`Future::is_set`] (or match on `Some`) before treating the
    /// future as settled.
    pub fn value(&self) -> Option<TaskResult> {
        self.inner.borrow().value.clone()
    }

    pub fn is_set(&self) -> bool {
        self.value_set().is_true()
    }

    /// Resolve with `result`; ignored if already resolved
    pub fn set(&self, result: TaskResult) {
        let value_set = {
            let mut inner = self.inner.borrow_mut();
            if inner.value_set.is_true() {
                return;
            }
            inner.value = Some(result);
            inner.value_set.clone()
        };
        value_set.set_true();
    }

    /// Resolve with a normal value
    pub fn set_value(&self, value: impl Into<TaskValue>) {
        self.set(Ok(value.into()));
    }

    /// Resolve with an error-kind value
    pub fn set_error(&self, error: TaskError) {
        self.set(Err(error));
    }

    /// Invoke `cb` with this future once a value is set
    ///
    /// If already resolved the callback runs once on the next tick; otherwise
    /// it fires when the first `set` succeeds. Multiple registrations are all
    /// honored in registration order.
    pub fn wait_for_set(&self, mut cb: impl FnMut(&Future) + 'static) {
        let value_set = self.value_set();
        if value_set.is_true() {
            let me = self.clone();
            value_set.scheduler().defer(move || cb(&me));
        } else {
            let weak = Rc::downgrade(&self.inner);
            value_set.wait_for_true(move |_| {
                if let Some(inner) = weak.upgrade() {
                    cb(&Future { inner });
                }
            });
        }
    }

    fn value_set(&self) -> Condition {
        self.inner.borrow().value_set.clone()
    }
}

#[cfg(test)]
#[path = "future_tests.rs"]
mod tests;
