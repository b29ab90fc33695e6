// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task executor with busy and timeout tracking
//!
//! A [`Worker`] runs one [`WorkerTask`] at a time. Two conditions expose its
//! activity: "working" flips false the moment the task's future resolves, and
//! "timed out" flips true if the task's timer fires first. The two races are
//! independent; a timed-out task keeps running to completion in the
//! background and its late result is discarded by the future's
//! first-write-wins rule.

use crate::condition::Condition;
use crate::error::TaskError;
use crate::future::Future;
use crate::id;
use crate::scheduler::{Scheduler, TimerId};
use crate::task::WorkerTask;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

struct WorkerInner {
    id: String,
    working: Condition,
    timed_out: Condition,
    current: Option<Future>,
}

/// Shared-handle task executor
#[derive(Clone)]
pub struct Worker {
    inner: Rc<RefCell<WorkerInner>>,
    scheduler: Scheduler,
}

/// Weak worker handle for listener back-references
pub(crate) struct WeakWorker {
    inner: Weak<RefCell<WorkerInner>>,
    scheduler: Scheduler,
}

impl WeakWorker {
    pub(crate) fn upgrade(&self) -> Option<Worker> {
        self.inner.upgrade().map(|inner| Worker {
            inner,
            scheduler: self.scheduler.clone(),
        })
    }
}

impl Worker {
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            inner: Rc::new(RefCell::new(WorkerInner {
                id: id::worker_name(),
                working: Condition::new(scheduler),
                timed_out: Condition::new(scheduler),
                current: None,
            })),
            scheduler: scheduler.clone(),
        }
    }

    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    pub fn is_working(&self) -> bool {
        self.inner.borrow().working.is_true()
    }

    pub fn is_timed_out(&self) -> bool {
        self.inner.borrow().timed_out.is_true()
    }

    /// Register an observer for the worker becoming free
    pub fn wait_for_work_done(&self, cb: impl FnMut(&Condition) + 'static) {
        self.inner.borrow().working.wait_for_false(cb);
    }

    /// Register an observer for the worker timing out
    pub fn wait_for_timeout(&self, cb: impl FnMut(&Condition) + 'static) {
        self.inner.borrow().timed_out.wait_for_true(cb);
    }

    /// Execute a task, optionally within its configured timeout
    ///
    /// The task function itself starts on the next tick; the timeout timer,
    /// if any, is armed immediately.
    pub fn run(&self, task: WorkerTask) {
        let (task_fn, timeout, future) = task.into_parts();
        let working = {
            let mut inner = self.inner.borrow_mut();
            inner.current = Some(future.clone());
            inner.working.clone()
        };
        working.set_true();

        // Shared between the completion listener and the timer so whichever
        // side loses the race can stand down
        let timer_slot: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));

        {
            let working = working.clone();
            let scheduler = self.scheduler.clone();
            let slot = timer_slot.clone();
            self.scheduler.defer(move || {
                let slot = slot.clone();
                let scheduler_for_cancel = scheduler.clone();
                future.wait_for_set(move |_| {
                    working.set_false();
                    if let Some(timer) = slot.take() {
                        scheduler_for_cancel.cancel(timer);
                    }
                });
                task_fn(&future);
            });
        }

        if timeout > Duration::ZERO {
            let timed_out = self.inner.borrow().timed_out.clone();
            let slot = timer_slot.clone();
            let timer = self.scheduler.schedule_after(timeout, move || {
                slot.set(None);
                timed_out.set_true();
            });
            timer_slot.set(Some(timer));
        }
    }

    /// Force-resolve the current task's future with a timeout error and
    /// silence this worker for good
    ///
    /// A killed worker is never reused.
    pub fn kill(&self) {
        let (worker_id, current, working, timed_out) = {
            let inner = self.inner.borrow();
            (
                inner.id.clone(),
                inner.current.clone(),
                inner.working.clone(),
                inner.timed_out.clone(),
            )
        };

        tracing::warn!(worker_id = %worker_id, "worker timed out, resolving its future with an error");
        if let Some(future) = current {
            future.set_error(TaskError::WorkerTimeout(worker_id));
        }
        working.disable();
        timed_out.disable();
    }

    pub(crate) fn downgrade(&self) -> WeakWorker {
        WeakWorker {
            inner: Rc::downgrade(&self.inner),
            scheduler: self.scheduler.clone(),
        }
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod tests;
