// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Worker task descriptor

use crate::future::Future;
use crate::scheduler::Scheduler;
use std::time::Duration;

/// Task function: receives the task's own future and eventually resolves it
pub type TaskFn = Box<dyn FnOnce(&Future)>;

/// An asynchronous task descriptor for the dispatcher's workers
///
/// Immutable after construction; the future is created here and owned by the
/// task for its whole life.
pub struct WorkerTask {
    task: TaskFn,
    timeout: Duration,
    future: Future,
}

impl WorkerTask {
    /// Wrap a task function with a timeout (zero means no timeout)
    pub fn new(scheduler: &Scheduler, task: impl FnOnce(&Future) + 'static, timeout: Duration) -> Self {
        Self {
            task: Box::new(task),
            timeout,
            future: Future::new(scheduler),
        }
    }

    pub fn future(&self) -> &Future {
        &self.future
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub(crate) fn into_parts(self) -> (TaskFn, Duration, Future) {
        (self.task, self.timeout, self.future)
    }
}
