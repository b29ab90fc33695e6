// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-size worker pool with a FIFO pending queue
//!
//! A [`Dispatcher`] owns a roster of workers and hands each submitted task
//! to the longest-idle one. Tasks wait in submission order when every worker
//! is busy. A worker that times out is killed and replaced one-for-one, so
//! pool capacity never degrades.

use crate::future::Future;
use crate::scheduler::Scheduler;
use crate::sequence::{self, ChainStep, SequenceStep};
use crate::signal::{ListenerId, Signal};
use crate::task::WorkerTask;
use crate::worker::Worker;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct DispatcherInner {
    concurrency: usize,
    // Every live worker, busy or not: keeps them alive while their
    // listeners hold only weak back-references
    roster: Vec<Worker>,
    idle: VecDeque<Worker>,
    pending: VecDeque<WorkerTask>,
    is_empty: Signal<Dispatcher>,
}

/// Shared-handle task pool
#[derive(Clone)]
pub struct Dispatcher {
    inner: Rc<RefCell<DispatcherInner>>,
    scheduler: Scheduler,
}

impl Dispatcher {
    /// Create a pool with the given number of workers (minimum one)
    pub fn new(scheduler: &Scheduler, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        let dispatcher = Self {
            inner: Rc::new(RefCell::new(DispatcherInner {
                concurrency,
                roster: Vec::with_capacity(concurrency),
                idle: VecDeque::with_capacity(concurrency),
                pending: VecDeque::new(),
                is_empty: Signal::new(),
            })),
            scheduler: scheduler.clone(),
        };
        for _ in 0..concurrency {
            let worker = dispatcher.spawn_worker();
            let mut inner = dispatcher.inner.borrow_mut();
            inner.roster.push(worker.clone());
            inner.idle.push_back(worker);
        }
        dispatcher
    }

    /// Single-worker pool, strict FIFO execution
    pub fn single(scheduler: &Scheduler) -> Self {
        Self::new(scheduler, 1)
    }

    pub fn concurrency(&self) -> usize {
        self.inner.borrow().concurrency
    }

    /// Number of tasks waiting for a worker
    pub fn pending_count(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Submit a task for asynchronous execution
    ///
    /// Returns the task's future right away; the task runs as soon as a
    /// worker is free, in submission order.
    pub fn submit(&self, task: impl FnOnce(&Future) + 'static, timeout: Duration) -> Future {
        let task = WorkerTask::new(&self.scheduler, task, timeout);
        let future = task.future().clone();
        self.inner.borrow_mut().pending.push_back(task);
        self.execute_task();
        future
    }

    /// Submit an ordered list of node-style steps as one task
    ///
    /// See [`SequenceStep`] for the per-step contract. With `halt_on_error`
    /// the first failing step resolves the future; otherwise the error is
    /// forwarded to the next step.
    pub fn submit_node_sequence(
        &self,
        steps: Vec<SequenceStep>,
        timeout: Duration,
        halt_on_error: bool,
    ) -> Future {
        self.submit(
            move |future| sequence::run_node_sequence(future, steps, halt_on_error),
            timeout,
        )
    }

    /// Submit an ordered list of chained steps as one task
    ///
    /// Each step advances by resolving its sub-future; see [`ChainStep`].
    pub fn submit_chained(&self, steps: Vec<ChainStep>, timeout: Duration) -> Future {
        let scheduler = self.scheduler.clone();
        self.submit(
            move |future| sequence::run_chain(&scheduler, future, steps),
            timeout,
        )
    }

    /// Register an observer for the pending queue draining
    pub fn add_is_empty_listener(&self, cb: impl FnMut(&Dispatcher) + 'static) -> ListenerId {
        self.inner.borrow().is_empty.add_listener(cb)
    }

    /// Build a worker whose lifecycle notifications route back here
    fn spawn_worker(&self) -> Worker {
        let worker = Worker::new(&self.scheduler);

        let weak = Rc::downgrade(&self.inner);
        let scheduler = self.scheduler.clone();
        let weak_worker = worker.downgrade();
        worker.wait_for_work_done(move |_| {
            if let Some(dispatcher) = upgrade(&weak, &scheduler) {
                if let Some(worker) = weak_worker.upgrade() {
                    dispatcher.worker_not_busy(worker);
                }
            }
        });

        let weak = Rc::downgrade(&self.inner);
        let scheduler = self.scheduler.clone();
        let weak_worker = worker.downgrade();
        worker.wait_for_timeout(move |_| {
            if let Some(dispatcher) = upgrade(&weak, &scheduler) {
                if let Some(worker) = weak_worker.upgrade() {
                    dispatcher.worker_timed_out(worker);
                }
            }
        });

        worker
    }

    /// Pair the oldest pending task with the longest-idle worker, if both
    /// exist, and broadcast when the queue is drained
    fn execute_task(&self) {
        let dispatch = {
            let mut inner = self.inner.borrow_mut();
            if inner.pending.is_empty() || inner.idle.is_empty() {
                None
            } else {
                inner.pending.pop_front().zip(inner.idle.pop_front())
            }
        };
        if let Some((task, worker)) = dispatch {
            worker.run(task);
        }

        let drained = {
            let inner = self.inner.borrow();
            inner.pending.is_empty().then(|| inner.is_empty.clone())
        };
        if let Some(signal) = drained {
            signal.emit(self);
        }
    }

    fn worker_not_busy(&self, worker: Worker) {
        if worker.is_timed_out() {
            // The old worker was killed; a fresh one takes its slot
            let replacement = self.spawn_worker();
            let mut inner = self.inner.borrow_mut();
            let old_id = worker.id();
            inner.roster.retain(|w| w.id() != old_id);
            inner.roster.push(replacement.clone());
            inner.idle.push_back(replacement);
        } else {
            self.inner.borrow_mut().idle.push_back(worker);
        }
        self.execute_task();
    }

    fn worker_timed_out(&self, worker: Worker) {
        worker.kill();
        self.execute_task();
    }
}

fn upgrade(inner: &Weak<RefCell<DispatcherInner>>, scheduler: &Scheduler) -> Option<Dispatcher> {
    inner.upgrade().map(|inner| Dispatcher {
        inner,
        scheduler: scheduler.clone(),
    })
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
