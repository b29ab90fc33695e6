// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Deferred-tick and timer scheduling
//!
//! All "asynchronous" behavior in this crate is expressed as callbacks queued
//! here: a deferred tick is a timer with zero delay. Entries fire in deadline
//! order, FIFO among equal deadlines, and always run with no scheduler borrow
//! held so a callback may freely schedule or cancel further work.
//!
//! The scheduler never advances time itself; it reads an injected [`Clock`].
//! Tests pair it with a [`FakeClock`](crate::clock::FakeClock) and call
//! [`Scheduler::run_due`] after each advance; production code drives it with
//! the `tangle-runtime` driver.

use crate::clock::Clock;
use std::cell::RefCell;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Handle to a scheduled timer, used for cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct TimerEntry {
    fire_at: Instant,
    seq: u64,
    run: Box<dyn FnOnce()>,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Min-heap: earliest first, FIFO among equal deadlines
        Reverse((self.fire_at, self.seq)).cmp(&Reverse((other.fire_at, other.seq)))
    }
}

struct SchedulerInner {
    timers: BinaryHeap<TimerEntry>,
    cancelled: HashSet<u64>,
    next_seq: u64,
}

/// Single-threaded callback scheduler
///
/// Clones share the same queue; every primitive in this crate holds one.
#[derive(Clone)]
pub struct Scheduler {
    inner: Rc<RefCell<SchedulerInner>>,
    clock: Rc<dyn Clock>,
}

impl Scheduler {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SchedulerInner {
                timers: BinaryHeap::new(),
                cancelled: HashSet::new(),
                next_seq: 0,
            })),
            clock: Rc::new(clock),
        }
    }

    /// Current time as seen by this scheduler's clock
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Schedule a callback for the next tick
    pub fn defer(&self, f: impl FnOnce() + 'static) {
        self.schedule_after(Duration::ZERO, f);
    }

    /// Schedule a callback to run after `delay`
    pub fn schedule_after(&self, delay: Duration, f: impl FnOnce() + 'static) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.timers.push(TimerEntry {
            fire_at: self.clock.now() + delay,
            seq,
            run: Box::new(f),
        });
        TimerId(seq)
    }

    /// Cancel a pending timer; a no-op if it already fired
    pub fn cancel(&self, id: TimerId) {
        let mut inner = self.inner.borrow_mut();
        if inner.timers.iter().any(|e| e.seq == id.0) {
            inner.cancelled.insert(id.0);
        }
    }

    /// Run every callback due at the current clock reading, including
    /// callbacks they schedule that come due immediately
    pub fn run_due(&self) {
        while let Some(task) = self.pop_due() {
            task();
        }
    }

    /// Earliest pending (non-cancelled) deadline, if any
    pub fn next_deadline(&self) -> Option<Instant> {
        let inner = self.inner.borrow();
        inner
            .timers
            .iter()
            .filter(|e| !inner.cancelled.contains(&e.seq))
            .map(|e| e.fire_at)
            .min()
    }

    /// True when no live timers remain
    pub fn is_idle(&self) -> bool {
        self.next_deadline().is_none()
    }

    fn pop_due(&self) -> Option<Box<dyn FnOnce()>> {
        let now = self.clock.now();
        let mut inner = self.inner.borrow_mut();
        loop {
            match inner.timers.peek() {
                Some(entry) if entry.fire_at <= now => {}
                _ => return None,
            }
            let entry = inner.timers.pop()?;
            // Skip cancelled entries
            if inner.cancelled.remove(&entry.seq) {
                continue;
            }
            return Some(entry.run);
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
