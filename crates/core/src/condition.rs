// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tri-state condition with timeout and change notification
//!
//! A [`Condition`] remembers whether an event has happened and whether it was
//! true or false. "Never observed" is a first-class state, distinct from both
//! boolean outcomes. State changes notify registered listeners through an
//! internal [`Signal`]; an optional timeout forces the condition false when it
//! expires before any explicit transition.

use crate::id;
use crate::scheduler::{Scheduler, TimerId};
use crate::signal::Signal;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// The three states a condition can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionState {
    /// The condition has never been met
    NotSet,
    True,
    False,
}

struct ConditionInner {
    id: String,
    state: ConditionState,
    timer: Option<TimerId>,
}

/// Shared-handle tri-state condition
///
/// Clones observe and mutate the same underlying state.
#[derive(Clone)]
pub struct Condition {
    inner: Rc<RefCell<ConditionInner>>,
    state_change: Signal<Condition>,
    timed_out: Signal<Condition>,
    scheduler: Scheduler,
}

impl Condition {
    /// Create a condition in the `NotSet` state with a generated name
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ConditionInner {
                id: id::condition_name(),
                state: ConditionState::NotSet,
                timer: None,
            })),
            state_change: Signal::new(),
            timed_out: Signal::new(),
            scheduler: scheduler.clone(),
        }
    }

    pub fn id(&self) -> String {
        self.inner.borrow().id.clone()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.inner.borrow_mut().id = id.into();
    }

    pub fn current_value(&self) -> ConditionState {
        self.inner.borrow().state
    }

    pub fn is_true(&self) -> bool {
        self.current_value() == ConditionState::True
    }

    pub fn is_false(&self) -> bool {
        self.current_value() == ConditionState::False
    }

    pub fn is_not_set(&self) -> bool {
        self.current_value() == ConditionState::NotSet
    }

    /// Transition to true; a no-op when already true
    pub fn set_true(&self) {
        self.transition(ConditionState::True);
    }

    /// Transition to false; a no-op when already false
    pub fn set_false(&self) {
        self.transition(ConditionState::False);
    }

    /// Return to the `NotSet` state without notifying listeners
    ///
    /// Listeners stay registered and a pending timeout timer keeps running;
    /// only explicit transitions cancel it.
    pub fn set_not_set(&self) {
        self.inner.borrow_mut().state = ConditionState::NotSet;
    }

    /// Alias for [`Condition::set_not_set`]
    pub fn reset(&self) {
        self.set_not_set();
    }

    /// Register a listener for every state change
    pub fn wait_for_state_change(&self, cb: impl FnMut(&Condition) + 'static) {
        self.state_change.add_listener(cb);
    }

    /// Invoke `cb` when the condition is true
    ///
    /// If already true the callback runs on the next tick, never
    /// synchronously. Otherwise it fires on each state change that lands on
    /// true; the registration persists across reset cycles.
    pub fn wait_for_true(&self, mut cb: impl FnMut(&Condition) + 'static) {
        if self.is_true() {
            let me = self.clone();
            self.scheduler.defer(move || cb(&me));
        } else {
            self.state_change.add_listener(move |c| {
                if c.is_true() {
                    cb(c);
                }
            });
        }
    }

    /// Invoke `cb` when the condition is false; see [`Condition::wait_for_true`]
    pub fn wait_for_false(&self, mut cb: impl FnMut(&Condition) + 'static) {
        if self.is_false() {
            let me = self.clone();
            self.scheduler.defer(move || cb(&me));
        } else {
            self.state_change.add_listener(move |c| {
                if c.is_false() {
                    cb(c);
                }
            });
        }
    }

    /// Arm a timer that forces the condition false on expiry
    ///
    /// An explicit transition before expiry cancels the timer. On expiry the
    /// state-change notification precedes the timeout notification.
    pub fn set_timeout(&self, timeout: Duration) {
        if let Some(timer) = self.inner.borrow_mut().timer.take() {
            self.scheduler.cancel(timer);
        }
        let me = self.clone();
        let timer = self.scheduler.schedule_after(timeout, move || me.timer_expired());
        self.inner.borrow_mut().timer = Some(timer);
    }

    /// Register a listener for timeout expiry
    pub fn wait_for_timeout(&self, cb: impl FnMut(&Condition) + 'static) {
        self.timed_out.add_listener(cb);
    }

    /// Permanently silence this condition: clears both notification channels
    pub fn disable(&self) {
        self.state_change.remove_all_listeners();
        self.timed_out.remove_all_listeners();
    }

    fn transition(&self, target: ConditionState) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.state == target {
                return;
            }
            if let Some(timer) = inner.timer.take() {
                self.scheduler.cancel(timer);
            }
            inner.state = target;
        }
        self.state_change.emit(self);
    }

    fn timer_expired(&self) {
        self.inner.borrow_mut().timer = None;
        self.set_false();
        self.timed_out.emit(self);
    }

    pub(crate) fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}

#[cfg(test)]
#[path = "condition_tests.rs"]
mod tests;
