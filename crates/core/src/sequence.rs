// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step-sequencing state machines for dispatcher tasks
//!
//! Two conventions for running an ordered list of steps as one task:
//!
//! - node-style: each step receives a [`Next`] handle plus the previous
//!   step's error and value, and either returns a value synchronously or
//!   advances later through the handle;
//! - chained: each step receives a fresh sub-future and the previous value,
//!   and advances by resolving the sub-future.
//!
//! Both resolve the task's overall future when the list is exhausted or a
//! step fails.

use crate::error::TaskError;
use crate::future::{Future, TaskValue};
use crate::scheduler::Scheduler;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One node-style step
///
/// Arguments are the advance handle, the error forwarded by the previous
/// step (non-halting sequences only) and the previous step's value. The
/// return value selects the advance mode: `Ok(Some(v))` advances with `v`
/// immediately, `Ok(None)` promises a later [`Next::advance`] call, `Err`
/// fails the step.
pub type SequenceStep =
    Box<dyn FnOnce(&Next, Option<TaskError>, Option<TaskValue>) -> Result<Option<TaskValue>, TaskError>>;

/// One chained step: resolves the given sub-future to advance
pub type ChainStep = Box<dyn FnOnce(&Future, Option<TaskValue>)>;

struct SequenceState {
    steps: RefCell<VecDeque<SequenceStep>>,
    halt_on_error: bool,
    future: Future,
}

/// Advance handle for a node-style step that finishes asynchronously
///
/// Call [`Next::advance`] exactly once per step that returned `Ok(None)`.
#[derive(Clone)]
pub struct Next {
    state: Rc<SequenceState>,
}

impl Next {
    /// Move the sequence to the next step with this step's outcome
    pub fn advance(&self, err: Option<TaskError>, value: Option<TaskValue>) {
        run_steps(&self.state, err, value);
    }
}

/// Drive a node-style sequence to completion or to its first suspension
pub(crate) fn run_node_sequence(future: &Future, steps: Vec<SequenceStep>, halt_on_error: bool) {
    if steps.is_empty() {
        future.set_value(true);
        return;
    }
    let state = Rc::new(SequenceState {
        steps: RefCell::new(steps.into()),
        halt_on_error,
        future: future.clone(),
    });
    run_steps(&state, None, None);
}

fn run_steps(state: &Rc<SequenceState>, err: Option<TaskError>, value: Option<TaskValue>) {
    let mut err = err;
    let mut value = value;
    loop {
        let step = state.steps.borrow_mut().pop_front();
        let Some(step) = step else {
            match err {
                Some(e) => state.future.set_error(e),
                None => state.future.set(Ok(value.unwrap_or(TaskValue::Null))),
            }
            return;
        };

        let next = Next { state: state.clone() };
        match step(&next, err.take(), value.take()) {
            Ok(Some(v)) => value = Some(v),
            // The step advances later through its handle
            Ok(None) => return,
            Err(e) if state.halt_on_error => {
                state.future.set_error(e);
                return;
            }
            Err(e) => err = Some(e),
        }
    }
}

struct ChainState {
    scheduler: Scheduler,
    steps: RefCell<VecDeque<ChainStep>>,
    future: Future,
}

/// Drive a chained sequence: each step gets a fresh sub-future to resolve
pub(crate) fn run_chain(scheduler: &Scheduler, future: &Future, steps: Vec<ChainStep>) {
    if steps.is_empty() {
        future.set_value(true);
        return;
    }
    let state = Rc::new(ChainState {
        scheduler: scheduler.clone(),
        steps: RefCell::new(steps.into()),
        future: future.clone(),
    });
    chain_step(state, None);
}

fn chain_step(state: Rc<ChainState>, prev: Option<TaskValue>) {
    if state.future.is_set() {
        tracing::warn!("chain interrupted, its future was resolved externally");
        return;
    }

    let step = state.steps.borrow_mut().pop_front();
    let Some(step) = step else {
        state.future.set(Ok(prev.unwrap_or(TaskValue::Null)));
        return;
    };

    let sub = Future::new(&state.scheduler);
    {
        let state = state.clone();
        sub.wait_for_set(move |resolved| match resolved.value() {
            Some(Err(e)) => state.future.set_error(e),
            Some(Ok(v)) => {
                let state = state.clone();
                let scheduler = state.scheduler.clone();
                scheduler.defer(move || chain_step(state, Some(v)));
            }
            None => {}
        });
    }
    step(&sub, prev);
}

#[cfg(test)]
#[path = "sequence_tests.rs"]
mod tests;
