// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Condition trees bound to asynchronous work units
//!
//! A [`ParallelCondition`] pairs every work unit with a fresh child condition
//! on an underlying [`ConditionTree`]. [`ParallelCondition::execute`] fans the
//! units out as independent deferred ticks; each unit eventually settles its
//! paired condition and tree short-circuiting resolves the parent as soon as
//! enough children have reported.

use crate::condition::{Condition, ConditionState};
use crate::scheduler::Scheduler;
use crate::tree::{BooleanOperator, ConditionTree, TreeNode};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// A unit of asynchronous work
///
/// Either a callable invoked with its paired condition and its index in the
/// original sequence, or a nested parallel condition whose execution is the
/// work itself.
pub enum WorkUnit {
    Call(Box<dyn FnMut(&Condition, usize)>),
    Nested(ParallelCondition),
}

impl WorkUnit {
    pub fn call(f: impl FnMut(&Condition, usize) + 'static) -> Self {
        WorkUnit::Call(Box::new(f))
    }

    pub fn nested(parallel: ParallelCondition) -> Self {
        WorkUnit::Nested(parallel)
    }
}

#[derive(Clone)]
enum Work {
    Call(Rc<RefCell<Box<dyn FnMut(&Condition, usize)>>>),
    Nested(ParallelCondition),
}

#[derive(Clone)]
struct ParallelUnit {
    work: Work,
    condition: Condition,
}

struct ParallelInner {
    units: Vec<ParallelUnit>,
    timeout: Duration,
}

/// Condition tree whose children are settled by asynchronous work units
#[derive(Clone)]
pub struct ParallelCondition {
    tree: ConditionTree,
    inner: Rc<RefCell<ParallelInner>>,
}

impl ParallelCondition {
    /// Pair each work unit with a fresh child condition
    ///
    /// A zero `timeout` means the tree never times out on its own.
    pub fn new(scheduler: &Scheduler, units: Vec<WorkUnit>, timeout: Duration) -> Self {
        let tree = ConditionTree::new(scheduler);
        let mut paired = Vec::with_capacity(units.len());

        for unit in units {
            let child = Condition::new(scheduler);
            tree.add_condition(child.clone());

            let work = match unit {
                WorkUnit::Call(f) => Work::Call(Rc::new(RefCell::new(f))),
                WorkUnit::Nested(nested) => {
                    // The nested tree reports through its paired child so
                    // short-circuit rules treat it like any other unit
                    let paired_child = child.clone();
                    nested.wait_for_state_change(move |cond| match cond.current_value() {
                        ConditionState::True => paired_child.set_true(),
                        ConditionState::False => paired_child.set_false(),
                        ConditionState::NotSet => {}
                    });
                    Work::Nested(nested)
                }
            };

            paired.push(ParallelUnit {
                work,
                condition: child,
            });
        }

        Self {
            tree,
            inner: Rc::new(RefCell::new(ParallelInner {
                units: paired,
                timeout,
            })),
        }
    }

    /// Start the asynchronous evaluation
    ///
    /// Every unit is scheduled as its own deferred tick with no ordering
    /// guarantee relative to the others.
    pub fn execute(&self) {
        let (units, timeout) = {
            let inner = self.inner.borrow();
            (inner.units.clone(), inner.timeout)
        };

        if timeout > Duration::ZERO {
            self.tree.set_timeout(timeout);
        }

        let scheduler = self.tree.scheduler().clone();
        for (index, unit) in units.into_iter().enumerate() {
            scheduler.defer(move || match &unit.work {
                Work::Call(f) => (f.borrow_mut())(&unit.condition, index),
                Work::Nested(nested) => nested.execute(),
            });
        }
    }

    /// The underlying condition tree
    pub fn tree(&self) -> &ConditionTree {
        &self.tree
    }

    pub fn set_boolean_operator(&self, op: BooleanOperator) {
        self.tree.set_boolean_operator(op);
    }

    pub fn current_value(&self) -> ConditionState {
        self.tree.current_value()
    }

    pub fn is_true(&self) -> bool {
        self.tree.is_true()
    }

    pub fn is_false(&self) -> bool {
        self.tree.is_false()
    }

    pub fn is_not_set(&self) -> bool {
        self.tree.is_not_set()
    }

    /// Reset the tree and every nested parallel condition
    ///
    /// The tree only knows the paired children, so nested instances are
    /// walked here; without this a re-execution would report into a frozen
    /// nested tree.
    pub fn reset(&self) {
        self.tree.reset();
        for unit in self.inner.borrow().units.iter() {
            if let Work::Nested(nested) = &unit.work {
                nested.reset();
            }
        }
    }

    pub fn wait_for_state_change(&self, cb: impl FnMut(&Condition) + 'static) {
        self.tree.wait_for_state_change(cb);
    }

    pub fn wait_for_true(&self, cb: impl FnMut(&Condition) + 'static) {
        self.tree.wait_for_true(cb);
    }

    pub fn wait_for_false(&self, cb: impl FnMut(&Condition) + 'static) {
        self.tree.wait_for_false(cb);
    }

    pub fn wait_for_timeout(&self, cb: impl FnMut(&Condition) + 'static) {
        self.tree.wait_for_timeout(cb);
    }
}

impl From<ParallelCondition> for TreeNode {
    fn from(p: ParallelCondition) -> Self {
        TreeNode::Tree(p.tree.clone())
    }
}

#[cfg(test)]
#[path = "parallel_tests.rs"]
mod tests;
