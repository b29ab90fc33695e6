// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Boolean composition of conditions
//!
//! A [`ConditionTree`] derives its own tri-state value from an ordered set of
//! children under an AND/OR operator, short-circuiting as soon as enough
//! children are known. Once resolved the tree freezes until [`ConditionTree::reset`],
//! which recursively resets every child and re-arms evaluation.

use crate::condition::{Condition, ConditionState};
use crate::scheduler::Scheduler;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Operator applied across a tree's children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BooleanOperator {
    And,
    Or,
}

/// A tree child: either a bare condition or a nested tree
///
/// Closed on purpose; the set of child kinds is decided at construction time
/// and matched exhaustively.
#[derive(Clone)]
pub enum TreeNode {
    Leaf(Condition),
    Tree(ConditionTree),
}

impl TreeNode {
    pub fn current_value(&self) -> ConditionState {
        match self {
            TreeNode::Leaf(c) => c.current_value(),
            TreeNode::Tree(t) => t.current_value(),
        }
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

    pub fn reset(&self) {
        match self {
            TreeNode::Leaf(c) => c.reset(),
            TreeNode::Tree(t) => t.reset(),
        }
    }

    fn wait_for_state_change(&self, cb: impl FnMut(&Condition) + 'static) {
        match self {
            TreeNode::Leaf(c) => c.wait_for_state_change(cb),
            TreeNode::Tree(t) => t.wait_for_state_change(cb),
        }
    }
}

impl From<Condition> for TreeNode {
    fn from(c: Condition) -> Self {
        TreeNode::Leaf(c)
    }
}

impl From<ConditionTree> for TreeNode {
    fn from(t: ConditionTree) -> Self {
        TreeNode::Tree(t)
    }
}

struct TreeInner {
    op: BooleanOperator,
    children: Vec<TreeNode>,
}

/// Boolean condition tree; behaves as a [`Condition`] whose value is derived
/// from its children
#[derive(Clone)]
pub struct ConditionTree {
    base: Condition,
    inner: Rc<RefCell<TreeInner>>,
}

impl ConditionTree {
    /// Create an empty tree with the AND operator
    pub fn new(scheduler: &Scheduler) -> Self {
        Self {
            base: Condition::new(scheduler),
            inner: Rc::new(RefCell::new(TreeInner {
                op: BooleanOperator::And,
                children: Vec::new(),
            })),
        }
    }

    pub fn set_boolean_operator(&self, op: BooleanOperator) {
        self.inner.borrow_mut().op = op;
    }

    pub fn boolean_operator(&self) -> BooleanOperator {
        self.inner.borrow().op
    }

    /// Append a child and subscribe to its state changes
    ///
    /// The tree does not own the child; a condition may belong to several
    /// trees at once.
    pub fn add_condition(&self, child: impl Into<TreeNode>) {
        let node = child.into();
        self.inner.borrow_mut().children.push(node.clone());

        let base = self.base.clone();
        let inner = Rc::downgrade(&self.inner);
        node.wait_for_state_change(move |_| {
            // Frozen until reset once the tree has resolved
            if !base.is_not_set() {
                return;
            }
            let Some(inner) = inner.upgrade() else {
                return;
            };
            let value = evaluate_children(&inner.borrow());
            match value {
                ConditionState::True => base.set_true(),
                ConditionState::False => base.set_false(),
                ConditionState::NotSet => {}
            }
        });
    }

    /// Apply the boolean operator across current child states
    ///
    /// A childless tree evaluates to true under AND (vacuous conjunction) and
    /// false under OR (vacuous disjunction).
    pub fn evaluate(&self) -> ConditionState {
        evaluate_children(&self.inner.borrow())
    }

    /// Reset this tree and, recursively, every child
    pub fn reset(&self) {
        self.base.reset();
        let children = self.inner.borrow().children.clone();
        for child in &children {
            child.reset();
        }
    }

    /// The tree's own condition
    pub fn condition(&self) -> &Condition {
        &self.base
    }

    pub fn id(&self) -> String {
        self.base.id()
    }

    pub fn set_id(&self, id: impl Into<String>) {
        self.base.set_id(id);
    }

    pub fn current_value(&self) -> ConditionState {
        self.base.current_value()
    }

    pub fn is_true(&self) -> bool {
        self.base.is_true()
    }

    pub fn is_false(&self) -> bool {
        self.base.is_false()
    }

    pub fn is_not_set(&self) -> bool {
        self.base.is_not_set()
    }

    pub fn set_true(&self) {
        self.base.set_true();
    }

    pub fn set_false(&self) {
        self.base.set_false();
    }

    pub fn wait_for_state_change(&self, cb: impl FnMut(&Condition) + 'static) {
        self.base.wait_for_state_change(cb);
    }

    pub fn wait_for_true(&self, cb: impl FnMut(&Condition) + 'static) {
        self.base.wait_for_true(cb);
    }

    pub fn wait_for_false(&self, cb: impl FnMut(&Condition) + 'static) {
        self.base.wait_for_false(cb);
    }

    pub fn set_timeout(&self, timeout: Duration) {
        self.base.set_timeout(timeout);
    }

    pub fn wait_for_timeout(&self, cb: impl FnMut(&Condition) + 'static) {
        self.base.wait_for_timeout(cb);
    }

    pub fn disable(&self) {
        self.base.disable();
    }

    pub(crate) fn scheduler(&self) -> &Scheduler {
        self.base.scheduler()
    }
}

fn evaluate_children(tree: &TreeInner) -> ConditionState {
    match tree.op {
        BooleanOperator::And => evaluate_and(&tree.children),
        BooleanOperator::Or => evaluate_or(&tree.children),
    }
}

fn evaluate_and(children: &[TreeNode]) -> ConditionState {
    let mut any_not_set = false;
    for child in children {
        if child.is_false() {
            return ConditionState::False;
        }
        if child.is_not_set() {
            any_not_set = true;
        }
    }
    if any_not_set {
        ConditionState::NotSet
    } else {
        ConditionState::True
    }
}

fn evaluate_or(children: &[TreeNode]) -> ConditionState {
    let mut any_not_set = false;
    for child in children {
        if child.is_true() {
            return ConditionState::True;
        }
        if child.is_not_set() {
            any_not_set = true;
        }
    }
    if any_not_set {
        ConditionState::NotSet
    } else {
        ConditionState::False
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
