// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Multicast notification channel
//!
//! A [`Signal`] fans an emission out to registered listeners: persistent
//! listeners stay until removed, one-shot listeners are cleared after every
//! emission. Delivery order is persistent listeners in registration order,
//! then one-shots in registration order.

use std::cell::RefCell;
use std::rc::Rc;

/// Handle for removing a persistent listener
///
/// The original removed listeners by function identity; closures have no
/// identity here, so registration returns a token instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

type Listener<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct SignalInner<T> {
    listeners: Vec<(ListenerId, Listener<T>)>,
    once: Vec<Box<dyn FnOnce(&T)>>,
    next_id: u64,
}

/// Multicast channel notifying registered listeners on [`Signal::emit`]
pub struct Signal<T> {
    inner: Rc<RefCell<SignalInner<T>>>,
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SignalInner {
                listeners: Vec::new(),
                once: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Register a persistent listener
    pub fn add_listener(&self, f: impl FnMut(&T) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(f))));
        id
    }

    /// Register a persistent listener ahead of all existing ones
    pub fn add_listener_in_front(&self, f: impl FnMut(&T) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.insert(0, (id, Rc::new(RefCell::new(f))));
        id
    }

    /// Register a listener called on the next emission only
    pub fn add_listener_once(&self, f: impl FnOnce(&T) + 'static) {
        self.inner.borrow_mut().once.push(Box::new(f));
    }

    /// Remove a previously registered persistent listener
    pub fn remove_listener(&self, id: ListenerId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(lid, _)| *lid != id);
    }

    /// Remove every listener, persistent and one-shot
    pub fn remove_all_listeners(&self) {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.clear();
        inner.once.clear();
    }

    pub fn listener_count(&self) -> usize {
        let inner = self.inner.borrow();
        inner.listeners.len() + inner.once.len()
    }

    /// Notify all listeners, clearing one-shots afterwards
    ///
    /// Listeners run with no internal borrow held, so a listener may register
    /// or remove listeners, or emit again. A listener whose body re-emits this
    /// signal is not re-entered by the nested emission.
    pub fn emit(&self, arg: &T) {
        let (persistent, once) = {
            let mut inner = self.inner.borrow_mut();
            let persistent: Vec<Listener<T>> =
                inner.listeners.iter().map(|(_, l)| Rc::clone(l)).collect();
            let once = std::mem::take(&mut inner.once);
            (persistent, once)
        };

        for listener in persistent {
            if let Ok(mut f) = listener.try_borrow_mut() {
                f(arg);
            }
        }
        for f in once {
            f(arg);
        }
    }
}

#[cfg(test)]
#[path = "signal_tests.rs"]
mod tests;
