//! Minimal single-threaded observable cells for the store's public state.
//!
//! This is the explicit publish-subscribe seam between the store and the
//! presentation layer: each mutable field is a [`StateCell`] the UI can read
//! and subscribe to, with no framework reactivity primitive involved.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

type Observer<T> = Rc<dyn Fn(&T)>;

struct CellState<T> {
    value: T,
    next_observer_id: u64,
    observers: Vec<(u64, Observer<T>)>,
}

/// Observable value cell on the single-threaded UI runtime.
///
/// Cloning a cell clones the handle, not the value: all clones share state
/// and observers. Writes notify observers synchronously, after the new value
/// is in place; observers receive a snapshot and may freely read or write
/// any cell, including the one that notified them.
pub struct StateCell<T> {
    inner: Rc<RefCell<CellState<T>>>,
}

impl<T> Clone for StateCell<T> {
    fn clone(&self) -> Self {
        Self { inner: self.inner.clone() }
    }
}

impl<T: Clone + 'static> StateCell<T> {
    /// Creates a cell holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CellState {
                value,
                next_observer_id: 0,
                observers: Vec::new(),
            })),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Runs `f` against the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Replaces the value and notifies observers.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Registers an observer called after every write.
    ///
    /// The observer stays registered until the returned [`Subscription`] is
    /// dropped.
    pub fn subscribe(&self, observer: impl Fn(&T) + 'static) -> Subscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_observer_id;
            state.next_observer_id += 1;
            state.observers.push((id, Rc::new(observer)));
            id
        };
        let weak = Rc::downgrade(&self.inner);
        Subscription {
            cancel: Some(Box::new(move || unsubscribe(&weak, id))),
        }
    }

    fn notify(&self) {
        // Snapshot value and observers so callbacks can re-enter this cell.
        let (value, observers) = {
            let state = self.inner.borrow();
            let observers: Vec<Observer<T>> =
                state.observers.iter().map(|(_, observer)| observer.clone()).collect();
            (state.value.clone(), observers)
        };
        for observer in observers {
            observer(&value);
        }
    }
}

fn unsubscribe<T>(weak: &Weak<RefCell<CellState<T>>>, id: u64) {
    if let Some(inner) = weak.upgrade() {
        inner.borrow_mut().observers.retain(|(observer_id, _)| *observer_id != id);
    }
}

/// Handle keeping one [`StateCell`] observer registered; drop to detach.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}
