use std::cell::RefCell;
use std::rc::{Rc, Weak};

use repose_hooks::{Callback, Value};

use crate::runtime::{Host, current_host_weak, remember};

/// Remembered cell with no re-render on write.
pub fn remember_state<T: 'static>(init: impl FnOnce() -> T) -> Rc<RefCell<T>> {
    remember(|| RefCell::new(init()))
}

/// Handle to a piece of render state. Writing through it re-renders the root
/// that created it.
pub struct StateHandle<T> {
    cell: Rc<RefCell<T>>,
    host: Weak<Host>,
}

impl<T> Clone for StateHandle<T> {
    fn clone(&self) -> Self {
        Self {
            cell: self.cell.clone(),
            host: self.host.clone(),
        }
    }
}

impl<T: 'static> StateHandle<T> {
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.cell.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.cell.borrow())
    }

    pub fn set(&self, v: T) {
        *self.cell.borrow_mut() = v;
        self.invalidate();
    }

    /// Skips the re-render when `v` equals the current value.
    pub fn set_if_changed(&self, v: T) -> bool
    where
        T: PartialEq,
    {
        if *self.cell.borrow() == v {
            return false;
        }
        self.set(v);
        true
    }

    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.cell.borrow_mut());
        self.invalidate();
    }

    fn invalidate(&self) {
        match self.host.upgrade() {
            Some(host) => host.invalidate(),
            None => log::debug!("state written after its root was dropped"),
        }
    }
}

/// Typed state slot.
pub fn use_state_typed<T: 'static>(init: impl FnOnce() -> T) -> StateHandle<T> {
    StateHandle {
        cell: remember_state(init),
        host: current_host_weak(),
    }
}

/// Untyped state for passing straight through props: returns the current
/// value and a setter whose identity is stable across renders.
///
/// The setter takes one argument. A callback argument is treated as an
/// updater and called with the current value. Setting an equal value does not
/// re-render.
pub fn use_state(init: impl FnOnce() -> Value) -> (Value, Callback) {
    let handle = use_state_typed(init);
    let setter = remember(|| {
        let handle = handle.clone();
        Callback::new(move |args| {
            let arg = args.first().cloned().unwrap_or_default();
            let next = match arg {
                Value::Callback(updater) => updater.call(&[handle.get()])?,
                v => v,
            };
            handle.set_if_changed(next);
            Ok(Value::Null)
        })
    });
    (handle.get(), (*setter).clone())
}
