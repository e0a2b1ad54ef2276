use std::any::Any;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use crate::scope::Scope;
use crate::timers::Timers;

thread_local! {
    static CURRENT_HOST: RefCell<Option<Rc<Host>>> = const { RefCell::new(None) };
}

/// Slot storage for one mounted root.
#[derive(Default)]
pub(crate) struct Composer {
    pub slots: Vec<Box<dyn Any>>,
    pub cursor: usize,
    pub keyed_slots: HashMap<String, Box<dyn Any>>,
}

/// Everything a mounted root owns that hooks reach through the thread-local.
pub(crate) struct Host {
    pub composer: RefCell<Composer>,
    pub dirty: Cell<bool>,
    pub pending_effects: RefCell<Vec<Box<dyn FnOnce()>>>,
    pub timers: RefCell<Timers>,
    pub scope: Scope,
}

impl Host {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            composer: RefCell::new(Composer::default()),
            dirty: Cell::new(false),
            pending_effects: RefCell::new(Vec::new()),
            timers: RefCell::new(Timers::default()),
            scope: Scope::new(),
        })
    }

    pub fn invalidate(&self) {
        if !self.dirty.replace(true) {
            log::trace!("root invalidated");
        }
    }
}

/// Installs a host as current until dropped; nests.
pub(crate) struct HostGuard {
    prev: Option<Rc<Host>>,
}

impl HostGuard {
    pub fn enter(host: &Rc<Host>) -> Self {
        let prev = CURRENT_HOST.with(|h| h.borrow_mut().replace(host.clone()));
        HostGuard { prev }
    }

    /// Enters `host` and rewinds its slot cursor for a fresh render pass.
    pub fn begin_render(host: &Rc<Host>) -> Self {
        host.composer.borrow_mut().cursor = 0;
        Self::enter(host)
    }
}

impl Drop for HostGuard {
    fn drop(&mut self) {
        let prev = self.prev.take();
        CURRENT_HOST.with(|h| *h.borrow_mut() = prev);
    }
}

pub(crate) fn current_host() -> Option<Rc<Host>> {
    CURRENT_HOST.with(|h| h.borrow().clone())
}

pub(crate) fn current_host_weak() -> Weak<Host> {
    current_host().map(|h| Rc::downgrade(&h)).unwrap_or_default()
}

/// True while a root is rendering, running effects, or firing timers.
pub fn in_render() -> bool {
    CURRENT_HOST.with(|h| h.borrow().is_some())
}

/// Slot-based remember: the Nth call in a render gets the Nth slot.
///
/// Outside a mounted root there is nowhere to keep the value, so `init` runs
/// every time.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Rc<T> {
    let Some(host) = current_host() else {
        log::warn!("remember called outside a mounted root; value will not persist");
        return Rc::new(init());
    };
    // Reserve the slot, then release the borrow so `init` may call hooks.
    let index = {
        let mut c = host.composer.borrow_mut();
        let cursor = c.cursor;
        c.cursor += 1;
        match c.slots.get(cursor) {
            Some(slot) => match slot.downcast_ref::<Rc<T>>() {
                Some(rc) => return rc.clone(),
                None => {
                    log::warn!(
                        "remember: slot {} type changed; replacing. \
                         Hooks must run in the same order on every render.",
                        cursor
                    );
                    cursor
                }
            },
            None => {
                // Placeholder keeps positions stable for hooks called by `init`.
                c.slots.push(Box::new(()));
                c.slots.len() - 1
            }
        }
    };

    let rc: Rc<T> = Rc::new(init());
    host.composer.borrow_mut().slots[index] = Box::new(rc.clone());
    rc
}

/// Key-based remember, stable across conditional hooks.
pub fn remember_with_key<T: 'static>(key: impl Into<String>, init: impl FnOnce() -> T) -> Rc<T> {
    let key = key.into();
    let Some(host) = current_host() else {
        log::warn!("remember_with_key('{key}') called outside a mounted root");
        return Rc::new(init());
    };
    if let Some(existing) = host.composer.borrow().keyed_slots.get(&key) {
        if let Some(rc) = existing.downcast_ref::<Rc<T>>() {
            return rc.clone();
        }
        log::warn!(
            "remember_with_key: key '{}' reused with a different type; replacing.",
            key
        );
    }

    let rc: Rc<T> = Rc::new(init());
    host.composer
        .borrow_mut()
        .keyed_slots
        .insert(key, Box::new(rc.clone()));
    rc
}
