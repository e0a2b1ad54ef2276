use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::runtime::current_host;

/// Cleanups owned by a mounted root, run once on unmount.
#[derive(Clone, Default)]
pub struct Scope {
    inner: Rc<ScopeInner>,
}

#[derive(Default)]
struct ScopeInner {
    disposers: RefCell<Vec<Box<dyn FnOnce()>>>,
    children: RefCell<Vec<Scope>>,
    disposed: Cell<bool>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cleanup. After disposal it runs immediately instead.
    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        if self.inner.disposed.get() {
            disposer();
            return;
        }
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    /// A nested scope disposed together with this one, before its own
    /// disposers. A child of a disposed scope starts out disposed.
    pub fn child(&self) -> Scope {
        let child = Scope::new();
        if self.inner.disposed.get() {
            child.dispose();
        } else {
            self.inner.children.borrow_mut().push(child.clone());
        }
        child
    }

    pub fn is_disposed(&self) -> bool {
        self.inner.disposed.get()
    }

    /// Disposes children first, then runs disposers in registration order.
    /// Later calls do nothing.
    pub fn dispose(&self) {
        if self.inner.disposed.replace(true) {
            return;
        }
        let children = std::mem::take(&mut *self.inner.children.borrow_mut());
        for child in children {
            child.dispose();
        }
        let disposers = std::mem::take(&mut *self.inner.disposers.borrow_mut());
        log::debug!("disposing scope ({} cleanups)", disposers.len());
        for disposer in disposers {
            disposer();
        }
    }
}

pub fn current_scope() -> Option<Scope> {
    current_host().map(|h| h.scope.clone())
}

/// Runs `f` when the current root unmounts. Outside a root, `f` is dropped.
pub fn on_unmount(f: impl FnOnce() + 'static) {
    match current_scope() {
        Some(scope) => scope.add_disposer(f),
        None => log::warn!("on_unmount called outside a mounted root; cleanup dropped"),
    }
}
