use std::cell::{Cell, RefCell};
use std::rc::Rc;

use repose_hooks::Value;
use smallvec::SmallVec;

use crate::runtime::{current_host, remember};
use crate::scope::on_unmount;

pub type Deps = SmallVec<[Value; 4]>;

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    pub fn noop() -> Self {
        Self(Rc::new(RefCell::new(None)))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }
}

#[derive(Default)]
struct EffectSlot {
    /// Deps of the last effect that actually ran.
    last_deps: Rc<RefCell<Option<Deps>>>,
    cleanup: Rc<RefCell<Option<Dispose>>>,
    installed: Cell<bool>,
}

/// Runs `effect` after the render commits.
///
/// With `Some(deps)` the effect re-runs only on commits where `deps` differ
/// from the previous render's; `Some(&[])` runs once. `None` runs after every
/// commit. The previous cleanup runs before each re-run and on unmount.
pub fn use_effect(deps: Option<&[Value]>, effect: impl FnOnce() -> Dispose + 'static) {
    let slot = remember(EffectSlot::default);

    if !slot.installed.replace(true) {
        let cleanup = slot.cleanup.clone();
        on_unmount(move || {
            let d = cleanup.borrow_mut().take();
            if let Some(d) = d {
                d.run();
            }
        });
    }

    let next: Option<Deps> = deps.map(|d| d.iter().cloned().collect());
    let changed = match (&*slot.last_deps.borrow(), &next) {
        (Some(prev), Some(next)) => prev != next,
        _ => true,
    };
    if !changed {
        return;
    }
    let cleanup = slot.cleanup.clone();
    let last_deps = slot.last_deps.clone();
    let run = move || {
        let prev = cleanup.borrow_mut().take();
        if let Some(prev) = prev {
            prev.run();
        }
        *last_deps.borrow_mut() = next;
        let d = effect();
        *cleanup.borrow_mut() = Some(d);
    };

    match current_host() {
        Some(host) => host.pending_effects.borrow_mut().push(Box::new(run)),
        None => {
            log::warn!("use_effect called outside a mounted root; running immediately");
            run();
        }
    }
}
