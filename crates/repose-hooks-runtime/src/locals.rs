//! # Context
//!
//! Values provided for the duration of a closure and read by any hook that
//! runs inside it, innermost provider first:
//!
//! ```rust
//! use repose_hooks_runtime::{Context, provide, use_context};
//!
//! let greeting = Context::new("greeting", "hello");
//!
//! assert_eq!(use_context(&greeting), Some("hello"));
//! provide(&greeting, "hi", || {
//!     assert_eq!(use_context(&greeting), Some("hi"));
//! });
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

thread_local! {
    static LOCALS_STACK: RefCell<Vec<HashMap<u64, Box<dyn Any>>>> = const { RefCell::new(Vec::new()) };
}

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Key for a provided value, with an optional fallback.
#[derive(Clone, Debug)]
pub struct Context<T: Clone + 'static> {
    id: u64,
    name: &'static str,
    default: Option<T>,
}

impl<T: Clone + 'static> Context<T> {
    pub fn new(name: &'static str, default: T) -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            name,
            default: Some(default),
        }
    }

    /// A context that reads as `None` when nothing provides it.
    pub fn without_default(name: &'static str) -> Self {
        Self {
            id: NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed),
            name,
            default: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

fn with_locals_frame<R>(f: impl FnOnce() -> R) -> R {
    // pops on unwind too
    struct Guard;
    impl Drop for Guard {
        fn drop(&mut self) {
            LOCALS_STACK.with(|st| {
                st.borrow_mut().pop();
            });
        }
    }
    LOCALS_STACK.with(|st| st.borrow_mut().push(HashMap::new()));
    let _guard = Guard;
    f()
}

fn set_local_boxed(id: u64, v: Box<dyn Any>) {
    LOCALS_STACK.with(|st| {
        if let Some(top) = st.borrow_mut().last_mut() {
            top.insert(id, v);
        }
    });
}

/// Provides `value` for `ctx` while `f` runs.
pub fn provide<T: Clone + 'static, R>(ctx: &Context<T>, value: T, f: impl FnOnce() -> R) -> R {
    with_locals_frame(|| {
        set_local_boxed(ctx.id, Box::new(value));
        f()
    })
}

/// Innermost provided value, else the context default.
pub fn use_context<T: Clone + 'static>(ctx: &Context<T>) -> Option<T> {
    let provided = LOCALS_STACK.with(|st| {
        st.borrow()
            .iter()
            .rev()
            .find_map(|frame| frame.get(&ctx.id)?.downcast_ref::<T>().cloned())
    });
    if provided.is_none() && ctx.default.is_none() {
        log::warn!("context '{}' read with no provider and no default", ctx.name);
    }
    provided.or_else(|| ctx.default.clone())
}
