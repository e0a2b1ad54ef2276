pub use crate::effects::{Deps, Dispose, use_effect};
pub use crate::error::RenderError;
pub use crate::locals::{Context, provide, use_context};
pub use crate::root::{Root, RootConfig};
pub use crate::runtime::{in_render, remember, remember_with_key};
pub use crate::scope::{Scope, current_scope, on_unmount};
pub use crate::state::{StateHandle, remember_state, use_state, use_state_typed};
pub use crate::timers::{TimerId, clear_timeout, set_timeout};
pub use crate::view::{View, ViewKind};
pub use repose_hooks::{
    Callback, Component, Hook, HookError, HookResult, Record, Value, compose, compose_hooks, hook,
    hooks, record,
};
