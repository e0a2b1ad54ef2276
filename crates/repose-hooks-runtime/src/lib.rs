//! # Host runtime for composed hooks
//!
//! `repose-hooks` only merges records. Hooks that hold state, run effects or
//! read context need something to run inside; this crate is that host, in the
//! same shape as the repose composer:
//!
//! - `remember*`: order-based (or keyed) slots bound to the mounted root.
//! - `use_state`: a value plus a setter; writing re-renders the root.
//! - `use_effect`: runs after commit, re-runs when its deps change, cleans up
//!   on unmount.
//! - `set_timeout`: deferred work on a virtual clock advanced by the caller.
//! - `Context` / `provide` / `use_context`: values scoped to a closure.
//! - `Root`: mounts a component, renders until settled, and exposes the
//!   resulting `View` for queries.
//!
//! ```rust
//! use repose_hooks_runtime::prelude::*;
//!
//! fn use_counter(_: &Record) -> Record {
//!     let (count, set_count) = use_state(|| Value::Int(0));
//!     record! { "count" => count, "set_count" => set_count }
//! }
//!
//! let counter = compose_hooks(hooks![use_counter]).bind(|props: &Record| -> Result<View, HookError> {
//!     let count = props.get("count").cloned().unwrap_or_default();
//!     Ok(View::text(count).id("count"))
//! });
//!
//! let root = Root::mount(counter, Record::new()).unwrap();
//! assert_eq!(root.find("#count").unwrap().text_content(), "0");
//! ```
//!
//! Everything here is single-threaded: roots, state handles and callbacks are
//! `!Send`, and hooks only see a root while it is rendering, flushing effects
//! or firing timers.

pub mod effects;
pub mod error;
pub mod locals;
pub mod prelude;
pub mod root;
pub mod runtime;
pub mod scope;
pub mod state;
pub mod timers;
pub mod view;

pub use effects::*;
pub use error::*;
pub use locals::*;
pub use root::*;
pub use runtime::*;
pub use scope::*;
pub use state::*;
pub use timers::*;
pub use view::*;
