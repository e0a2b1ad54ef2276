//! # Composing hooks into props
//!
//! A hook is a named function from the current props to either a partial
//! record or a single value. `compose` runs an ordered list of them and merges
//! what they return; `compose_hooks` binds that fold to a component so the
//! component receives the merged record as its props.
//!
//! ```rust
//! use repose_hooks::*;
//!
//! fn use_one(_: &Record) -> Record {
//!     record! { "a" => 4 }
//! }
//! fn use_two(_: &Record) -> Record {
//!     record! { "b" => 2 }
//! }
//! fn use_add(props: &Record) -> Record {
//!     let a = props.get("a").and_then(Value::as_int).unwrap_or(0);
//!     let b = props.get("b").and_then(Value::as_int).unwrap_or(0);
//!     record! { "sum" => a + b }
//! }
//!
//! let props = compose(&hooks![use_one, use_two, use_add], &Record::new()).unwrap();
//! assert_eq!(props, record! { "a" => 4, "b" => 2, "sum" => 6 });
//! ```
//!
//! ## Precedence
//!
//! - Keys passed in by the caller always win.
//! - Among hook results, the **first** hook to produce a key wins; later hooks
//!   can read it but not replace it.
//! - A hook returning anything but a `Value::Record` contributes
//!   `{ hook_name: value }`.
//!
//! State, effects and context are not part of this crate. Hooks that need them
//! call into whatever host runs the render (see `repose-hooks-runtime`).

pub mod binder;
pub mod compose;
pub mod error;
pub mod hook;
#[cfg(feature = "serde")]
pub mod json;
pub mod record;
pub mod tests;
pub mod value;

pub use binder::{Component, ComposeHooks, Composed, compose_hooks};
pub use compose::{Compose, compose};
pub use error::HookError;
pub use hook::{Hook, HookResult};
pub use record::Record;
pub use value::{Callback, Value};
