use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::{HookError, Record, Value};

pub type HookResult = Result<Value, HookError>;

/// A named step of the fold.
///
/// The name only matters when the hook returns something other than a
/// record: the result is then stored under that name.
#[derive(Clone)]
pub struct Hook {
    name: Cow<'static, str>,
    func: Rc<dyn Fn(&Record) -> HookResult>,
}

impl Hook {
    pub fn new<F, V>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Record) -> V + 'static,
        V: Into<Value>,
    {
        Self {
            name: name.into(),
            func: Rc::new(move |props| Ok(f(props).into())),
        }
    }

    /// A hook that may fail. An `Err` aborts the rest of the fold.
    pub fn fallible<F>(name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&Record) -> HookResult + 'static,
    {
        Self {
            name: name.into(),
            func: Rc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, props: &Record) -> HookResult {
        (self.func)(props)
    }

    /// Records pass through; anything else becomes `{ name: value }`.
    pub fn normalize(&self, raw: Value) -> Record {
        match raw.into_record() {
            Ok(record) => record,
            Err(other) => {
                let mut r = Record::new();
                r.insert(self.name.clone().into_owned(), other);
                r
            }
        }
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hook").field("name", &self.name).finish()
    }
}

/// Wraps a function as a [`Hook`] named after its identifier.
///
/// `hook!(use_x)` takes a `Fn(&Record) -> impl Into<Value>`; `hook!(use_x?)`
/// takes a `Fn(&Record) -> HookResult`.
#[macro_export]
macro_rules! hook {
    ($f:ident ?) => {
        $crate::Hook::fallible(stringify!($f), $f)
    };
    ($f:ident) => {
        $crate::Hook::new(stringify!($f), $f)
    };
}

/// `hooks![use_a, use_b]` is `vec![hook!(use_a), hook!(use_b)]`.
#[macro_export]
macro_rules! hooks {
    () => {
        ::std::vec::Vec::<$crate::Hook>::new()
    };
    ($($f:ident),+ $(,)?) => {
        ::std::vec![$($crate::hook!($f)),+]
    };
}
