use crate::{Compose, Hook, HookError, Record};

/// Anything renderable from a record of props.
pub trait Component {
    type Output;

    fn render(&self, props: &Record) -> Result<Self::Output, HookError>;
}

impl<F, O> Component for F
where
    F: Fn(&Record) -> Result<O, HookError>,
{
    type Output = O;

    fn render(&self, props: &Record) -> Result<O, HookError> {
        self(props)
    }
}

/// A hook sequence waiting for the component it will feed.
#[derive(Clone, Debug, Default)]
pub struct ComposeHooks {
    compose: Compose,
}

/// Starts a binder over `hooks`, in order.
///
/// ```rust
/// use repose_hooks::{Component, HookError, Record, Value, compose_hooks, hooks, record};
///
/// fn use_greeting(props: &Record) -> Record {
///     let text = props.get("text").cloned().unwrap_or_default();
///     record! { "greeting" => format!("Hello, {text}") }
/// }
///
/// let greet = compose_hooks(hooks![use_greeting])
///     .bind(|props: &Record| -> Result<Value, HookError> {
///         Ok(props.get("greeting").cloned().unwrap_or_default())
///     });
///
/// let out = greet.render(&record! { "text" => "world" }).unwrap();
/// assert_eq!(out, Value::from("Hello, world"));
/// ```
pub fn compose_hooks(hooks: impl IntoIterator<Item = Hook>) -> ComposeHooks {
    ComposeHooks {
        compose: Compose::new(hooks),
    }
}

impl ComposeHooks {
    pub fn bind<C: Component>(&self, component: C) -> Composed<C> {
        Composed {
            compose: self.compose.clone(),
            inner: component,
        }
    }

    pub fn compose(&self) -> &Compose {
        &self.compose
    }
}

/// `inner` with the hook fold applied to its props on every render.
#[derive(Clone, Debug)]
pub struct Composed<C> {
    compose: Compose,
    inner: C,
}

impl<C> Composed<C> {
    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }

    pub fn hooks(&self) -> &Compose {
        &self.compose
    }
}

impl<C: Component> Component for Composed<C> {
    type Output = C::Output;

    fn render(&self, props: &Record) -> Result<C::Output, HookError> {
        let merged = self.compose.apply(props)?;
        self.inner.render(&merged.overlay(props))
    }
}
