use thiserror::Error;

/// Failure raised by a hook, a component, or a callable prop.
///
/// The fold never wraps these: whatever a hook returns as `Err` is what the
/// caller of `render` receives.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Failed(String),

    /// A value that is not a `Value::Callback` was invoked.
    #[error("value of type `{found}` is not callable")]
    NotCallable { found: &'static str },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HookError {
    pub fn failed(msg: impl Into<String>) -> Self {
        Self::Failed(msg.into())
    }
}
