use repose_hooks::HookError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Hook(#[from] HookError),

    /// State kept changing during commit.
    #[error("render did not settle after {passes} passes")]
    RenderLoop { passes: usize },
}
