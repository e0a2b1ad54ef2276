use std::rc::Rc;

use crate::{Hook, HookError, Record};

/// Folds `hooks` over `input`, left to right.
///
/// Each hook sees the accumulator with `input` laid over it. Its result is
/// normalized to a record and merged *under* the accumulator, so a key
/// introduced by an earlier hook is never replaced by a later one, and a key
/// of `input` is never replaced at all.
///
/// The first hook to fail aborts the fold and its error is returned as is.
pub fn compose(hooks: &[Hook], input: &Record) -> Result<Record, HookError> {
    let mut acc = input.clone();

    for hook in hooks {
        let view = acc.overlay(input);
        let raw = match hook.call(&view) {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("hook `{}` failed, aborting fold: {e}", hook.name());
                return Err(e);
            }
        };
        let normalized = hook.normalize(raw);
        log::trace!(
            "hook `{}` produced keys {:?}",
            hook.name(),
            normalized.keys().collect::<Vec<_>>()
        );
        acc = Record::union([&normalized, &acc, input]);
    }

    Ok(acc)
}

/// A reusable, cheaply cloneable hook sequence.
#[derive(Clone, Default)]
pub struct Compose {
    hooks: Rc<[Hook]>,
}

impl Compose {
    pub fn new(hooks: impl IntoIterator<Item = Hook>) -> Self {
        Self {
            hooks: hooks.into_iter().collect(),
        }
    }

    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn apply(&self, input: &Record) -> Result<Record, HookError> {
        compose(&self.hooks, input)
    }
}

impl std::fmt::Debug for Compose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.hooks.iter().map(Hook::name))
            .finish()
    }
}

impl FromIterator<Hook> for Compose {
    fn from_iter<I: IntoIterator<Item = Hook>>(iter: I) -> Self {
        Self::new(iter)
    }
}
