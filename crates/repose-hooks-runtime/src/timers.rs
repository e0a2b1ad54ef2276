use std::time::Duration;

use repose_hooks::HookError;

use crate::runtime::current_host;

pub type TimerTask = Box<dyn FnOnce() -> Result<(), HookError>>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

struct Timer {
    id: TimerId,
    due: Duration,
    task: TimerTask,
}

/// Virtual clock and pending timeouts of one root. Time only moves when the
/// root is advanced.
#[derive(Default)]
pub(crate) struct Timers {
    now: Duration,
    next_id: u64,
    pending: Vec<Timer>,
}

impl Timers {
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn schedule(&mut self, delay: Duration, task: TimerTask) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            due: self.now + delay,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        before != self.pending.len()
    }

    /// Pops the earliest timer due at or before `deadline`, moving the clock
    /// to its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerTask> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(_, t)| (t.due, t.id.0))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(idx);
        self.now = self.now.max(timer.due);
        Some(timer.task)
    }

    pub fn settle_at(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// Schedules `task` on the current root's clock. Errors from the task surface
/// from `Root::advance`.
///
/// Returns `None` outside a mounted root.
pub fn set_timeout(
    delay: Duration,
    task: impl FnOnce() -> Result<(), HookError> + 'static,
) -> Option<TimerId> {
    let Some(host) = current_host() else {
        log::warn!("set_timeout called outside a mounted root; task dropped");
        return None;
    };
    let id = host.timers.borrow_mut().schedule(delay, Box::new(task));
    log::trace!("scheduled timer {id:?} in {delay:?}");
    Some(id)
}

pub fn clear_timeout(id: TimerId) -> bool {
    current_host().is_some_and(|h| h.timers.borrow_mut().cancel(id))
}
