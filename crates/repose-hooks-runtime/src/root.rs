use std::rc::Rc;
use std::time::Duration;

use repose_hooks::{Component, Record};

use crate::error::RenderError;
use crate::runtime::{Host, HostGuard};
use crate::view::View;

#[derive(Clone, Debug)]
pub struct RootConfig {
    /// Render passes allowed per commit before giving up with
    /// `RenderError::RenderLoop`.
    pub max_rerenders: usize,
    /// Run queued effects after each render pass. When off, call
    /// `Root::flush_effects` yourself.
    pub flush_effects: bool,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            max_rerenders: 25,
            flush_effects: true,
        }
    }
}

/// A mounted component: owns its slots, state, effects and clock, and keeps
/// the last rendered view.
pub struct Root {
    host: Rc<Host>,
    component: Box<dyn Component<Output = View>>,
    props: Record,
    view: View,
    config: RootConfig,
    renders: usize,
}

impl Root {
    pub fn mount(
        component: impl Component<Output = View> + 'static,
        props: Record,
    ) -> Result<Self, RenderError> {
        Self::with_config(component, props, RootConfig::default())
    }

    pub fn with_config(
        component: impl Component<Output = View> + 'static,
        props: Record,
        config: RootConfig,
    ) -> Result<Self, RenderError> {
        let mut root = Self {
            host: Host::new(),
            component: Box::new(component),
            props,
            view: View::empty(),
            config,
            renders: 0,
        };
        root.commit()?;
        Ok(root)
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn find(&self, id: &str) -> Option<&View> {
        self.view.find(id)
    }

    pub fn find_all_by_class(&self, class: &str) -> Vec<&View> {
        self.view.find_all_by_class(class)
    }

    pub fn props(&self) -> &Record {
        &self.props
    }

    /// Total render passes since mount.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.host.timers.borrow().now()
    }

    pub fn pending_timers(&self) -> usize {
        self.host.timers.borrow().pending()
    }

    pub fn is_dirty(&self) -> bool {
        self.host.dirty.get()
    }

    pub fn set_props(&mut self, props: Record) -> Result<(), RenderError> {
        self.props = props;
        self.commit()
    }

    /// Re-renders even if nothing changed.
    pub fn rerender(&mut self) -> Result<(), RenderError> {
        self.commit()
    }

    /// Moves the clock forward by `by`, firing due timers in order. The root
    /// re-renders after any timer that leaves it dirty.
    pub fn advance(&mut self, by: Duration) -> Result<(), RenderError> {
        let deadline = self.now() + by;
        loop {
            let task = self.host.timers.borrow_mut().pop_due(deadline);
            let Some(task) = task else { break };
            {
                let _guard = HostGuard::enter(&self.host);
                task()?;
            }
            if self.host.dirty.get() {
                self.commit()?;
            }
        }
        self.host.timers.borrow_mut().settle_at(deadline);
        self.settle().map(|_| ())
    }

    /// Re-renders if state was written since the last commit, e.g. by a
    /// setter called from outside any render. Returns whether it rendered.
    pub fn settle(&mut self) -> Result<bool, RenderError> {
        if !self.host.dirty.get() {
            return Ok(false);
        }
        self.commit()?;
        Ok(true)
    }

    /// Runs effects queued by past renders; returns how many ran.
    pub fn flush_effects(&mut self) -> usize {
        let _guard = HostGuard::enter(&self.host);
        let mut ran = 0;
        loop {
            let batch = std::mem::take(&mut *self.host.pending_effects.borrow_mut());
            if batch.is_empty() {
                break;
            }
            ran += batch.len();
            for effect in batch {
                effect();
            }
        }
        if ran > 0 {
            log::debug!("flushed {ran} effects");
        }
        ran
    }

    /// Runs every unmount cleanup.
    pub fn unmount(self) {
        self.dispose();
    }

    fn dispose(&self) {
        let _guard = HostGuard::enter(&self.host);
        self.host.scope.dispose();
    }

    fn render_once(&mut self) -> Result<(), RenderError> {
        self.host.dirty.set(false);
        let rendered = {
            let _guard = HostGuard::begin_render(&self.host);
            self.component.render(&self.props)
        };
        let view = match rendered {
            Ok(view) => view,
            Err(err) => {
                // Effects queued by a render that never committed must not run.
                let dropped = std::mem::take(&mut *self.host.pending_effects.borrow_mut());
                log::debug!("render failed; dropping {} queued effects", dropped.len());
                return Err(err.into());
            }
        };
        self.renders += 1;
        log::debug!("render pass {}", self.renders);
        self.view = view;
        Ok(())
    }

    /// Renders until no state write is pending, flushing effects in between.
    fn commit(&mut self) -> Result<(), RenderError> {
        let mut passes = 0;
        loop {
            self.render_once()?;
            passes += 1;
            if self.config.flush_effects {
                self.flush_effects();
            }
            if !self.host.dirty.get() {
                return Ok(());
            }
            if passes >= self.config.max_rerenders {
                log::warn!("render did not settle after {passes} passes");
                return Err(RenderError::RenderLoop { passes });
            }
        }
    }
}

impl Drop for Root {
    fn drop(&mut self) {
        self.dispose();
    }
}
