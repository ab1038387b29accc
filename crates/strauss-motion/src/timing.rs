//! Rate limiting helpers
//!
//! Both helpers own the timer that governs them, so the caller only needs
//! to forward timer events with [`Throttle::on_timer`] /
//! [`Debounce::on_timer`].

use crate::host::Scheduler;
use crate::types::TaskId;

/// Runs an action at most once per `limit_ms`
///
/// The first call runs immediately and starts a release timer; calls made
/// before the timer fires are dropped.
#[derive(Clone, Debug)]
pub struct Throttle {
    limit_ms: f64,
    release: Option<TaskId>,
}

impl Throttle {
    pub fn new(limit_ms: f64) -> Self {
        Self {
            limit_ms,
            release: None,
        }
    }

    /// Whether calls are currently being dropped
    pub fn is_throttled(&self) -> bool {
        self.release.is_some()
    }

    /// Run `action` unless throttled; returns whether it ran
    pub fn call<S: Scheduler>(&mut self, scheduler: &mut S, action: impl FnOnce()) -> bool {
        if self.release.is_some() {
            return false;
        }
        action();
        self.release = Some(scheduler.schedule_after(self.limit_ms));
        true
    }

    /// Consume the release timer; returns false for foreign tasks
    pub fn on_timer(&mut self, task: TaskId) -> bool {
        if self.release == Some(task) {
            self.release = None;
            true
        } else {
            false
        }
    }

    /// Cancel the pending release timer, if any
    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.release.take() {
            scheduler.cancel(task);
        }
    }
}

/// Delays an action until calls stop for `wait_ms`
#[derive(Clone, Debug)]
pub struct Debounce {
    wait_ms: f64,
    pending: Option<TaskId>,
}

impl Debounce {
    pub fn new(wait_ms: f64) -> Self {
        Self {
            wait_ms,
            pending: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Restart the wait
    pub fn call<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.pending.take() {
            scheduler.cancel(task);
        }
        self.pending = Some(scheduler.schedule_after(self.wait_ms));
    }

    /// Returns true when `task` is the surviving timer and the action should run
    pub fn on_timer(&mut self, task: TaskId) -> bool {
        if self.pending == Some(task) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.pending.take() {
            scheduler.cancel(task);
        }
    }
}
