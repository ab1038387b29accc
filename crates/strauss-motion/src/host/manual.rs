//! Deterministic scheduler driven by a virtual clock
//!
//! Nothing fires on its own: the owner advances the clock and collects due
//! timers and pending frames, then feeds them back as host events.

use std::collections::HashMap;

use super::{Scheduler, VisibilityOptions};
use crate::types::{ElementId, ObserverId, TaskId};

#[derive(Clone, Debug)]
struct Watcher {
    options: VisibilityOptions,
    targets: Vec<ElementId>,
}

/// [`Scheduler`] with a manually advanced clock
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: f64,
    next_task: TaskId,
    next_observer: ObserverId,
    /// (due time, task) in scheduling order
    timers: Vec<(f64, TaskId)>,
    frames: Vec<TaskId>,
    watchers: HashMap<ObserverId, Watcher>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self {
            next_task: 1,
            next_observer: 1,
            ..Default::default()
        }
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to it
    ///
    /// Timers due at the same instant come out in scheduling order.
    pub fn pop_due(&mut self, until: f64) -> Option<TaskId> {
        let (index, &(due, task)) = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= until)
            .min_by(|(ia, (da, _)), (ib, (db, _))| da.total_cmp(db).then(ia.cmp(ib)))?;
        self.timers.remove(index);
        if due > self.now {
            self.now = due;
        }
        Some(task)
    }

    /// Move the clock forward without firing anything
    pub fn advance_clock_to(&mut self, time: f64) {
        if time > self.now {
            self.now = time;
        }
    }

    /// Drain the frame requests made so far
    pub fn take_frames(&mut self) -> Vec<TaskId> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// When a pending timer will fire
    pub fn due_time(&self, task: TaskId) -> Option<f64> {
        self.timers
            .iter()
            .find(|(_, t)| *t == task)
            .map(|(due, _)| *due)
    }

    /// Elements watched by `observer`
    pub fn observed(&self, observer: ObserverId) -> &[ElementId] {
        self.watchers
            .get(&observer)
            .map(|w| w.targets.as_slice())
            .unwrap_or(&[])
    }

    pub fn observer_options(&self, observer: ObserverId) -> Option<&VisibilityOptions> {
        self.watchers.get(&observer).map(|w| &w.options)
    }

    fn next_task_id(&mut self) -> TaskId {
        let id = self.next_task;
        self.next_task += 1;
        id
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.now
    }

    fn schedule_after(&mut self, delay_ms: f64) -> TaskId {
        let task = self.next_task_id();
        // setTimeout clamps negative and NaN delays to zero
        let delay = if delay_ms.is_finite() && delay_ms > 0.0 {
            delay_ms
        } else {
            0.0
        };
        self.timers.push((self.now + delay, task));
        task
    }

    fn schedule_next_frame(&mut self) -> TaskId {
        let task = self.next_task_id();
        self.frames.push(task);
        task
    }

    fn create_observer(&mut self, options: &VisibilityOptions) -> ObserverId {
        let id = self.next_observer;
        self.next_observer += 1;
        self.watchers.insert(
            id,
            Watcher {
                options: options.clone(),
                targets: Vec::new(),
            },
        );
        id
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        if let Some(watcher) = self.watchers.get_mut(&observer) {
            if !watcher.targets.contains(&element) {
                watcher.targets.push(element);
            }
        }
    }

    fn cancel(&mut self, task: TaskId) {
        self.timers.retain(|(_, t)| *t != task);
        self.frames.retain(|t| *t != task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timers_fire_in_due_order() {
        let mut sched = ManualScheduler::new();
        let late = sched.schedule_after(500.0);
        let early = sched.schedule_after(100.0);

        assert_eq!(sched.pop_due(1000.0), Some(early));
        assert_eq!(sched.now(), 100.0);
        assert_eq!(sched.pop_due(1000.0), Some(late));
        assert_eq!(sched.now(), 500.0);
        assert_eq!(sched.pop_due(1000.0), None);
    }

    #[test]
    fn test_same_instant_keeps_scheduling_order() {
        let mut sched = ManualScheduler::new();
        let a = sched.schedule_after(10.0);
        let b = sched.schedule_after(10.0);
        assert_eq!(sched.pop_due(10.0), Some(a));
        assert_eq!(sched.pop_due(10.0), Some(b));
    }

    #[test]
    fn test_timer_not_due_yet() {
        let mut sched = ManualScheduler::new();
        let task = sched.schedule_after(2000.0);
        assert_eq!(sched.pop_due(1999.0), None);
        assert_eq!(sched.due_time(task), Some(2000.0));
    }

    #[test]
    fn test_cancel_timer_and_frame() {
        let mut sched = ManualScheduler::new();
        let timer = sched.schedule_after(10.0);
        let frame = sched.schedule_next_frame();
        sched.cancel(timer);
        sched.cancel(frame);
        assert_eq!(sched.pending_timers(), 0);
        assert_eq!(sched.pending_frames(), 0);
        // Cancelling twice is harmless
        sched.cancel(timer);
    }

    #[test]
    fn test_negative_delay_clamped() {
        let mut sched = ManualScheduler::new();
        let task = sched.schedule_after(-5.0);
        assert_eq!(sched.due_time(task), Some(0.0));
    }

    #[test]
    fn test_observer_registration() {
        let mut sched = ManualScheduler::new();
        let options = VisibilityOptions {
            threshold: 0.1,
            root_margin: "0px".to_string(),
        };
        let observer = sched.create_observer(&options);
        sched.observe(observer, 7);
        sched.observe(observer, 7);
        sched.observe(observer, 9);

        assert_eq!(sched.observed(observer), &[7, 9]);
        assert_eq!(sched.observer_options(observer), Some(&options));
        assert!(sched.observed(99).is_empty());
    }
}
