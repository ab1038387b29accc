//! Application root
//!
//! [`StraussApp`] owns the host capabilities and every controller. The host
//! delivers callbacks as [`HostEvent`]s through [`StraussApp::dispatch`];
//! nothing else mutates controller state.

pub mod nav;
pub mod scroll_effects;
pub mod splash;

use tracing::{info, trace};

use crate::animation::AnimationController;
use crate::config::MotionConfig;
use crate::error::MotionResult;
use crate::host::{
    EventKind, EventOutcome, EventTarget, HostEvent, ManualScheduler, Page, Scheduler,
    VisibilityEntry,
};
use crate::timing::Throttle;
use crate::types::{ObserverId, TaskId};

use nav::Navigation;
use scroll_effects::ScrollEffects;
use splash::Splash;

/// Landing page application
#[derive(Debug)]
pub struct StraussApp<P: Page, S: Scheduler> {
    page: P,
    scheduler: S,
    config: MotionConfig,
    animations: AnimationController,
    navigation: Navigation,
    scroll_effects: ScrollEffects,
    splash: Splash,
    /// Rate-limited window scroll hook
    scroll_throttle: Throttle,
}

impl<P: Page, S: Scheduler> StraussApp<P, S> {
    /// Validate `config` and wire every effect against the page
    pub fn new(page: P, scheduler: S, config: MotionConfig) -> MotionResult<Self> {
        Self::with_rng(page, scheduler, config, fastrand::Rng::new())
    }

    /// Like [`new`](Self::new) with a seeded particle RNG
    pub fn with_rng(
        mut page: P,
        mut scheduler: S,
        config: MotionConfig,
        rng: fastrand::Rng,
    ) -> MotionResult<Self> {
        config.validate()?;

        page.listen(EventTarget::Window, EventKind::Scroll);
        let scroll_throttle = Throttle::new(config.scroll_throttle_ms);

        let animations = AnimationController::with_rng(&mut page, &mut scheduler, &config, rng);

        let mut navigation = Navigation::new(config.navigation.clone());
        navigation.setup(&mut page);
        let mut scroll_effects = ScrollEffects::new(config.header.clone());
        scroll_effects.setup(&mut page);
        let mut splash = Splash::new(config.splash.clone());
        splash.setup(&mut page);

        info!("Strauss Lifting Platforms landing page ready");

        Ok(Self {
            page,
            scheduler,
            config,
            animations,
            navigation,
            scroll_effects,
            splash,
            scroll_throttle,
        })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn animations(&self) -> &AnimationController {
        &self.animations
    }

    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    pub fn scroll_effects(&self) -> &ScrollEffects {
        &self.scroll_effects
    }

    pub fn splash(&self) -> &Splash {
        &self.splash
    }

    /// Whether the DOM event behind `event` must have its default action
    /// cancelled, decided before [`dispatch`](Self::dispatch) runs
    ///
    /// Hosts apply this ahead of dispatching so the answer holds even when
    /// the handler fails.
    pub fn prevents_default(&self, event: &HostEvent) -> bool {
        match *event {
            HostEvent::Dom {
                target: EventTarget::Element(element),
                kind: EventKind::Click,
            } => self.navigation.prevents_default(element),
            _ => false,
        }
    }

    /// Route one host callback to the controllers
    ///
    /// Errors come from lookups the page script never guarded (header,
    /// nav menu); other handlers for the same event still run.
    pub fn dispatch(&mut self, event: HostEvent) -> MotionResult<EventOutcome> {
        match event {
            HostEvent::Timer(task) => {
                self.on_timer(task);
                Ok(EventOutcome::default())
            }
            HostEvent::Frame { task, timestamp } => {
                self.on_frame(task, timestamp);
                Ok(EventOutcome::default())
            }
            HostEvent::Visibility { observer, entries } => {
                self.on_visibility(observer, &entries);
                Ok(EventOutcome::default())
            }
            HostEvent::Dom {
                target: EventTarget::Window,
                kind,
            } => self.on_window_event(kind),
            HostEvent::Dom {
                target: EventTarget::Element(element),
                kind: EventKind::Click,
            } => self
                .navigation
                .on_click(&mut self.page, &mut self.scheduler, element),
            HostEvent::Dom {
                target: EventTarget::Element(element),
                kind,
            } => {
                self.animations
                    .on_element_event(&mut self.page, element, kind);
                Ok(EventOutcome::default())
            }
        }
    }

    fn on_timer(&mut self, task: TaskId) {
        let handled = self
            .animations
            .on_timer(&mut self.page, &mut self.scheduler, task)
            || self
                .splash
                .on_timer(&mut self.page, &mut self.scheduler, task)
            || self.scroll_throttle.on_timer(task);
        if !handled {
            trace!(task, "timer with no owner");
        }
    }

    fn on_frame(&mut self, task: TaskId, timestamp: f64) {
        let handled = self.animations.on_frame(&mut self.page, task)
            || self
                .navigation
                .on_frame(&mut self.page, &mut self.scheduler, task, timestamp);
        if !handled {
            trace!(task, "frame with no owner");
        }
    }

    fn on_visibility(&mut self, observer: ObserverId, entries: &[VisibilityEntry]) {
        if !self
            .animations
            .on_visibility(&mut self.page, observer, entries)
        {
            trace!(observer, "visibility change from unknown observer");
        }
    }

    fn on_window_event(&mut self, kind: EventKind) -> MotionResult<EventOutcome> {
        match kind {
            EventKind::Scroll => {
                self.scroll_throttle
                    .call(&mut self.scheduler, || trace!("throttled scroll"));
                self.animations.on_scroll(&mut self.scheduler);
                self.scroll_effects.on_scroll(&mut self.page)?;
            }
            EventKind::Load => self.splash.on_load(&mut self.scheduler),
            _ => {}
        }
        Ok(EventOutcome::default())
    }

    /// Cancel every pending timer and frame
    pub fn shutdown(&mut self) {
        self.animations.cancel_all(&mut self.scheduler);
        self.navigation.cancel(&mut self.scheduler);
        self.splash.cancel(&mut self.scheduler);
        self.scroll_throttle.cancel(&mut self.scheduler);
        info!("landing page effects stopped");
    }
}

impl<P: Page> StraussApp<P, ManualScheduler> {
    /// Fire every timer due within the next `ms`, in due order
    pub fn advance(&mut self, ms: f64) -> MotionResult<()> {
        let until = self.scheduler.now() + ms;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.dispatch(HostEvent::Timer(task))?;
        }
        self.scheduler.advance_clock_to(until);
        Ok(())
    }

    /// Deliver the frames requested so far, stamped with the current time
    ///
    /// Returns how many frames ran. Frames requested while running are left
    /// for the next call.
    pub fn run_frames(&mut self) -> MotionResult<usize> {
        let timestamp = self.scheduler.now();
        let frames = self.scheduler.take_frames();
        for &task in &frames {
            self.dispatch(HostEvent::Frame { task, timestamp })?;
        }
        Ok(frames.len())
    }
}
