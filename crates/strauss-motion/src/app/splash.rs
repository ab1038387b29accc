//! Loading splash screen
//!
//! Shown as soon as the app starts; faded out and removed a grace period
//! after the window `load` event.

use tracing::debug;

use crate::config::SplashConfig;
use crate::host::{EventKind, EventTarget, Page, Scheduler};
use crate::style::{LOADING_SCREEN_CSS, LOADING_SCREEN_HTML};
use crate::types::{ElementId, TaskId};

pub const LOADING_SCREEN_CLASS: &str = "loading-screen";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplashPhase {
    /// Overlay visible, waiting for `load`
    Shown,
    /// `load` seen, waiting to start the fade
    Waiting,
    /// Opacity transition running
    Fading,
    Removed,
}

#[derive(Debug)]
pub struct Splash {
    config: SplashConfig,
    screen: Option<ElementId>,
    phase: SplashPhase,
    pending: Option<TaskId>,
}

impl Splash {
    pub fn new(config: SplashConfig) -> Self {
        Self {
            config,
            screen: None,
            phase: SplashPhase::Shown,
            pending: None,
        }
    }

    /// Append the overlay and listen for the window `load` event
    pub fn setup<P: Page>(&mut self, page: &mut P) {
        let screen = page.create_element("div");
        page.set_class_name(screen, LOADING_SCREEN_CLASS);
        page.set_css_text(screen, LOADING_SCREEN_CSS);
        page.set_inner_html(screen, LOADING_SCREEN_HTML);
        let body = page.body();
        page.append_child(body, screen);
        self.screen = Some(screen);

        page.listen(EventTarget::Window, EventKind::Load);
    }

    pub fn screen(&self) -> Option<ElementId> {
        self.screen
    }

    pub fn phase(&self) -> SplashPhase {
        self.phase
    }

    /// Start the pre-fade wait; repeated `load` events are ignored
    pub fn on_load<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.phase != SplashPhase::Shown {
            return;
        }
        self.phase = SplashPhase::Waiting;
        self.pending = Some(scheduler.schedule_after(self.config.pre_fade_ms));
        debug!("page loaded, splash fade scheduled");
    }

    /// Handle the splash timers; false for foreign tasks
    pub fn on_timer<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        task: TaskId,
    ) -> bool {
        if self.pending != Some(task) {
            return false;
        }
        self.pending = None;
        let Some(screen) = self.screen else {
            return true;
        };

        match self.phase {
            SplashPhase::Waiting => {
                page.set_style(screen, "opacity", "0");
                self.phase = SplashPhase::Fading;
                self.pending = Some(scheduler.schedule_after(self.config.fade_ms));
            }
            SplashPhase::Fading => {
                page.remove(screen);
                self.phase = SplashPhase::Removed;
                debug!("splash removed");
            }
            SplashPhase::Shown | SplashPhase::Removed => {}
        }
        true
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.pending.take() {
            scheduler.cancel(task);
        }
    }
}
