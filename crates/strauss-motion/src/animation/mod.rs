//! Landing page animations
//!
//! [`AnimationController`] owns every decorative effect:
//!
//! - [`reveal`]: one-shot reveal of sections as they scroll into view
//! - [`particles`]: floating particles in the hero
//! - [`typewriter`]: the hero title typing itself out
//! - [`hover`]: button lift and image parallax
//! - [`logo`]: text fallback for a broken logo image
//!
//! The controller holds no host references. Each entry point borrows the
//! page and scheduler for the duration of one event.

pub mod hover;
pub mod logo;
pub mod particles;
pub mod reveal;
pub mod typewriter;

use std::collections::HashMap;

use tracing::debug;

use crate::config::MotionConfig;
use crate::host::{EventKind, Page, Scheduler, VisibilityEntry};
use crate::types::{ElementId, ObserverId, TaskId};

use hover::HoverEffects;
use logo::LogoFallback;
use particles::ParticleSystem;
use reveal::Reveal;
use typewriter::Typewriter;

/// Name of the reveal watcher in the observer registry
pub const MAIN_OBSERVER: &str = "main";

/// Owner of the decorative effects
#[derive(Debug)]
pub struct AnimationController {
    /// Visibility watchers by name
    observers: HashMap<&'static str, ObserverId>,
    reveal: Reveal,
    particles: ParticleSystem,
    typewriter: Typewriter,
    hover: HoverEffects,
    logo: LogoFallback,
}

impl AnimationController {
    /// Wire every effect against the page
    pub fn new<P: Page, S: Scheduler>(page: &mut P, scheduler: &mut S, config: &MotionConfig) -> Self {
        Self::with_rng(page, scheduler, config, fastrand::Rng::new())
    }

    /// Like [`new`](Self::new) with a caller-supplied particle RNG
    pub fn with_rng<P: Page, S: Scheduler>(
        page: &mut P,
        scheduler: &mut S,
        config: &MotionConfig,
        rng: fastrand::Rng,
    ) -> Self {
        let mut controller = Self {
            observers: HashMap::new(),
            reveal: Reveal::new(config.reveal.clone()),
            particles: ParticleSystem::new(config.particles.clone(), rng),
            typewriter: Typewriter::new(config.typewriter.clone()),
            hover: HoverEffects::new(config.parallax.clone()),
            logo: LogoFallback::new(),
        };

        let main = controller.reveal.setup(page, scheduler);
        controller.observers.insert(MAIN_OBSERVER, main);
        controller.particles.setup(page, scheduler);
        controller.typewriter.setup(page, scheduler);
        controller.hover.setup(page);
        controller.logo.setup(page);

        debug!(
            reveal_targets = controller.reveal.targets().len(),
            particles = controller.particles.live_count(),
            "animation controller ready"
        );
        controller
    }

    pub fn observer(&self, name: &str) -> Option<ObserverId> {
        self.observers.get(name).copied()
    }

    pub fn reveal(&self) -> &Reveal {
        &self.reveal
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    pub fn hover(&self) -> &HoverEffects {
        &self.hover
    }

    /// Route a timer; false if no effect owns it
    pub fn on_timer<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        task: TaskId,
    ) -> bool {
        self.particles.on_timer(page, scheduler, task)
            || self.typewriter.on_timer(page, scheduler, task)
    }

    /// Route an animation frame; false if no effect owns it
    pub fn on_frame<P: Page>(&mut self, page: &mut P, task: TaskId) -> bool {
        self.hover.on_frame(page, task)
    }

    /// Route visibility changes from one of our watchers
    pub fn on_visibility<P: Page>(
        &mut self,
        page: &mut P,
        observer: ObserverId,
        entries: &[VisibilityEntry],
    ) -> bool {
        if self.observer(MAIN_OBSERVER) != Some(observer) {
            return false;
        }
        self.reveal.on_visibility(page, entries);
        true
    }

    pub fn on_scroll<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.hover.on_scroll(scheduler);
    }

    /// Route a pointer or image event on an element
    pub fn on_element_event<P: Page>(&mut self, page: &mut P, element: ElementId, kind: EventKind) -> bool {
        match kind {
            EventKind::MouseEnter | EventKind::MouseLeave => self.hover.on_pointer(page, element, kind),
            EventKind::Load | EventKind::Error => self.logo.on_image_event(page, element, kind),
            _ => false,
        }
    }

    /// Cancel every timer and frame the effects still have pending
    pub fn cancel_all<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.particles.cancel_all(scheduler);
        self.typewriter.cancel(scheduler);
        self.hover.cancel(scheduler);
    }
}
