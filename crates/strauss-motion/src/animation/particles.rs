//! Floating particle system
//!
//! Particles live in a `.particles` container inside the hero. Each one
//! carries randomized CSS animation parameters and removes itself once its
//! animation has run (duration + delay). A periodic check tops the live
//! count back up to the target, one particle per tick.

use std::collections::HashMap;

use tracing::debug;

use crate::config::ParticleConfig;
use crate::host::{Page, Scheduler};
use crate::style::js_number;
use crate::types::{ElementId, TaskId};

pub const HERO_SELECTOR: &str = ".hero";
pub const CONTAINER_CLASS: &str = "particles";
pub const PARTICLE_CLASS: &str = "particle";

/// Randomized parameters of one particle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleParams {
    /// Edge length (px)
    pub size: f64,
    /// Horizontal offset (% of container width)
    pub left: f64,
    /// Animation duration (s)
    pub duration: f64,
    /// Animation delay (s)
    pub delay: f64,
}

impl ParticleParams {
    /// Draw independent samples for every parameter
    pub fn random(rng: &mut fastrand::Rng, config: &ParticleConfig) -> Self {
        Self {
            size: config.size_px.sample(rng.f64()),
            left: config.left_percent.sample(rng.f64()),
            duration: config.duration_s.sample(rng.f64()),
            delay: config.delay_s.sample(rng.f64()),
        }
    }

    /// Time until the particle should be removed (ms)
    pub fn lifetime_ms(&self) -> f64 {
        (self.duration + self.delay) * 1000.0
    }

    /// Inline style block for the particle element
    pub fn css_text(&self) -> String {
        format!(
            "width: {size}px; height: {size}px; left: {left}%; animation-duration: {duration}s; animation-delay: {delay}s;",
            size = js_number(self.size),
            left = js_number(self.left),
            duration = js_number(self.duration),
            delay = js_number(self.delay),
        )
    }
}

/// Particle spawner and recycler
#[derive(Debug)]
pub struct ParticleSystem {
    config: ParticleConfig,
    rng: fastrand::Rng,
    container: Option<ElementId>,
    /// Live particles in spawn order
    particles: Vec<ElementId>,
    /// Replenishment check timer
    spawn_check: Option<TaskId>,
    /// Removal timers
    expiries: HashMap<TaskId, ElementId>,
}

impl ParticleSystem {
    pub fn new(config: ParticleConfig, rng: fastrand::Rng) -> Self {
        Self {
            config,
            rng,
            container: None,
            particles: Vec::new(),
            spawn_check: None,
            expiries: HashMap::new(),
        }
    }

    /// Create the container, fill it and start replenishing
    ///
    /// Does nothing on pages without a hero section.
    pub fn setup<P: Page, S: Scheduler>(&mut self, page: &mut P, scheduler: &mut S) {
        let Some(hero) = page.query(HERO_SELECTOR) else {
            debug!("no hero section, particles disabled");
            return;
        };

        let container = page.create_element("div");
        page.set_class_name(container, CONTAINER_CLASS);
        page.append_child(hero, container);
        self.container = Some(container);

        for _ in 0..self.config.target_count {
            self.spawn(page, scheduler);
        }

        self.spawn_check = Some(scheduler.schedule_after(self.config.spawn_interval_ms));
    }

    pub fn container(&self) -> Option<ElementId> {
        self.container
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[ElementId] {
        &self.particles
    }

    /// Add one particle and schedule its removal
    pub fn spawn<P: Page, S: Scheduler>(&mut self, page: &mut P, scheduler: &mut S) -> Option<ElementId> {
        let container = self.container?;
        let params = ParticleParams::random(&mut self.rng, &self.config);

        let particle = page.create_element("div");
        page.set_class_name(particle, PARTICLE_CLASS);
        page.set_css_text(particle, &params.css_text());
        page.append_child(container, particle);
        self.particles.push(particle);

        let expiry = scheduler.schedule_after(params.lifetime_ms());
        self.expiries.insert(expiry, particle);

        debug!(particle, lifetime_ms = params.lifetime_ms(), "particle spawned");
        Some(particle)
    }

    /// Handle a timer owned by the particle system; false for foreign tasks
    pub fn on_timer<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        task: TaskId,
    ) -> bool {
        if self.spawn_check == Some(task) {
            if self.particles.len() < self.config.target_count {
                self.spawn(page, scheduler);
            }
            self.spawn_check = Some(scheduler.schedule_after(self.config.spawn_interval_ms));
            return true;
        }

        if let Some(particle) = self.expiries.remove(&task) {
            self.expire(page, particle);
            return true;
        }

        false
    }

    fn expire<P: Page>(&mut self, page: &mut P, particle: ElementId) {
        // Already detached by someone else: leave the list alone
        if page.parent(particle).is_none() {
            return;
        }
        page.remove(particle);
        if let Some(index) = self.particles.iter().position(|&p| p == particle) {
            self.particles.remove(index);
        }
        debug!(particle, live = self.particles.len(), "particle expired");
    }

    /// Cancel the replenishment check and every pending removal
    pub fn cancel_all<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.spawn_check.take() {
            scheduler.cancel(task);
        }
        for (task, _) in self.expiries.drain() {
            scheduler.cancel(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualScheduler, MemoryPage};

    fn hero_page() -> (MemoryPage, ElementId) {
        let mut page = MemoryPage::new();
        let body = page.body();
        let hero = page.insert(body, "section", "hero");
        (page, hero)
    }

    #[test]
    fn test_setup_spawns_target_count() {
        let (mut page, hero) = hero_page();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(7));

        system.setup(&mut page, &mut sched);

        let container = system.container().unwrap();
        assert_eq!(page.parent(container), Some(hero));
        assert!(page.has_class(container, "particles"));
        assert_eq!(system.live_count(), 20);
        assert_eq!(page.query_all(".particles .particle").len(), 20);
        // 20 expiries plus the replenishment check
        assert_eq!(sched.pending_timers(), 21);
    }

    #[test]
    fn test_setup_without_hero_is_noop() {
        let mut page = MemoryPage::new();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(7));

        system.setup(&mut page, &mut sched);

        assert!(system.container().is_none());
        assert_eq!(system.live_count(), 0);
        assert_eq!(sched.pending_timers(), 0);
        assert!(system.spawn(&mut page, &mut sched).is_none());
    }

    #[test]
    fn test_particle_style_encodes_params() {
        let (mut page, _) = hero_page();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(3));
        system.setup(&mut page, &mut sched);

        let particle = system.particles()[0];
        let width = page.style(particle, "width");
        assert_eq!(width, page.style(particle, "height"));
        let size: f64 = width.trim_end_matches("px").parse().unwrap();
        assert!((2.0..8.0).contains(&size));

        let duration: f64 = page
            .style(particle, "animation-duration")
            .trim_end_matches('s')
            .parse()
            .unwrap();
        assert!((10.0..20.0).contains(&duration));
    }

    #[test]
    fn test_replenishment_skips_when_full() {
        let (mut page, _) = hero_page();
        let mut sched = ManualScheduler::new();
        let config = ParticleConfig {
            // Long lifetimes so nothing expires during the test
            duration_s: crate::config::Range::new(100.0, 101.0),
            ..ParticleConfig::default()
        };
        let mut system = ParticleSystem::new(config, fastrand::Rng::with_seed(1));
        system.setup(&mut page, &mut sched);

        let check = sched.pop_due(2000.0).unwrap();
        assert!(system.on_timer(&mut page, &mut sched, check));
        assert_eq!(system.live_count(), 20);
    }

    #[test]
    fn test_expiry_removes_and_replenishes() {
        let (mut page, _) = hero_page();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(11));
        system.setup(&mut page, &mut sched);

        let originals: Vec<ElementId> = system.particles().to_vec();

        // Originals live under 25s; the check keeps topping up after that
        while let Some(task) = sched.pop_due(30_000.0) {
            assert!(system.on_timer(&mut page, &mut sched, task));
            assert!(system.live_count() <= 20);
        }

        assert!(originals.iter().all(|p| !system.particles().contains(p)));
        assert!(system.live_count() > 0);
        assert_eq!(page.query_all(".particle").len(), system.live_count());
    }

    #[test]
    fn test_expiry_of_detached_particle_is_guarded() {
        let (mut page, _) = hero_page();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(5));
        system.setup(&mut page, &mut sched);

        let particle = system.particles()[0];
        page.remove(particle);
        system.expire(&mut page, particle);

        // Detached elsewhere, so the list is left as is
        assert_eq!(system.live_count(), 20);
    }

    #[test]
    fn test_cancel_all() {
        let (mut page, _) = hero_page();
        let mut sched = ManualScheduler::new();
        let mut system = ParticleSystem::new(ParticleConfig::default(), fastrand::Rng::with_seed(5));
        system.setup(&mut page, &mut sched);

        system.cancel_all(&mut sched);
        assert_eq!(sched.pending_timers(), 0);
    }

    #[test]
    fn test_css_text_format() {
        let params = ParticleParams {
            size: 4.0,
            left: 50.5,
            duration: 12.0,
            delay: 0.0,
        };
        assert_eq!(
            params.css_text(),
            "width: 4px; height: 4px; left: 50.5%; animation-duration: 12s; animation-delay: 0s;"
        );
        assert_eq!(params.lifetime_ms(), 12_000.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Randomized parameters stay inside their configured ranges
        #[test]
        fn params_within_ranges(seed in any::<u64>()) {
            let config = ParticleConfig::default();
            let mut rng = fastrand::Rng::with_seed(seed);
            let params = ParticleParams::random(&mut rng, &config);

            prop_assert!(config.size_px.contains(params.size));
            prop_assert!(config.left_percent.contains(params.left));
            prop_assert!(config.duration_s.contains(params.duration));
            prop_assert!(config.delay_s.contains(params.delay));
            prop_assert!(params.lifetime_ms() >= 10_000.0);
            prop_assert!(params.lifetime_ms() < 25_000.0);
        }
    }
}
