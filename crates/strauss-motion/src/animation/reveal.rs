//! Reveal-on-scroll
//!
//! Elements matching [`REVEAL_SELECTORS`] are marked `animate-on-scroll`
//! and watched. The first time one becomes visible it gains `animated`
//! plus exactly one effect class. The reveal is one-shot.

use tracing::debug;

use crate::config::RevealConfig;
use crate::host::{Page, Scheduler, VisibilityEntry, VisibilityOptions};
use crate::style;
use crate::types::{ElementId, ObserverId};

/// Elements that reveal on scroll
pub const REVEAL_SELECTORS: [&str; 8] = [
    ".hero-content",
    ".section-title",
    ".section-description",
    ".differential-item",
    ".problem-item",
    ".section-img",
    ".contact-form",
    ".video-container",
];

/// Marker added at setup
pub const PENDING_CLASS: &str = "animate-on-scroll";

/// Marker added on reveal
pub const ANIMATED_CLASS: &str = "animated";

/// Parent class whose children reveal in sequence
pub const STAGGER_PARENT_CLASS: &str = "problem-list";

/// Animation applied when an element is revealed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevealEffect {
    FadeInUp,
    ZoomIn,
    BounceIn,
    FadeInLeft,
    RotateIn,
}

impl RevealEffect {
    /// Every effect, for checks that must see all effect classes
    pub fn all() -> &'static [RevealEffect] {
        &[
            RevealEffect::FadeInUp,
            RevealEffect::ZoomIn,
            RevealEffect::BounceIn,
            RevealEffect::FadeInLeft,
            RevealEffect::RotateIn,
        ]
    }

    /// CSS class carrying the keyframes
    pub fn class_name(&self) -> &'static str {
        match self {
            RevealEffect::FadeInUp => "fade-in-up",
            RevealEffect::ZoomIn => "zoom-in",
            RevealEffect::BounceIn => "bounce-in",
            RevealEffect::FadeInLeft => "fade-in-left",
            RevealEffect::RotateIn => "rotate-in",
        }
    }

    /// Pick the effect for an element with the given class test
    ///
    /// Rules are checked in order; anything unmatched fades in upwards.
    pub fn for_classes(has_class: impl Fn(&str) -> bool) -> Self {
        const RULES: [(&str, RevealEffect); 7] = [
            ("hero-content", RevealEffect::FadeInUp),
            ("section-title", RevealEffect::ZoomIn),
            ("differential-item", RevealEffect::BounceIn),
            ("problem-item", RevealEffect::FadeInLeft),
            ("section-img", RevealEffect::RotateIn),
            ("contact-form", RevealEffect::FadeInUp),
            ("video-container", RevealEffect::ZoomIn),
        ];
        RULES
            .iter()
            .find(|(class, _)| has_class(class))
            .map(|(_, effect)| *effect)
            .unwrap_or(RevealEffect::FadeInUp)
    }
}

/// Reveal-on-scroll state
#[derive(Debug)]
pub struct Reveal {
    config: RevealConfig,
    observer: Option<ObserverId>,
    targets: Vec<ElementId>,
}

impl Reveal {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            observer: None,
            targets: Vec::new(),
        }
    }

    /// Mark and watch every reveal target; returns the watcher
    pub fn setup<P: Page, S: Scheduler>(&mut self, page: &mut P, scheduler: &mut S) -> ObserverId {
        let observer = scheduler.create_observer(&VisibilityOptions {
            threshold: self.config.threshold,
            root_margin: self.config.root_margin.clone(),
        });

        self.targets = page.query_all(&REVEAL_SELECTORS.join(", "));
        for &element in &self.targets {
            page.add_class(element, PENDING_CLASS);
            scheduler.observe(observer, element);
        }
        debug!(count = self.targets.len(), "watching reveal targets");

        self.observer = Some(observer);
        observer
    }

    pub fn observer(&self) -> Option<ObserverId> {
        self.observer
    }

    pub fn targets(&self) -> &[ElementId] {
        &self.targets
    }

    /// Reveal every intersecting entry
    pub fn on_visibility<P: Page>(&mut self, page: &mut P, entries: &[VisibilityEntry]) {
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            self.trigger(page, entry.target);
        }
    }

    /// Reveal one element; a second call is a no-op
    pub fn trigger<P: Page>(&self, page: &mut P, element: ElementId) -> Option<RevealEffect> {
        if page.has_class(element, ANIMATED_CLASS) {
            return None;
        }
        page.add_class(element, ANIMATED_CLASS);

        let effect = RevealEffect::for_classes(|class| page.has_class(element, class));
        page.add_class(element, effect.class_name());

        if let Some(parent) = page.parent(element) {
            if page.has_class(parent, STAGGER_PARENT_CLASS) {
                let index = page
                    .children(parent)
                    .iter()
                    .position(|&child| child == element)
                    .unwrap_or(0);
                let delay = index as f64 * self.config.stagger_s;
                page.set_style(element, "animation-delay", &style::seconds(delay));
            }
        }

        debug!(element, effect = effect.class_name(), "revealed");
        Some(effect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualScheduler, MemoryPage};

    fn effect_of(classes: &[&str]) -> RevealEffect {
        RevealEffect::for_classes(|c| classes.contains(&c))
    }

    #[test]
    fn test_effect_mapping() {
        assert_eq!(effect_of(&["hero-content"]), RevealEffect::FadeInUp);
        assert_eq!(effect_of(&["section-title"]), RevealEffect::ZoomIn);
        assert_eq!(effect_of(&["differential-item"]), RevealEffect::BounceIn);
        assert_eq!(effect_of(&["problem-item"]), RevealEffect::FadeInLeft);
        assert_eq!(effect_of(&["section-img"]), RevealEffect::RotateIn);
        assert_eq!(effect_of(&["contact-form"]), RevealEffect::FadeInUp);
        assert_eq!(effect_of(&["video-container"]), RevealEffect::ZoomIn);
        assert_eq!(effect_of(&["section-description"]), RevealEffect::FadeInUp);
    }

    #[test]
    fn test_first_rule_wins() {
        // A title that is also an image still zooms
        assert_eq!(effect_of(&["section-img", "section-title"]), RevealEffect::ZoomIn);
    }

    #[test]
    fn test_setup_marks_and_observes() {
        let mut page = MemoryPage::new();
        let mut sched = ManualScheduler::new();
        let body = page.body();
        let title = page.insert(body, "h2", "section-title");
        let other = page.insert(body, "p", "plain");

        let mut reveal = Reveal::new(RevealConfig::default());
        let observer = reveal.setup(&mut page, &mut sched);

        assert!(page.has_class(title, PENDING_CLASS));
        assert!(!page.has_class(other, PENDING_CLASS));
        assert_eq!(sched.observed(observer), &[title]);
        let options = sched.observer_options(observer).unwrap();
        assert_eq!(options.threshold, 0.1);
        assert_eq!(options.root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn test_trigger_is_one_shot() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let title = page.insert(body, "h2", "section-title animate-on-scroll");
        let reveal = Reveal::new(RevealConfig::default());

        assert_eq!(reveal.trigger(&mut page, title), Some(RevealEffect::ZoomIn));
        assert_eq!(reveal.trigger(&mut page, title), None);
        assert_eq!(
            page.classes(title),
            vec!["section-title", "animate-on-scroll", "animated", "zoom-in"]
        );
    }

    #[test]
    fn test_staggered_list_delay() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let list = page.insert(body, "ul", "problem-list");
        let items: Vec<_> = (0..4).map(|_| page.insert(list, "li", "problem-item")).collect();
        let reveal = Reveal::new(RevealConfig::default());

        for &item in &items {
            reveal.trigger(&mut page, item);
        }

        assert_eq!(page.style(items[0], "animation-delay"), "0s");
        assert_eq!(page.style(items[1], "animation-delay"), "0.1s");
        assert_eq!(page.style(items[2], "animation-delay"), "0.2s");
        assert_eq!(page.style(items[3], "animation-delay"), "0.30000000000000004s");
    }

    #[test]
    fn test_non_list_parent_has_no_delay() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let grid = page.insert(body, "div", "differentials");
        let item = page.insert(grid, "div", "differential-item");
        let reveal = Reveal::new(RevealConfig::default());

        reveal.trigger(&mut page, item);
        assert_eq!(page.style(item, "animation-delay"), "");
    }

    #[test]
    fn test_non_intersecting_entries_ignored() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let img = page.insert(body, "img", "section-img");
        let mut reveal = Reveal::new(RevealConfig::default());

        reveal.on_visibility(
            &mut page,
            &[VisibilityEntry {
                target: img,
                is_intersecting: false,
            }],
        );
        assert!(!page.has_class(img, ANIMATED_CLASS));
    }
}
