//! Button hover lift and image parallax

use crate::config::ParallaxConfig;
use crate::host::{EventKind, EventTarget, Page, Scheduler};
use crate::style::translate_y_px;
use crate::types::{ElementId, TaskId};

pub const BUTTON_SELECTOR: &str = ".btn";
pub const PARALLAX_SELECTOR: &str = ".section-img, .hero-img";
pub const BUTTON_LIFT: &str = "translateY(-2px)";

/// Hover and parallax handlers
#[derive(Debug)]
pub struct HoverEffects {
    config: ParallaxConfig,
    buttons: Vec<ElementId>,
    /// Pending parallax frame; at most one at a time
    frame: Option<TaskId>,
}

impl HoverEffects {
    pub fn new(config: ParallaxConfig) -> Self {
        Self {
            config,
            buttons: Vec::new(),
            frame: None,
        }
    }

    /// Listen for pointer enter/leave on every button and for window scroll
    pub fn setup<P: Page>(&mut self, page: &mut P) {
        self.buttons = page.query_all(BUTTON_SELECTOR);
        for &button in &self.buttons {
            page.listen(EventTarget::Element(button), EventKind::MouseEnter);
            page.listen(EventTarget::Element(button), EventKind::MouseLeave);
        }
        page.listen(EventTarget::Window, EventKind::Scroll);
    }

    /// Lift or settle a button; false if `element` is not a button
    pub fn on_pointer<P: Page>(&self, page: &mut P, element: ElementId, kind: EventKind) -> bool {
        if !self.buttons.contains(&element) {
            return false;
        }
        match kind {
            EventKind::MouseEnter => page.set_style(element, "transform", BUTTON_LIFT),
            EventKind::MouseLeave => page.set_style(element, "transform", ""),
            _ => return false,
        }
        true
    }

    /// Request a parallax frame unless one is already pending
    pub fn on_scroll<S: Scheduler>(&mut self, scheduler: &mut S) {
        if self.frame.is_none() {
            self.frame = Some(scheduler.schedule_next_frame());
        }
    }

    pub fn is_frame_pending(&self) -> bool {
        self.frame.is_some()
    }

    /// Apply the parallax offset to visible images; false for foreign frames
    pub fn on_frame<P: Page>(&mut self, page: &mut P, task: TaskId) -> bool {
        if self.frame != Some(task) {
            return false;
        }

        let scrolled = page.scroll_y();
        let viewport_height = page.viewport_height();
        let offset = translate_y_px(-(scrolled * self.config.speed));

        for image in page.query_all(PARALLAX_SELECTOR) {
            if page.bounding_rect(image).intersects_viewport(viewport_height) {
                page.set_style(image, "transform", &offset);
            }
        }

        self.frame = None;
        true
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.frame.take() {
            scheduler.cancel(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualScheduler, MemoryPage};
    use crate::types::Rect;

    #[test]
    fn test_button_lift_and_settle() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let button = page.insert(body, "a", "btn btn-primary");
        let mut hover = HoverEffects::new(ParallaxConfig::default());
        hover.setup(&mut page);

        assert!(page.is_listening(EventTarget::Element(button), EventKind::MouseEnter));
        assert!(hover.on_pointer(&mut page, button, EventKind::MouseEnter));
        assert_eq!(page.style(button, "transform"), "translateY(-2px)");
        assert!(hover.on_pointer(&mut page, button, EventKind::MouseLeave));
        assert_eq!(page.style(button, "transform"), "");
    }

    #[test]
    fn test_non_button_pointer_ignored() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let div = page.insert(body, "div", "card");
        let mut hover = HoverEffects::new(ParallaxConfig::default());
        hover.setup(&mut page);

        assert!(!hover.on_pointer(&mut page, div, EventKind::MouseEnter));
    }

    #[test]
    fn test_single_frame_in_flight() {
        let mut sched = ManualScheduler::new();
        let mut hover = HoverEffects::new(ParallaxConfig::default());

        hover.on_scroll(&mut sched);
        hover.on_scroll(&mut sched);
        hover.on_scroll(&mut sched);
        assert_eq!(sched.pending_frames(), 1);
        assert!(hover.is_frame_pending());
    }

    #[test]
    fn test_parallax_only_moves_visible_images() {
        let mut page = MemoryPage::new();
        let mut sched = ManualScheduler::new();
        let body = page.body();
        let visible = page.insert(body, "img", "section-img");
        let hero = page.insert(body, "img", "hero-img");
        let below = page.insert(body, "img", "section-img");
        page.set_dimensions(4000.0, 800.0);
        page.set_bounding_rect(visible, Rect::new(100.0, 500.0));
        page.set_bounding_rect(hero, Rect::new(-200.0, 50.0));
        page.set_bounding_rect(below, Rect::new(900.0, 1300.0));
        page.scroll_to(300.0);

        let mut hover = HoverEffects::new(ParallaxConfig::default());
        hover.on_scroll(&mut sched);
        let frame = sched.take_frames()[0];
        assert!(hover.on_frame(&mut page, frame));

        assert_eq!(page.style(visible, "transform"), "translateY(-30px)");
        assert_eq!(page.style(hero, "transform"), "translateY(-30px)");
        assert_eq!(page.style(below, "transform"), "");
        assert!(!hover.is_frame_pending());

        // The next scroll may request a new frame
        hover.on_scroll(&mut sched);
        assert_eq!(sched.pending_frames(), 1);
    }
}
