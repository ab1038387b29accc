//! Mobile navigation and in-page links
//!
//! The toggle opens and closes the menu with a staggered link animation.
//! Links scroll smoothly to the section named by their `href`, leaving room
//! for the fixed header.

use std::collections::HashMap;

use tracing::debug;

use crate::config::NavigationConfig;
use crate::error::{MotionError, MotionResult};
use crate::host::{EventKind, EventOutcome, EventTarget, Page, Scheduler};
use crate::style::seconds;
use crate::transition::ScrollAnimation;
use crate::types::{ElementId, TaskId};

pub const NAV_TOGGLE_SELECTOR: &str = ".nav-toggle";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const HEADER_SELECTOR: &str = ".header";
pub const ACTIVE_CLASS: &str = "active";

/// Navigation state
#[derive(Debug)]
pub struct Navigation {
    config: NavigationConfig,
    toggle: Option<ElementId>,
    menu: Option<ElementId>,
    links: Vec<ElementId>,
    /// In-flight smooth scrolls by pending frame
    scrolls: HashMap<TaskId, ScrollAnimation>,
}

impl Navigation {
    pub fn new(config: NavigationConfig) -> Self {
        Self {
            config,
            toggle: None,
            menu: None,
            links: Vec::new(),
            scrolls: HashMap::new(),
        }
    }

    /// Capture the nav elements and listen for clicks
    pub fn setup<P: Page>(&mut self, page: &mut P) {
        self.toggle = page.query(NAV_TOGGLE_SELECTOR);
        self.menu = page.query(NAV_MENU_SELECTOR);
        self.links = page.query_all(NAV_LINK_SELECTOR);

        if let Some(toggle) = self.toggle {
            page.listen(EventTarget::Element(toggle), EventKind::Click);
        }
        for &link in &self.links {
            page.listen(EventTarget::Element(link), EventKind::Click);
        }
    }

    pub fn is_menu_open<P: Page>(&self, page: &P) -> bool {
        self.menu.is_some_and(|menu| page.has_class(menu, ACTIVE_CLASS))
    }

    /// Number of smooth scrolls still running
    pub fn active_scrolls(&self) -> usize {
        self.scrolls.len()
    }

    /// Whether a click on `element` cancels the browser's default action
    ///
    /// Known before any lookup runs, so a link click is cancelled even when
    /// the scroll itself fails.
    pub fn prevents_default(&self, element: ElementId) -> bool {
        self.links.contains(&element)
    }

    /// Handle a click; clicks on other elements are passed through untouched
    pub fn on_click<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        element: ElementId,
    ) -> MotionResult<EventOutcome> {
        if self.toggle == Some(element) {
            self.toggle_menu(page, element)?;
            return Ok(EventOutcome::default());
        }
        if self.prevents_default(element) {
            self.follow_link(page, scheduler, element)?;
            return Ok(EventOutcome::prevent_default());
        }
        Ok(EventOutcome::default())
    }

    fn toggle_menu<P: Page>(&self, page: &mut P, toggle: ElementId) -> MotionResult<()> {
        let menu = self
            .menu
            .ok_or(MotionError::ElementNotFound(NAV_MENU_SELECTOR))?;

        let open = page.toggle_class(menu, ACTIVE_CLASS);
        page.toggle_class(toggle, ACTIVE_CLASS);

        if open {
            for (index, &link) in self.links.iter().enumerate() {
                let delay = seconds(index as f64 * self.config.stagger_s);
                page.set_style(
                    link,
                    "animation",
                    &format!("fadeInRight 0.3s ease forwards {}", delay),
                );
            }
        }
        debug!(open, "nav menu toggled");
        Ok(())
    }

    fn follow_link<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        link: ElementId,
    ) -> MotionResult<()> {
        let target = page
            .attribute(link, "href")
            .and_then(|href| page.query(&href));
        let Some(target) = target else {
            debug!(link, "nav link has no target on this page");
            return Ok(());
        };

        let header = page
            .query(HEADER_SELECTOR)
            .ok_or(MotionError::ElementNotFound(HEADER_SELECTOR))?;
        let position = page.offset_top(target) - page.offset_height(header);
        self.smooth_scroll_to(page, scheduler, position);

        let menu = self
            .menu
            .ok_or(MotionError::ElementNotFound(NAV_MENU_SELECTOR))?;
        if page.has_class(menu, ACTIVE_CLASS) {
            page.remove_class(menu, ACTIVE_CLASS);
            if let Some(toggle) = self.toggle {
                page.remove_class(toggle, ACTIVE_CLASS);
            }
        }
        Ok(())
    }

    /// Start an eased scroll from the current offset to `target`
    ///
    /// Scrolls are not cancelled by newer ones; overlapping scrolls each
    /// keep writing their own offset until they finish.
    pub fn smooth_scroll_to<P: Page, S: Scheduler>(&mut self, page: &P, scheduler: &mut S, target: f64) {
        let animation = ScrollAnimation::new(page.scroll_y(), target, self.config.smooth_scroll_ms);
        debug!(from = animation.start, to = target, "smooth scroll started");
        self.scrolls.insert(scheduler.schedule_next_frame(), animation);
    }

    /// Advance a smooth scroll; false for foreign frames
    pub fn on_frame<P: Page, S: Scheduler>(
        &mut self,
        page: &mut P,
        scheduler: &mut S,
        task: TaskId,
        timestamp: f64,
    ) -> bool {
        let Some(mut animation) = self.scrolls.remove(&task) else {
            return false;
        };

        let (position, more) = animation.step(timestamp);
        page.scroll_to(position);
        if more {
            self.scrolls.insert(scheduler.schedule_next_frame(), animation);
        }
        true
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        for (task, _) in self.scrolls.drain() {
            scheduler.cancel(task);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ManualScheduler, MemoryPage};

    struct NavPage {
        page: MemoryPage,
        toggle: ElementId,
        menu: ElementId,
        links: Vec<ElementId>,
    }

    fn nav_page() -> NavPage {
        let mut page = MemoryPage::new();
        let body = page.body();
        let header = page.insert(body, "header", "header");
        page.set_offset(header, 0.0, 80.0);
        let toggle = page.insert(header, "button", "nav-toggle");
        let menu = page.insert(header, "ul", "nav-menu");
        let mut links = Vec::new();
        for href in ["#sobre", "#contato", "#missing"] {
            let link = page.insert(menu, "a", "nav-link");
            page.set_attribute(link, "href", href);
            links.push(link);
        }
        let about = page.insert(body, "section", "about");
        page.set_attribute(about, "id", "sobre");
        page.set_offset(about, 900.0, 600.0);
        let contact = page.insert(body, "section", "contact");
        page.set_attribute(contact, "id", "contato");
        page.set_offset(contact, 2400.0, 600.0);

        NavPage {
            page,
            toggle,
            menu,
            links,
        }
    }

    #[test]
    fn test_toggle_opens_menu_with_stagger() {
        let NavPage {
            mut page,
            toggle,
            menu,
            links,
        } = nav_page();
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        let outcome = nav.on_click(&mut page, &mut sched, toggle).unwrap();
        assert!(!outcome.prevent_default);
        assert!(page.has_class(menu, "active"));
        assert!(page.has_class(toggle, "active"));
        assert_eq!(page.style(links[0], "animation"), "fadeInRight 0.3s ease forwards 0s");
        assert_eq!(page.style(links[1], "animation"), "fadeInRight 0.3s ease forwards 0.1s");
        assert_eq!(page.style(links[2], "animation"), "fadeInRight 0.3s ease forwards 0.2s");

        nav.on_click(&mut page, &mut sched, toggle).unwrap();
        assert!(!nav.is_menu_open(&page));
        assert!(!page.has_class(toggle, "active"));
    }

    #[test]
    fn test_closing_menu_leaves_link_animation() {
        let NavPage {
            mut page,
            toggle,
            links,
            ..
        } = nav_page();
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        nav.on_click(&mut page, &mut sched, toggle).unwrap();
        page.set_style(links[0], "animation", "");
        nav.on_click(&mut page, &mut sched, toggle).unwrap();
        assert_eq!(page.style(links[0], "animation"), "");
    }

    #[test]
    fn test_link_click_scrolls_below_header_and_closes_menu() {
        let NavPage {
            mut page,
            toggle,
            menu,
            links,
        } = nav_page();
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);
        nav.on_click(&mut page, &mut sched, toggle).unwrap();

        let outcome = nav.on_click(&mut page, &mut sched, links[0]).unwrap();
        assert!(outcome.prevent_default);
        assert!(!page.has_class(menu, "active"));
        assert!(!page.has_class(toggle, "active"));
        assert_eq!(nav.active_scrolls(), 1);

        let mut now = 0.0;
        while sched.pending_frames() > 0 {
            for frame in sched.take_frames() {
                assert!(nav.on_frame(&mut page, &mut sched, frame, now));
            }
            now += 16.0;
        }
        assert_eq!(page.scroll_y(), 820.0);
        assert_eq!(nav.active_scrolls(), 0);
    }

    #[test]
    fn test_unresolvable_link_still_prevents_default() {
        let NavPage {
            mut page, links, ..
        } = nav_page();
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        let outcome = nav.on_click(&mut page, &mut sched, links[2]).unwrap();
        assert!(outcome.prevent_default);
        assert_eq!(sched.pending_frames(), 0);
    }

    #[test]
    fn test_missing_header_fails_link_click() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let menu = page.insert(body, "ul", "nav-menu");
        let link = page.insert(menu, "a", "nav-link");
        page.set_attribute(link, "href", "#top");
        let top = page.insert(body, "div", "");
        page.set_attribute(top, "id", "top");

        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        assert!(nav.prevents_default(link));
        let err = nav.on_click(&mut page, &mut sched, link).unwrap_err();
        assert_eq!(err, MotionError::ElementNotFound(".header"));
    }

    #[test]
    fn test_only_links_prevent_default() {
        let NavPage {
            mut page,
            toggle,
            menu,
            links,
        } = nav_page();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        assert!(links.iter().all(|&link| nav.prevents_default(link)));
        assert!(!nav.prevents_default(toggle));
        assert!(!nav.prevents_default(menu));
    }

    #[test]
    fn test_missing_menu_fails_toggle() {
        let mut page = MemoryPage::new();
        let body = page.body();
        let toggle = page.insert(body, "button", "nav-toggle");
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());
        nav.setup(&mut page);

        let err = nav.on_click(&mut page, &mut sched, toggle).unwrap_err();
        assert_eq!(err, MotionError::ElementNotFound(".nav-menu"));
        assert!(!page.has_class(toggle, "active"));
    }

    #[test]
    fn test_overlapping_scrolls_both_run() {
        let NavPage { mut page, .. } = nav_page();
        let mut sched = ManualScheduler::new();
        let mut nav = Navigation::new(NavigationConfig::default());

        nav.smooth_scroll_to(&page, &mut sched, 1000.0);
        nav.smooth_scroll_to(&page, &mut sched, 2000.0);
        assert_eq!(nav.active_scrolls(), 2);

        for frame in sched.take_frames() {
            nav.on_frame(&mut page, &mut sched, frame, 0.0);
        }
        assert_eq!(nav.active_scrolls(), 2);

        nav.cancel(&mut sched);
        assert_eq!(nav.active_scrolls(), 0);
        assert_eq!(sched.pending_frames(), 0);
    }
}
