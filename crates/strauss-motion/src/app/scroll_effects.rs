//! Header hide-on-scroll and the reading progress bar

use tracing::trace;

use crate::config::HeaderConfig;
use crate::error::{MotionError, MotionResult};
use crate::host::{EventKind, EventTarget, Page};
use crate::style::{percent, PROGRESS_BAR_CSS};
use crate::types::ElementId;

use super::nav::HEADER_SELECTOR;

pub const PROGRESS_BAR_CLASS: &str = "scroll-progress";
pub const HEADER_HIDDEN: &str = "translateY(-100%)";
pub const HEADER_SHOWN: &str = "translateY(0)";

/// Percentage of the page scrolled
///
/// Not guarded: a page no taller than the viewport yields `NaN` or an
/// infinity, which ends up verbatim in the bar width.
pub fn scroll_progress(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> f64 {
    scroll_y / (scroll_height - viewport_height) * 100.0
}

#[derive(Debug)]
pub struct ScrollEffects {
    config: HeaderConfig,
    header: Option<ElementId>,
    last_scroll_top: f64,
    progress_bar: Option<ElementId>,
}

impl ScrollEffects {
    pub fn new(config: HeaderConfig) -> Self {
        Self {
            config,
            header: None,
            last_scroll_top: 0.0,
            progress_bar: None,
        }
    }

    /// Capture the header, append the progress bar and listen for scroll
    pub fn setup<P: Page>(&mut self, page: &mut P) {
        self.header = page.query(HEADER_SELECTOR);

        let bar = page.create_element("div");
        page.set_class_name(bar, PROGRESS_BAR_CLASS);
        page.set_css_text(bar, PROGRESS_BAR_CSS);
        let body = page.body();
        page.append_child(body, bar);
        self.progress_bar = Some(bar);

        page.listen(EventTarget::Window, EventKind::Scroll);
    }

    pub fn progress_bar(&self) -> Option<ElementId> {
        self.progress_bar
    }

    pub fn last_scroll_top(&self) -> f64 {
        self.last_scroll_top
    }

    /// Run both scroll handlers
    ///
    /// The progress bar is updated even when the header update fails, the
    /// way independent DOM listeners behave.
    pub fn on_scroll<P: Page>(&mut self, page: &mut P) -> MotionResult<()> {
        let header = self.update_header(page);
        self.update_progress(page);
        header
    }

    /// Hide the header while scrolling down past the threshold
    pub fn update_header<P: Page>(&mut self, page: &mut P) -> MotionResult<()> {
        let header = self
            .header
            .ok_or(MotionError::ElementNotFound(HEADER_SELECTOR))?;
        let scroll_top = page.scroll_y();

        let transform = if scroll_top > self.last_scroll_top
            && scroll_top > self.config.hide_threshold_px
        {
            HEADER_HIDDEN
        } else {
            HEADER_SHOWN
        };
        page.set_style(header, "transform", transform);

        self.last_scroll_top = scroll_top;
        Ok(())
    }

    pub fn update_progress<P: Page>(&self, page: &mut P) {
        let Some(bar) = self.progress_bar else {
            return;
        };
        let progress = scroll_progress(page.scroll_y(), page.scroll_height(), page.viewport_height());
        trace!(progress, "scroll progress");
        page.set_style(bar, "width", &percent(progress));
    }
}
