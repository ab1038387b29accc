//! Typewriter effect for the hero title

use tracing::debug;

use crate::config::TypewriterConfig;
use crate::host::{Page, Scheduler};
use crate::style::TYPEWRITER_CURSOR;
use crate::types::{ElementId, TaskId};

pub const TITLE_SELECTOR: &str = ".hero-title";

/// Where the effect currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypewriterPhase {
    /// No title on the page
    Inactive,
    /// Characters are being revealed
    Typing,
    /// All text shown, cursor still visible
    Lingering,
    Done,
}

/// Single-run typewriter
#[derive(Debug)]
pub struct Typewriter {
    config: TypewriterConfig,
    title: Option<ElementId>,
    chars: Vec<char>,
    typed: usize,
    pending: Option<TaskId>,
    phase: TypewriterPhase,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Self {
        Self {
            config,
            title: None,
            chars: Vec::new(),
            typed: 0,
            pending: None,
            phase: TypewriterPhase::Inactive,
        }
    }

    /// Blank the title, show the cursor and schedule the first character
    pub fn setup<P: Page, S: Scheduler>(&mut self, page: &mut P, scheduler: &mut S) {
        let Some(title) = page.query(TITLE_SELECTOR) else {
            return;
        };

        self.chars = page.text(title).chars().collect();
        page.set_text(title, "");
        page.set_style(title, "border-right", TYPEWRITER_CURSOR);

        self.title = Some(title);
        self.phase = TypewriterPhase::Typing;
        self.pending = Some(scheduler.schedule_after(self.config.start_delay_ms));
    }

    pub fn phase(&self) -> TypewriterPhase {
        self.phase
    }

    /// Characters revealed so far
    pub fn typed(&self) -> usize {
        self.typed
    }

    /// Handle the typewriter's own timer; false for foreign tasks
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
        let Some(title) = self.title else {
            return true;
        };

        match self.phase {
            TypewriterPhase::Typing if self.typed < self.chars.len() => {
                self.typed += 1;
                let shown: String = self.chars[..self.typed].iter().collect();
                page.set_text(title, &shown);
                self.pending = Some(scheduler.schedule_after(self.config.char_interval_ms));
            }
            TypewriterPhase::Typing => {
                self.phase = TypewriterPhase::Lingering;
                self.pending = Some(scheduler.schedule_after(self.config.cursor_linger_ms));
                debug!(chars = self.chars.len(), "typewriter finished");
            }
            TypewriterPhase::Lingering => {
                page.set_style(title, "border-right", "none");
                self.phase = TypewriterPhase::Done;
            }
            TypewriterPhase::Inactive | TypewriterPhase::Done => {}
        }
        true
    }

    pub fn cancel<S: Scheduler>(&mut self, scheduler: &mut S) {
        if let Some(task) = self.pending.take() {
            scheduler.cancel(task);
        }
    }
}
