//! Host capabilities
//!
//! The controllers never touch a browser directly. They talk to two
//! capabilities supplied by the host:
//!
//! - [`Page`]: element lookup, tree edits, classes, inline styles and
//!   layout metrics
//! - [`Scheduler`]: timers, animation frames and visibility watchers
//!
//! Callbacks come back as [`HostEvent`]s which the host feeds into
//! [`StraussApp::dispatch`](crate::StraussApp::dispatch).
//!
//! `strauss-web` implements both traits on top of `web-sys`. The
//! [`MemoryPage`] and [`ManualScheduler`] implementations here keep all
//! state in Rust so every effect can be tested without a browser.

mod manual;
mod memory;
mod selector;

pub use manual::ManualScheduler;
pub use memory::MemoryPage;
pub use selector::Selector;

use crate::types::{ElementId, ObserverId, Rect, TaskId};

/// Where a listener is attached
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventTarget {
    /// The global window (scroll, load)
    Window,
    /// A page element
    Element(ElementId),
}

/// DOM events the controllers listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
    Scroll,
    Load,
    Error,
}

impl EventKind {
    /// DOM event type name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
            EventKind::Scroll => "scroll",
            EventKind::Load => "load",
            EventKind::Error => "error",
        }
    }
}

/// Options of a visibility watcher
#[derive(Clone, Debug, PartialEq)]
pub struct VisibilityOptions {
    /// Fraction of the element that must be visible
    pub threshold: f64,
    /// CSS margin applied to the viewport before intersecting
    pub root_margin: String,
}

/// One element's visibility change
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisibilityEntry {
    pub target: ElementId,
    pub is_intersecting: bool,
}

/// A callback delivered by the host
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    /// A timer scheduled with [`Scheduler::schedule_after`] fired
    Timer(TaskId),
    /// A frame requested with [`Scheduler::schedule_next_frame`] is due
    Frame {
        task: TaskId,
        /// High resolution frame time in milliseconds
        timestamp: f64,
    },
    /// A visibility watcher reported changes
    Visibility {
        observer: ObserverId,
        entries: Vec<VisibilityEntry>,
    },
    /// A DOM listener registered with [`Page::listen`] fired
    Dom { target: EventTarget, kind: EventKind },
}

/// What the host should do with the originating DOM event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// Call `preventDefault()` on the event
    pub prevent_default: bool,
}

impl EventOutcome {
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
        }
    }
}

/// Timing capability
pub trait Scheduler {
    /// Current time in milliseconds on the same clock as frame timestamps
    fn now(&self) -> f64;

    /// Fire [`HostEvent::Timer`] once after `delay_ms`
    fn schedule_after(&mut self, delay_ms: f64) -> TaskId;

    /// Fire [`HostEvent::Frame`] before the next repaint
    fn schedule_next_frame(&mut self) -> TaskId;

    /// Create a visibility watcher
    fn create_observer(&mut self, options: &VisibilityOptions) -> ObserverId;

    /// Start watching `element` with `observer`
    fn observe(&mut self, observer: ObserverId, element: ElementId);

    /// Cancel a pending timer or frame; unknown or fired tasks are ignored
    fn cancel(&mut self, task: TaskId);
}

/// Document capability
///
/// Style properties use CSS names (`border-right`, `animation-delay`).
/// Calls on detached or unknown elements are silently ignored, like the
/// DOM does for detached nodes.
pub trait Page {
    /// First element matching `selector`
    fn query(&self, selector: &str) -> Option<ElementId>;

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<ElementId>;

    /// The document body
    fn body(&self) -> ElementId;

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach `element` from its parent
    fn remove(&mut self, element: ElementId);

    fn parent(&self, element: ElementId) -> Option<ElementId>;

    fn children(&self, element: ElementId) -> Vec<ElementId>;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Toggle `class`, returning whether it is now present
    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool;

    /// Replace the whole class attribute
    fn set_class_name(&mut self, element: ElementId, class_name: &str);

    fn text(&self, element: ElementId) -> String;

    fn set_text(&mut self, element: ElementId, text: &str);

    fn set_inner_html(&mut self, element: ElementId, html: &str);

    /// Inline style value, empty when unset
    fn style(&self, element: ElementId, property: &str) -> String;

    /// Set an inline style; an empty value clears it
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Replace all inline styles with a `cssText` declaration block
    fn set_css_text(&mut self, element: ElementId, css: &str);

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    fn offset_top(&self, element: ElementId) -> f64;

    fn offset_height(&self, element: ElementId) -> f64;

    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Vertical scroll offset of the window
    fn scroll_y(&self) -> f64;

    /// Full height of the body content
    fn scroll_height(&self) -> f64;

    /// Height of the window viewport
    fn viewport_height(&self) -> f64;

    fn scroll_to(&mut self, y: f64);

    /// Deliver `kind` events on `target` as [`HostEvent::Dom`]
    ///
    /// Registering the same pair twice delivers each event once; the app
    /// fans a single event out to every interested controller.
    fn listen(&mut self, target: EventTarget, kind: EventKind);
}

/// Parse a `cssText` block into `(property, value)` pairs
///
/// Shared by hosts that store inline styles themselves.
pub fn parse_css_text(css: &str) -> Vec<(String, String)> {
    css.split(';')
        .filter_map(|decl| {
            let (property, value) = decl.split_once(':')?;
            let property = property.trim();
            let value = value.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_text() {
        let decls = parse_css_text(
            "\n  width: 4px;\n  left: 50%;\n  background: linear-gradient(90deg, red, blue);\n",
        );
        assert_eq!(
            decls,
            vec![
                ("width".to_string(), "4px".to_string()),
                ("left".to_string(), "50%".to_string()),
                (
                    "background".to_string(),
                    "linear-gradient(90deg, red, blue)".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_parse_css_text_skips_garbage() {
        assert!(parse_css_text("  ;;nonsense;").is_empty());
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::MouseEnter.name(), "mouseenter");
        assert_eq!(EventKind::Error.name(), "error");
    }
}
