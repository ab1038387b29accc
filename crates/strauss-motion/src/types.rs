//! Core type definitions for the motion controllers
//!
//! This module centralizes identifiers and small value types shared
//! between the controllers and the host implementations.

/// Unique element identifier
///
/// Elements are identified by a monotonically increasing 64-bit integer
/// handed out by the [`Page`](crate::host::Page) implementation. An id stays
/// valid after the element is detached; it only stops matching queries.
pub type ElementId = u64;

/// Unique scheduled task identifier
///
/// Every timer and animation-frame request returns a fresh id. Ids are
/// never reused within a [`Scheduler`](crate::host::Scheduler) instance.
pub type TaskId = u64;

/// Unique visibility watcher identifier
pub type ObserverId = u32;

/// Vertical extent of an element relative to the viewport
///
/// Mirrors the `top`/`bottom` pair of `getBoundingClientRect()`, which is
/// all the parallax check needs.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    /// Distance from the viewport top to the element top (px)
    pub top: f64,
    /// Distance from the viewport top to the element bottom (px)
    pub bottom: f64,
}

impl Rect {
    pub fn new(top: f64, bottom: f64) -> Self {
        Self { top, bottom }
    }

    /// Whether any part of the rect lies inside a viewport of the given height
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_inside_viewport() {
        assert!(Rect::new(10.0, 200.0).intersects_viewport(800.0));
        assert!(Rect::new(-100.0, 1.0).intersects_viewport(800.0));
    }

    #[test]
    fn test_rect_outside_viewport() {
        // Entirely below the fold
        assert!(!Rect::new(800.0, 1200.0).intersects_viewport(800.0));
        // Scrolled past
        assert!(!Rect::new(-300.0, 0.0).intersects_viewport(800.0));
    }
}
