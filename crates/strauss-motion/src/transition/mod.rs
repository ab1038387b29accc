//! Animation and transition systems
//!
//! - [`easing`]: easing curves
//! - [`ScrollAnimation`]: the frame-driven custom smooth scroll

pub mod easing;
mod smooth_scroll;

pub use smooth_scroll::ScrollAnimation;
