//! Motion engine for the Strauss Lifting Platforms landing page
//!
//! This crate holds every piece of landing page behaviour:
//! - Reveal-on-scroll, floating particles, typewriter title
//! - Button hover lift, image parallax and the logo fallback
//! - Mobile navigation with eased smooth scrolling
//! - Header hide-on-scroll, scroll progress bar and loading splash
//!
//! ## Architecture
//!
//! - [`host`]: the `Page` and `Scheduler` capabilities plus in-memory
//!   implementations of both
//! - [`animation`]: decorative effects owned by [`AnimationController`]
//! - [`app`]: [`StraussApp`], navigation, scroll effects and the splash
//! - [`transition`]: easing math and frame-driven smooth scrolling
//! - [`timing`]: throttle and debounce
//! - [`config`]: tunable timings with the page defaults
//!
//! ## Example
//!
//! ```rust
//! use strauss_motion::{
//!     EventKind, EventTarget, HostEvent, ManualScheduler, MemoryPage, MotionConfig, Page,
//!     StraussApp,
//! };
//!
//! let mut page = MemoryPage::new();
//! let body = page.body();
//! page.insert(body, "header", "header");
//!
//! let mut app = StraussApp::new(page, ManualScheduler::new(), MotionConfig::default()).unwrap();
//! app.dispatch(HostEvent::Dom {
//!     target: EventTarget::Window,
//!     kind: EventKind::Load,
//! })
//! .unwrap();
//! app.advance(1500.0).unwrap();
//! ```
//!
//! ## Design Principles
//!
//! 1. **Pure Rust Core**: no browser types; hosts plug in through traits
//! 2. **Explicit Time**: timers and frames are events, so tests drive a
//!    virtual clock

pub mod animation;
pub mod app;
pub mod config;
pub mod host;
pub mod style;
pub mod timing;
pub mod transition;

mod error;
mod types;

pub use animation::AnimationController;
pub use app::StraussApp;
pub use config::MotionConfig;
pub use error::{MotionError, MotionResult};
pub use host::{
    EventKind, EventOutcome, EventTarget, HostEvent, ManualScheduler, MemoryPage, Page, Scheduler,
    VisibilityEntry, VisibilityOptions,
};
pub use timing::{Debounce, Throttle};
pub use transition::ScrollAnimation;
pub use types::{ElementId, ObserverId, Rect, TaskId};
