//! Browser entry point for the Strauss landing page
//!
//! Implements the motion core's host traits on top of `web-sys` and starts
//! the app once the document is parsed:
//! - [`page::WebPage`]: DOM queries, classes, styles and listeners
//! - [`scheduler::WebScheduler`]: timers, animation frames and
//!   `IntersectionObserver`
//! - [`router::EventRouter`]: hands browser callbacks to the app

pub mod config;
pub mod logging;
pub mod page;
pub mod registry;
pub mod router;
pub mod scheduler;

use std::cell::RefCell;
use std::rc::Rc;

use strauss_motion::{EventKind, EventTarget, HostEvent, MotionError, MotionResult, StraussApp};
use tracing::{error, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use config::PageConfig;
use page::WebPage;
use registry::ElementRegistry;
use router::{EventRouter, WebApp};
use scheduler::WebScheduler;

thread_local! {
    /// The running app, kept alive for the page lifetime
    static APP: RefCell<Option<Rc<RefCell<WebApp>>>> = const { RefCell::new(None) };
}

/// Module start: boot now or once the document is parsed
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document to animate"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(boot);
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        boot();
    }
    Ok(())
}

/// Cancel pending work and detach every listener
#[wasm_bindgen]
pub fn shutdown() {
    let Some(app) = APP.with(|slot| slot.borrow_mut().take()) else {
        return;
    };
    match app.try_borrow_mut() {
        Ok(mut app) => app.shutdown(),
        Err(_) => warn!("shutdown requested while dispatching"),
    };
}

fn boot() {
    match build() {
        Ok(app) => APP.with(|slot| *slot.borrow_mut() = Some(app)),
        Err(err) => error!(%err, "landing page effects disabled"),
    }
}

fn build() -> MotionResult<Rc<RefCell<WebApp>>> {
    let window = web_sys::window().ok_or_else(|| MotionError::host("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| MotionError::host("window has no document"))?;

    let config = PageConfig::load(&document);
    logging::init(
        config
            .as_ref()
            .ok()
            .and_then(|config| config.level().ok())
            .unwrap_or(Level::INFO),
    );
    let config = config.unwrap_or_else(|err| {
        error!(%err, "page configuration ignored, using defaults");
        PageConfig::default()
    });

    let registry = ElementRegistry::shared();
    let router = EventRouter::shared();
    let page = WebPage::new(window.clone(), Rc::clone(&registry), Rc::clone(&router))?;
    let scheduler = WebScheduler::new(window, registry, Rc::clone(&router))?;
    let app = Rc::new(RefCell::new(StraussApp::new(page, scheduler, config.motion)?));
    router.attach(&app);

    // The window `load` event has already fired
    if document.ready_state() == "complete" {
        router.deliver(
            HostEvent::Dom {
                target: EventTarget::Window,
                kind: EventKind::Load,
            },
            None,
        );
    }
    Ok(app)
}
