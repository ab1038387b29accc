//! Delivery of browser callbacks to the app
//!
//! Every listener, timer, frame and observer callback funnels through
//! [`EventRouter::deliver`]. The router holds a weak handle to the app so
//! the closures never keep it alive on their own.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use strauss_motion::{HostEvent, StraussApp};
use tracing::error;

use crate::page::WebPage;
use crate::scheduler::WebScheduler;

pub type WebApp = StraussApp<WebPage, WebScheduler>;

#[derive(Default)]
pub struct EventRouter {
    app: RefCell<Weak<RefCell<WebApp>>>,
    /// Events that arrived while the app was busy, in arrival order
    backlog: RefCell<VecDeque<(HostEvent, Option<web_sys::Event>)>>,
}

impl EventRouter {
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Start delivering to `app`, draining anything queued so far
    pub fn attach(&self, app: &Rc<RefCell<WebApp>>) {
        *self.app.borrow_mut() = Rc::downgrade(app);
        self.drain();
    }

    /// Queue `event` and dispatch everything queued unless a dispatch is
    /// already running further up the stack
    ///
    /// `dom_event` is the originating DOM event, if any; it receives
    /// `preventDefault()` when the app asks for it.
    pub fn deliver(&self, event: HostEvent, dom_event: Option<web_sys::Event>) {
        self.backlog.borrow_mut().push_back((event, dom_event));
        self.drain();
    }

    fn drain(&self) {
        let Some(app) = self.app.borrow().upgrade() else {
            return;
        };
        // Re-entrant delivery: the outer loop picks the event up
        let Ok(mut app) = app.try_borrow_mut() else {
            return;
        };

        loop {
            let next = self.backlog.borrow_mut().pop_front();
            let Some((event, dom_event)) = next else {
                break;
            };
            let claimed = app.prevents_default(&event);
            if claimed {
                if let Some(dom_event) = &dom_event {
                    dom_event.prevent_default();
                }
            }
            match app.dispatch(event) {
                Ok(outcome) if outcome.prevent_default && !claimed => {
                    if let Some(dom_event) = &dom_event {
                        dom_event.prevent_default();
                    }
                }
                Ok(_) => {}
                Err(err) => error!(%err, "landing page handler failed"),
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.backlog.borrow().len()
    }
}
