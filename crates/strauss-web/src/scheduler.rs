//! Browser [`Scheduler`]: `setTimeout`, `requestAnimationFrame` and
//! `IntersectionObserver`

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::Array;
use strauss_motion::{
    ElementId, HostEvent, MotionError, MotionResult, ObserverId, Scheduler, TaskId,
    VisibilityEntry, VisibilityOptions,
};
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::registry::SharedRegistry;
use crate::router::EventRouter;

#[derive(Clone, Copy, Debug)]
enum Handle {
    Timeout(i32),
    Frame(i32),
}

/// Pending browser handles by task; a callback removes its own entry
type HandleTable = Rc<RefCell<HashMap<TaskId, Handle>>>;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

pub struct WebScheduler {
    window: Window,
    registry: SharedRegistry,
    router: Rc<EventRouter>,
    next_task: TaskId,
    next_observer: ObserverId,
    handles: HandleTable,
    observers: HashMap<ObserverId, (IntersectionObserver, ObserverCallback)>,
}

impl WebScheduler {
    pub fn new(window: Window, registry: SharedRegistry, router: Rc<EventRouter>) -> MotionResult<Self> {
        if window.performance().is_none() {
            return Err(MotionError::host("window.performance is unavailable"));
        }
        Ok(Self {
            window,
            registry,
            router,
            next_task: 1,
            next_observer: 1,
            handles: Rc::new(RefCell::new(HashMap::new())),
            observers: HashMap::new(),
        })
    }

    /// Timers and frames that have not fired or been cancelled
    pub fn pending(&self) -> usize {
        self.handles.borrow().len()
    }

    fn next_task_id(&mut self) -> TaskId {
        let task = self.next_task;
        self.next_task += 1;
        task
    }
}

impl Scheduler for WebScheduler {
    fn now(&self) -> f64 {
        self.window
            .performance()
            .map(|performance| performance.now())
            .unwrap_or_default()
    }

    fn schedule_after(&mut self, delay_ms: f64) -> TaskId {
        let task = self.next_task_id();
        let router = Rc::clone(&self.router);
        let handles = Rc::clone(&self.handles);
        let callback = Closure::once_into_js(move || {
            handles.borrow_mut().remove(&task);
            router.deliver(HostEvent::Timer(task), None);
        });

        // setTimeout takes whole milliseconds
        let delay = if delay_ms.is_finite() { delay_ms.max(0.0).round() as i32 } else { 0 };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(id) => {
                self.handles.borrow_mut().insert(task, Handle::Timeout(id));
            }
            Err(err) => error!(?err, task, "setTimeout failed"),
        }
        task
    }

    fn schedule_next_frame(&mut self) -> TaskId {
        let task = self.next_task_id();
        let router = Rc::clone(&self.router);
        let handles = Rc::clone(&self.handles);
        let callback = Closure::once_into_js(move |timestamp: f64| {
            handles.borrow_mut().remove(&task);
            router.deliver(HostEvent::Frame { task, timestamp }, None);
        });

        match self.window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => {
                self.handles.borrow_mut().insert(task, Handle::Frame(id));
            }
            Err(err) => error!(?err, task, "requestAnimationFrame failed"),
        }
        task
    }

    fn create_observer(&mut self, options: &VisibilityOptions) -> ObserverId {
        let observer_id = self.next_observer;
        self.next_observer += 1;

        let router = Rc::clone(&self.router);
        let registry = Rc::clone(&self.registry);
        let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
            let entries = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| VisibilityEntry {
                    target: registry.borrow_mut().id_of(&entry.target()),
                    is_intersecting: entry.is_intersecting(),
                })
                .collect();
            router.deliver(
                HostEvent::Visibility {
                    observer: observer_id,
                    entries,
                },
                None,
            );
        });

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                self.observers.insert(observer_id, (observer, callback));
            }
            Err(err) => error!(?err, "IntersectionObserver could not be created"),
        }
        observer_id
    }

    fn observe(&mut self, observer: ObserverId, element: ElementId) {
        let Some((watcher, _)) = self.observers.get(&observer) else {
            warn!(observer, "observe on unknown observer");
            return;
        };
        if let Some(element) = self.registry.borrow().get(element) {
            watcher.observe(&element);
        }
    }

    fn cancel(&mut self, task: TaskId) {
        let Some(handle) = self.handles.borrow_mut().remove(&task) else {
            return;
        };
        match handle {
            Handle::Timeout(id) => self.window.clear_timeout_with_handle(id),
            Handle::Frame(id) => {
                if let Err(err) = self.window.cancel_animation_frame(id) {
                    warn!(?err, task, "cancelAnimationFrame failed");
                }
            }
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        for (_, (observer, _)) in self.observers.drain() {
            observer.disconnect();
        }
    }
}
