//! Browser [`Page`] on top of `web-sys`

use std::collections::HashSet;
use std::rc::Rc;

use strauss_motion::{ElementId, EventKind, EventTarget, HostEvent, MotionError, MotionResult, Page, Rect};
use tracing::{debug, error};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::registry::{SharedRegistry, UNKNOWN_ELEMENT};
use crate::router::EventRouter;

pub struct WebPage {
    window: Window,
    document: Document,
    body: ElementId,
    registry: SharedRegistry,
    router: Rc<EventRouter>,
    listening: HashSet<(EventTarget, EventKind)>,
    /// Registered listeners, removed again when the page is dropped
    listeners: Vec<(web_sys::EventTarget, EventKind, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl WebPage {
    pub fn new(window: Window, registry: SharedRegistry, router: Rc<EventRouter>) -> MotionResult<Self> {
        let document = window
            .document()
            .ok_or_else(|| MotionError::host("window has no document"))?;
        let body = document
            .body()
            .ok_or_else(|| MotionError::host("document has no body"))?;
        let body = registry.borrow_mut().id_of(&body);

        Ok(Self {
            window,
            document,
            body,
            registry,
            router,
            listening: HashSet::new(),
            listeners: Vec::new(),
        })
    }

    /// Listeners attached to the DOM so far
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn element(&self, id: ElementId) -> Option<Element> {
        self.registry.borrow().get(id)
    }

    fn html_element(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn register(&self, element: &Element) -> ElementId {
        self.registry.borrow_mut().id_of(element)
    }
}

impl Page for WebPage {
    fn query(&self, selector: &str) -> Option<ElementId> {
        match self.document.query_selector(selector) {
            Ok(found) => found.map(|element| self.register(&element)),
            Err(_) => {
                debug!(selector, "invalid selector");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            debug!(selector, "invalid selector");
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|index| list.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.register(&element))
            .collect()
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        match self.document.create_element(tag) {
            Ok(element) => self.register(&element),
            Err(err) => {
                error!(?err, tag, "createElement failed");
                UNKNOWN_ELEMENT
            }
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            let _ = parent.append_child(&child);
        }
    }

    fn remove(&mut self, element: ElementId) {
        if let Some(element) = self.registry.borrow_mut().release(element) {
            element.remove();
        }
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        let parent = self.element(element)?.parent_element()?;
        Some(self.register(&parent))
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        let Some(element) = self.element(element) else {
            return Vec::new();
        };
        let children = element.children();
        (0..children.length())
            .filter_map(|index| children.item(index))
            .map(|child| self.register(&child))
            .collect()
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(element) = self.element(element) {
            let _ = element.class_list().remove_1(class);
        }
    }

    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        self.element(element)
            .and_then(|element| element.class_list().toggle(class).ok())
            .unwrap_or(false)
    }

    fn set_class_name(&mut self, element: ElementId, class_name: &str) {
        if let Some(element) = self.element(element) {
            element.set_class_name(class_name);
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.element(element)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(element) = self.element(element) {
            element.set_text_content(Some(text));
        }
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        if let Some(element) = self.element(element) {
            element.set_inner_html(html);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> String {
        self.html_element(element)
            .and_then(|element| element.style().get_property_value(property).ok())
            .unwrap_or_default()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        let Some(element) = self.html_element(element) else {
            return;
        };
        let style = element.style();
        if value.is_empty() {
            let _ = style.remove_property(property);
        } else {
            let _ = style.set_property(property, value);
        }
    }

    fn set_css_text(&mut self, element: ElementId, css: &str) {
        if let Some(element) = self.html_element(element) {
            element.style().set_css_text(css);
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)?.get_attribute(name)
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.html_element(element)
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or_default()
    }

    fn offset_height(&self, element: ElementId) -> f64 {
        self.html_element(element)
            .map(|element| f64::from(element.offset_height()))
            .unwrap_or_default()
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.element(element)
            .map(|element| {
                let rect = element.get_bounding_client_rect();
                Rect::new(rect.top(), rect.bottom())
            })
            .unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or_default()
    }

    fn scroll_height(&self) -> f64 {
        self.element(self.body)
            .map(|body| f64::from(body.scroll_height()))
            .unwrap_or_default()
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or_default()
    }

    fn scroll_to(&mut self, y: f64) {
        self.window.scroll_to_with_x_and_y(0.0, y);
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) {
        if !self.listening.insert((target, kind)) {
            return;
        }

        let event_target: web_sys::EventTarget = match target {
            EventTarget::Window => self.window.clone().into(),
            EventTarget::Element(id) => match self.element(id) {
                Some(element) => element.into(),
                None => return,
            },
        };

        let router = Rc::clone(&self.router);
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            router.deliver(HostEvent::Dom { target, kind }, Some(event));
        });
        if let Err(err) = event_target.add_event_listener_with_callback(kind.name(), callback.as_ref().unchecked_ref()) {
            error!(?err, event = kind.name(), "addEventListener failed");
            return;
        }
        self.listeners.push((event_target, kind, callback));
    }
}

impl Drop for WebPage {
    fn drop(&mut self) {
        for (target, kind, callback) in self.listeners.drain(..) {
            let _ = target.remove_event_listener_with_callback(kind.name(), callback.as_ref().unchecked_ref());
        }
    }
}
