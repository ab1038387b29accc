//! Element handles
//!
//! The motion core names elements by [`ElementId`]. The registry hands out
//! ids for DOM elements and holds each element until it is released, so
//! removed nodes can be collected.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Object, WeakMap};
use strauss_motion::ElementId;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Element;

/// Id returned when no element could be produced; never resolves
pub const UNKNOWN_ELEMENT: ElementId = 0;

pub type SharedRegistry = Rc<RefCell<ElementRegistry>>;

#[derive(Debug)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, Element>,
    /// Reverse lookup by JS identity; does not keep elements alive
    ids: WeakMap,
    next_id: ElementId,
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self {
            elements: HashMap::new(),
            ids: WeakMap::new(),
            next_id: UNKNOWN_ELEMENT + 1,
        }
    }
}

impl ElementRegistry {
    pub fn shared() -> SharedRegistry {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Id for `element`, registering it on first sight
    pub fn id_of(&mut self, element: &Element) -> ElementId {
        let key: &Object = element.unchecked_ref();
        if let Some(id) = self.ids.get(key).as_f64() {
            return id as ElementId;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.ids.set(key, &JsValue::from_f64(id as f64));
        self.elements.insert(id, element.clone());
        id
    }

    pub fn get(&self, id: ElementId) -> Option<Element> {
        self.elements.get(&id).cloned()
    }

    /// Forget `id`; the element gets a fresh id if it is seen again
    pub fn release(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(&id)?;
        self.ids.delete(element.unchecked_ref());
        Some(element)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
