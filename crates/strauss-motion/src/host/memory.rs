//! In-memory page
//!
//! A small element tree with classes, inline styles, attributes and
//! settable layout metrics. Used by the test suite and by anything that
//! wants to run the controllers outside a browser.

use std::collections::{BTreeMap, HashMap};

use super::selector::{Selector, SelectorSubject};
use super::{parse_css_text, EventKind, EventTarget, Page};
use crate::types::{ElementId, Rect};

#[derive(Clone, Debug, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    text: String,
    inner_html: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    offset_top: f64,
    offset_height: f64,
    rect: Rect,
}

/// In-memory [`Page`] implementation
#[derive(Debug)]
pub struct MemoryPage {
    nodes: HashMap<ElementId, Node>,
    next_id: ElementId,
    body: ElementId,
    listeners: Vec<(EventTarget, EventKind)>,
    scroll_y: f64,
    scroll_height: f64,
    viewport_height: f64,
}

impl Default for MemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryPage {
    /// Create a page holding only a `<body>`
    pub fn new() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            1,
            Node {
                tag: "body".to_string(),
                ..Default::default()
            },
        );
        Self {
            nodes,
            next_id: 2,
            body: 1,
            listeners: Vec::new(),
            scroll_y: 0.0,
            scroll_height: 0.0,
            viewport_height: 800.0,
        }
    }

    /// Build and attach an element in one call
    ///
    /// `classes` is a space separated class list, like the `class` attribute.
    pub fn insert(&mut self, parent: ElementId, tag: &str, classes: &str) -> ElementId {
        let id = self.create_element(tag);
        self.set_class_name(id, classes);
        self.append_child(parent, id);
        id
    }

    /// Set an attribute (`href`, `id`, `src`, ...)
    pub fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    pub fn set_offset(&mut self, element: ElementId, top: f64, height: f64) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.offset_top = top;
            node.offset_height = height;
        }
    }

    pub fn set_bounding_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.rect = rect;
        }
    }

    /// Set the document and viewport heights
    pub fn set_dimensions(&mut self, scroll_height: f64, viewport_height: f64) {
        self.scroll_height = scroll_height;
        self.viewport_height = viewport_height;
    }

    /// Registered listeners, in registration order
    pub fn listeners(&self) -> &[(EventTarget, EventKind)] {
        &self.listeners
    }

    pub fn is_listening(&self, target: EventTarget, kind: EventKind) -> bool {
        self.listeners.contains(&(target, kind))
    }

    /// Class list in insertion order
    pub fn classes(&self, element: ElementId) -> Vec<String> {
        self.nodes
            .get(&element)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    pub fn inner_html(&self, element: ElementId) -> Option<String> {
        self.nodes.get(&element).and_then(|n| n.inner_html.clone())
    }

    /// Whether the element is reachable from the body
    pub fn is_attached(&self, element: ElementId) -> bool {
        let mut cursor = Some(element);
        while let Some(id) = cursor {
            if id == self.body {
                return true;
            }
            cursor = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    /// Attached elements in document order
    fn document_order(&self) -> Vec<ElementId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.body];
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev());
            }
        }
        order
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.nodes.get_mut(&element).and_then(|n| n.parent.take());
        if let Some(parent) = parent.and_then(|p| self.nodes.get_mut(&p)) {
            parent.children.retain(|&c| c != element);
        }
    }
}

impl SelectorSubject for MemoryPage {
    fn tag_of(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(&element).map(|n| n.tag.as_str())
    }

    fn id_of(&self, element: ElementId) -> Option<&str> {
        self.nodes
            .get(&element)
            .and_then(|n| n.attributes.get("id"))
            .map(String::as_str)
    }

    fn has_class_name(&self, element: ElementId, class: &str) -> bool {
        self.has_class(element, class)
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.parent(element)
    }
}

impl Page for MemoryPage {
    fn query(&self, selector: &str) -> Option<ElementId> {
        let selector = Selector::parse(selector)?;
        self.document_order()
            .into_iter()
            .find(|&id| selector.matches(self, id))
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.document_order()
            .into_iter()
            .filter(|&id| selector.matches(self, id))
            .collect()
    }

    fn body(&self) -> ElementId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(
            id,
            Node {
                tag: tag.to_ascii_lowercase(),
                ..Default::default()
            },
        );
        id
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        self.detach(child);
        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            node.children.push(child);
        }
    }

    fn remove(&mut self, element: ElementId) {
        self.detach(element);
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(&element).and_then(|n| n.parent)
    }

    fn children(&self, element: ElementId) -> Vec<ElementId> {
        self.nodes
            .get(&element)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.nodes
            .get(&element)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.classes.retain(|c| c != class);
        }
    }

    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        if self.has_class(element, class) {
            self.remove_class(element, class);
            false
        } else {
            self.add_class(element, class);
            self.has_class(element, class)
        }
    }

    fn set_class_name(&mut self, element: ElementId, class_name: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.classes = class_name.split_whitespace().map(str::to_string).collect();
        }
    }

    fn text(&self, element: ElementId) -> String {
        self.nodes
            .get(&element)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.text = text.to_string();
            node.inner_html = None;
        }
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.inner_html = Some(html.to_string());
        }
    }

    fn style(&self, element: ElementId, property: &str) -> String {
        self.nodes
            .get(&element)
            .and_then(|n| n.styles.get(property).cloned())
            .unwrap_or_default()
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn set_css_text(&mut self, element: ElementId, css: &str) {
        if let Some(node) = self.nodes.get_mut(&element) {
            node.styles = parse_css_text(css).into_iter().collect();
        }
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.nodes
            .get(&element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn offset_top(&self, element: ElementId) -> f64 {
        self.nodes.get(&element).map(|n| n.offset_top).unwrap_or(0.0)
    }

    fn offset_height(&self, element: ElementId) -> f64 {
        self.nodes
            .get(&element)
            .map(|n| n.offset_height)
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.nodes.get(&element).map(|n| n.rect).unwrap_or_default()
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y;
    }

    fn listen(&mut self, target: EventTarget, kind: EventKind) {
        if !self.listeners.contains(&(target, kind)) {
            self.listeners.push((target, kind));
        }
    }
}
