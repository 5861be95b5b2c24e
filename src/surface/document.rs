use std::collections::BTreeMap;
use std::fmt;

use slotmap::{SlotMap, new_key_type};

use super::event::{EventKind, Handler, ListenerId};
use super::selector::Selector;

new_key_type! {
    /// Handle to an element of a [`Document`].
    pub struct ElementId;
}

/// One node of the host surface tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: Option<String>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            text: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Sets an attribute. `class` replaces the whole class list.
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
            self.sync_class_attribute();
        } else {
            self.attributes.insert(name.to_string(), value);
        }
    }

    pub fn remove_attribute(&mut self, name: &str) -> bool {
        if name == "class" {
            self.classes.clear();
        }
        self.attributes.remove(name).is_some()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
            self.sync_class_attribute();
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
        self.sync_class_attribute();
    }

    // `class` always reads back as the space-joined class list
    fn sync_class_attribute(&mut self) {
        if self.classes.is_empty() {
            self.attributes.remove("class");
        } else {
            self.attributes.insert("class".to_string(), self.classes.join(" "));
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, property: &str, value: impl Into<String>) {
        self.styles.insert(property.to_string(), value.into());
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }
}

struct Listener {
    target: ElementId,
    kind: EventKind,
    handler: Handler,
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// An arena tree of elements plus the listeners registered on them.
///
/// Operations on ids that no longer exist are no-ops; lookups return `None`
/// or an empty slice.
#[derive(Debug)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    root: ElementId,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates a document holding a single `body` root.
    pub fn new() -> Self {
        let mut elements = SlotMap::with_key();
        let root = elements.insert(Element::new("body"));
        Self {
            elements,
            root,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    // =========================================================================
    // Construction
    // =========================================================================

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.insert(Element::new(tag))
    }

    /// Creates a detached element with attributes and optional text content.
    pub fn create_element_with(
        &mut self,
        tag: &str,
        attributes: &[(&str, &str)],
        text: Option<&str>,
    ) -> ElementId {
        let mut element = Element::new(tag);
        for (name, value) in attributes {
            element.set_attribute(name, *value);
        }
        if let Some(text) = text {
            element.set_text(text);
        }
        self.elements.insert(element)
    }

    /// Appends `child` as the last child of `parent`, detaching it from its
    /// previous parent first.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> bool {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` before `reference` among the children of `parent`.
    /// Appends when `reference` is `None` or not a child of `parent`.
    ///
    /// Refuses to move an element into itself or its own subtree.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        reference: Option<ElementId>,
    ) -> bool {
        if !self.elements.contains_key(parent)
            || !self.elements.contains_key(child)
            || self.contains(child, parent)
        {
            return false;
        }

        self.detach(child);

        let Some(parent_element) = self.elements.get_mut(parent) else {
            return false;
        };
        let position = reference
            .filter(|r| *r != child)
            .and_then(|r| parent_element.children.iter().position(|c| *c == r))
            .unwrap_or(parent_element.children.len());
        parent_element.children.insert(position, child);

        if let Some(child_element) = self.elements.get_mut(child) {
            child_element.parent = Some(parent);
        }
        true
    }

    fn detach(&mut self, child: ElementId) {
        let Some(old_parent) = self.elements.get(child).and_then(|e| e.parent) else {
            return;
        };
        if let Some(parent_element) = self.elements.get_mut(old_parent) {
            parent_element.children.retain(|c| *c != child);
        }
        if let Some(child_element) = self.elements.get_mut(child) {
            child_element.parent = None;
        }
    }

    // =========================================================================
    // Element accessors
    // =========================================================================

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements.get(id).map(Element::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id).and_then(Element::parent)
    }

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.attribute(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.set_attribute(name, value);
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.remove_attribute(name);
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements.get(id).is_some_and(|e| e.has_class(class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.remove_class(class);
        }
    }

    pub fn style(&self, id: ElementId, property: &str) -> Option<&str> {
        self.elements.get(id).and_then(|e| e.style(property))
    }

    pub fn set_style(&mut self, id: ElementId, property: &str, value: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.set_style(property, value);
        }
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).and_then(Element::text)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// True when `node` is `ancestor` or lies inside its subtree.
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Elements strictly below `scope`, in document (pre-)order.
    pub fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(scope).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev());
        }
        out
    }

    /// First element in document order matching `selector`, root included.
    pub fn query_selector(&self, selector: &str) -> Option<ElementId> {
        let selector = Selector::parse(selector)?;
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|id| self.elements.get(*id).is_some_and(|e| selector.matches(e)))
    }

    /// All elements below `scope` matching `selector`, in document order.
    pub fn query_selector_all_within(&self, scope: ElementId, selector: &str) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.elements.get(*id).is_some_and(|e| selector.matches(e)))
            .collect()
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    pub fn add_event_listener(
        &mut self,
        target: ElementId,
        kind: EventKind,
        handler: Handler,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Listener { target, kind, handler }));
        id
    }

    pub fn remove_event_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn is_listening(&self, id: ListenerId) -> bool {
        self.listeners.iter().any(|(listener_id, _)| *listener_id == id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listeners_on(&self, target: ElementId) -> usize {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.target == target)
            .count()
    }

    /// Handlers registered for `kind` on `target`, in registration order.
    pub(crate) fn handlers_for(&self, target: ElementId, kind: EventKind) -> Vec<(ListenerId, Handler)> {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.target == target && listener.kind == kind)
            .map(|(id, listener)| (*id, listener.handler.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, Vec<ElementId>) {
        let mut doc = Document::new();
        let host = doc.create_element_with("div", &[("id", "carousel")], None);
        doc.append_child(doc.root(), host);
        let slides = (0..3)
            .map(|_| {
                let slide = doc.create_element_with("div", &[("class", "slide")], None);
                doc.append_child(host, slide);
                slide
            })
            .collect();
        (doc, host, slides)
    }

    #[test]
    fn append_reparents() {
        let (mut doc, host, slides) = sample();
        let track = doc.create_element("div");
        doc.insert_before(host, track, Some(slides[0]));
        assert_eq!(doc.children(host)[0], track);

        doc.append_child(track, slides[1]);
        assert_eq!(doc.parent(slides[1]), Some(track));
        assert_eq!(doc.children(host), &[track, slides[0], slides[2]]);
        assert!(doc.contains(host, slides[1]));
    }

    #[test]
    fn class_attribute_tracks_class_list() {
        let (mut doc, _, slides) = sample();
        let slide = slides[0];
        assert_eq!(doc.attribute(slide, "class"), Some("slide"));

        doc.set_attribute(slide, "class", "  slide   wide ");
        assert_eq!(doc.attribute(slide, "class"), Some("slide wide"));
        assert!(doc.has_class(slide, "wide"));

        doc.add_class(slide, "active");
        assert_eq!(doc.attribute(slide, "class"), Some("slide wide active"));
        doc.remove_class(slide, "wide");
        assert_eq!(doc.attribute(slide, "class"), Some("slide active"));

        doc.remove_attribute(slide, "class");
        assert_eq!(doc.attribute(slide, "class"), None);
        assert!(!doc.has_class(slide, "slide"));

        doc.add_class(slide, "slide");
        doc.remove_class(slide, "slide");
        assert_eq!(doc.attribute(slide, "class"), None);
    }

    #[test]
    fn refuses_cycles() {
        let (mut doc, host, slides) = sample();
        assert!(!doc.append_child(slides[0], host));
        assert!(!doc.append_child(host, host));
        assert_eq!(doc.parent(host), Some(doc.root()));
    }

    #[test]
    fn queries_in_document_order() {
        let (doc, host, slides) = sample();
        assert_eq!(doc.query_selector("#carousel"), Some(host));
        assert_eq!(doc.query_selector("#missing"), None);
        assert_eq!(doc.query_selector_all_within(host, ".slide"), slides);
        assert!(doc.query_selector_all_within(host, "").is_empty());
    }

    #[test]
    fn class_attribute_feeds_the_class_list() {
        let mut doc = Document::new();
        let button = doc.create_element_with("button", &[("class", "a b"), ("role", "tab")], Some("1"));
        assert!(doc.has_class(button, "a"));
        assert!(doc.has_class(button, "b"));
        assert_eq!(doc.attribute(button, "role"), Some("tab"));
        assert_eq!(doc.text(button), Some("1"));
        doc.remove_class(button, "a");
        assert!(!doc.has_class(button, "a"));
    }
}
