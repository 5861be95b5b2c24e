//! Host rendering surface: a tree of elements the carousel attaches to, with
//! a small event system.
//!
//! The carousel only depends on the operations exposed here. Hosts (the test
//! suite, the raylib viewer) build a [`Document`], wrap it in a [`Surface`]
//! and feed user input through [`Surface::dispatch`].

mod document;
mod event;
mod selector;

use std::cell::RefCell;
use std::rc::Rc;

pub use document::{Document, Element, ElementId};
pub use event::{Event, EventKind, Handler, ListenerId};
pub use selector::Selector;

/// Shared handle to a [`Document`].
#[derive(Debug, Clone, Default)]
pub struct Surface {
    document: Rc<RefCell<Document>>,
}

impl Surface {
    pub fn new(document: Document) -> Self {
        Self {
            document: Rc::new(RefCell::new(document)),
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&Document) -> R) -> R {
        f(&self.document.borrow())
    }

    pub fn write<R>(&self, f: impl FnOnce(&mut Document) -> R) -> R {
        f(&mut self.document.borrow_mut())
    }

    /// Delivers `event` to the listeners on its target and, for bubbling
    /// kinds, on every ancestor up to the root.
    ///
    /// The document is not borrowed while a handler runs. A listener removed
    /// by an earlier handler of the same dispatch does not run.
    pub fn dispatch(&self, event: &mut Event) {
        let path = self.read(|doc| {
            if doc.element(event.target()).is_none() {
                return Vec::new();
            }
            let mut path = vec![event.target()];
            if event.kind().bubbles() {
                let mut current = doc.parent(event.target());
                while let Some(id) = current {
                    path.push(id);
                    current = doc.parent(id);
                }
            }
            path
        });

        for node in path {
            let handlers = self.read(|doc| doc.handlers_for(node, event.kind()));
            for (id, handler) in handlers {
                if self.read(|doc| doc.is_listening(id)) {
                    handler(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn tree() -> (Surface, ElementId, ElementId) {
        let mut doc = Document::new();
        let host = doc.create_element("div");
        let button = doc.create_element("button");
        doc.append_child(doc.root(), host);
        doc.append_child(host, button);
        (Surface::new(doc), host, button)
    }

    #[test]
    fn clicks_bubble_to_ancestors() {
        let (surface, host, button) = tree();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        surface.write(|doc| {
            doc.add_event_listener(host, EventKind::Click, Rc::new(move |_: &mut Event| counter.set(counter.get() + 1)))
        });

        surface.dispatch(&mut Event::click(button));
        surface.dispatch(&mut Event::click(host));
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn pointer_events_do_not_bubble() {
        let (surface, host, button) = tree();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        surface.write(|doc| {
            doc.add_event_listener(host, EventKind::PointerEnter, Rc::new(move |_: &mut Event| counter.set(counter.get() + 1)))
        });

        surface.dispatch(&mut Event::pointer_enter(button));
        assert_eq!(hits.get(), 0);
        surface.dispatch(&mut Event::pointer_enter(host));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handlers_may_mutate_the_document() {
        let (surface, host, button) = tree();
        let handle = surface.clone();
        surface.write(|doc| {
            doc.add_event_listener(
                button,
                EventKind::Click,
                Rc::new(move |event: &mut Event| handle.write(|doc| doc.add_class(event.target(), "pressed"))),
            )
        });

        surface.dispatch(&mut Event::click(button));
        assert!(surface.read(|doc| doc.has_class(button, "pressed")));
        assert!(!surface.read(|doc| doc.has_class(host, "pressed")));
    }

    #[test]
    fn removed_listener_is_skipped_within_the_same_dispatch() {
        let (surface, _host, button) = tree();
        let hits = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        let handle = surface.clone();
        let pending = second_id.clone();
        surface.write(|doc| {
            doc.add_event_listener(
                button,
                EventKind::Click,
                Rc::new(move |_: &mut Event| {
                    if let Some(id) = pending.get() {
                        handle.write(|doc| doc.remove_event_listener(id));
                    }
                }),
            )
        });
        let counter = hits.clone();
        let id = surface.write(|doc| {
            doc.add_event_listener(button, EventKind::Click, Rc::new(move |_: &mut Event| counter.set(counter.get() + 1)))
        });
        second_id.set(Some(id));

        surface.dispatch(&mut Event::click(button));
        assert_eq!(hits.get(), 0);
        assert_eq!(surface.read(Document::listener_count), 1);
    }
}
