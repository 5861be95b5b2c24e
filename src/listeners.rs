use crate::surface::{Document, ElementId, EventKind, Handler, ListenerId};

/// Every listener an instance registered, kept so teardown can remove them
/// all in one pass.
#[derive(Debug, Default)]
pub struct ListenerBag {
    entries: Vec<(ElementId, EventKind, ListenerId)>,
}

impl ListenerBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, doc: &mut Document, target: ElementId, kind: EventKind, handler: Handler) {
        let id = doc.add_event_listener(target, kind, handler);
        self.entries.push((target, kind, id));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every bound listener from `doc`. Returns how many were still
    /// registered.
    pub fn release(&mut self, doc: &mut Document) -> usize {
        let mut removed = 0;
        for (target, kind, id) in self.entries.drain(..) {
            if doc.remove_event_listener(id) {
                removed += 1;
            } else {
                tracing::trace!(?target, ?kind, "listener was already gone");
            }
        }
        removed
    }
}
