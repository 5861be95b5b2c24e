use std::rc::Rc;

use super::document::ElementId;

/// Event kinds the carousel listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// Click and keydown bubble to ancestors; pointer enter/leave do not.
    pub fn bubbles(self) -> bool {
        matches!(self, EventKind::Click | EventKind::KeyDown)
    }
}

/// Identifier of a registered listener, unique per document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub(crate) u64);

/// Listener callback. Shared so dispatch can run it without borrowing the
/// document.
pub type Handler = Rc<dyn Fn(&mut Event)>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    kind: EventKind,
    target: ElementId,
    /// DOM key name for keydown events (e.g. "ArrowLeft", "Enter", "a")
    key: Option<String>,
    default_prevented: bool,
}

impl Event {
    pub fn new(kind: EventKind, target: ElementId) -> Self {
        Self {
            kind,
            target,
            key: None,
            default_prevented: false,
        }
    }

    pub fn click(target: ElementId) -> Self {
        Self::new(EventKind::Click, target)
    }

    pub fn key_down(target: ElementId, key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::new(EventKind::KeyDown, target)
        }
    }

    pub fn pointer_enter(target: ElementId) -> Self {
        Self::new(EventKind::PointerEnter, target)
    }

    pub fn pointer_leave(target: ElementId) -> Self {
        Self::new(EventKind::PointerLeave, target)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn target(&self) -> ElementId {
        self.target
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}
