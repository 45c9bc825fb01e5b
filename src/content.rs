//! One-shot "content became available" notification.
//!
//! A widget attached before its children exist arms a [`ContentWatch`] on its
//! own element. The page notifies armed watches whenever markup is inserted in
//! their subtree; the first notification that finds non-empty content fires the
//! watch and disarms it for good.

use crate::markup::{Document, NodeId};

/// State of a watch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Waiting for content
    Armed,
    /// Content arrived and the owner was told; never fires again
    Fired,
}

/// Single-fire content watch on one element's subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentWatch {
    element: NodeId,
    state: WatchState,
}

impl ContentWatch {
    /// Arm a watch on `element`
    pub fn arm(element: NodeId) -> Self {
        Self {
            element,
            state: WatchState::Armed,
        }
    }

    /// A watch for an element whose content is already present
    pub fn fired(element: NodeId) -> Self {
        Self {
            element,
            state: WatchState::Fired,
        }
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn is_armed(&self) -> bool {
        self.state == WatchState::Armed
    }

    /// Whether a mutation at `changed` falls inside the watched subtree
    pub fn observes(&self, doc: &Document, changed: NodeId) -> bool {
        changed == self.element || doc.ancestors(changed).any(|a| a == self.element)
    }

    /// Deliver a notification. Returns `true` exactly once: on the first call
    /// that sees non-empty content while armed.
    pub fn notify(&mut self, doc: &Document) -> bool {
        if self.state == WatchState::Fired {
            return false;
        }
        if !doc.has_content(self.element) {
            return false;
        }
        self.state = WatchState::Fired;
        true
    }
}
