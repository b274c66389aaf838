//! Focus Management
//!
//! Last-focused tracking, focus restoration and sequential navigation.

use lumen_dom::{Document, NodeId};

/// Remembers the most recently focused element
#[derive(Debug, Default)]
pub struct FocusRestorer {
    last: Option<NodeId>,
}

impl FocusRestorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a focus-in
    pub fn track(&mut self, id: NodeId) {
        self.last = Some(id);
    }

    pub fn last_focused(&self) -> Option<NodeId> {
        self.last
    }

    /// Focus the last tracked element.
    ///
    /// Returns false if nothing is tracked or the element has left the
    /// document; a detached reference is dropped.
    pub fn restore(&mut self, doc: &mut Document) -> bool {
        match self.last {
            Some(id) => self.restore_to(doc, id),
            None => false,
        }
    }

    /// Focus `target` if it is still in the document
    pub fn restore_to(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !doc.is_connected(target) {
            tracing::debug!("Not restoring focus to detached {:?}", target);
            if self.last == Some(target) {
                self.last = None;
            }
            return false;
        }
        doc.focus(target)
    }
}

/// Next element in `order` after `current`, wrapping at the ends.
/// Without a current position, forward starts at the first element and
/// backward at the last.
pub fn sequential_step(order: &[NodeId], current: Option<NodeId>, backward: bool) -> Option<NodeId> {
    let (first, last) = (*order.first()?, *order.last()?);
    let pos = current.and_then(|c| order.iter().position(|&n| n == c));
    let next = match (pos, backward) {
        (None, false) => first,
        (None, true) => last,
        (Some(p), false) => order.get(p + 1).copied().unwrap_or(first),
        (Some(0), true) => last,
        (Some(p), true) => order[p - 1],
    };
    Some(next)
}
