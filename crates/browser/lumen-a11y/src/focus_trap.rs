//! Focus Traps
//!
//! Keeps Tab and Shift+Tab inside an open modal dialog and turns Escape
//! into a close request.

use lumen_dom::{Document, NodeId};

use crate::{Key, KeyboardEvent};

/// Armed trap on one dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trap {
    pub dialog: NodeId,
    /// Focusable descendants, computed once when armed
    pub focusables: Vec<NodeId>,
    /// Element to focus again when the dialog closes
    pub return_focus: Option<NodeId>,
}

impl Trap {
    pub fn first(&self) -> Option<NodeId> {
        self.focusables.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.focusables.last().copied()
    }
}

/// Result of offering a key-down to the traps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Not handled; the default action proceeds
    Ignored,
    /// Focus wrapped around; the default action is suppressed
    Cycled,
    /// Escape inside this dialog
    CloseRequested(NodeId),
}

/// Focus trap manager
///
/// Traps are kept in arming order, so the newest armed dialog containing
/// the event target wins when dialogs are nested.
#[derive(Debug, Default)]
pub struct FocusTrapManager {
    traps: Vec<Trap>,
}

impl FocusTrapManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm a trap on `dialog`. A dialog without focusable descendants
    /// stays unarmed.
    pub fn arm(&mut self, doc: &Document, dialog: NodeId, return_focus: Option<NodeId>) -> bool {
        let focusables = doc.focusable_within(dialog);
        if focusables.is_empty() {
            tracing::debug!("Dialog {:?} has no focusable elements, not trapping", dialog);
            return false;
        }

        self.disarm(dialog);
        tracing::debug!("Trap armed on {:?} with {} focusables", dialog, focusables.len());
        self.traps.push(Trap { dialog, focusables, return_focus });
        true
    }

    /// Remove the trap on `dialog`, returning it
    pub fn disarm(&mut self, dialog: NodeId) -> Option<Trap> {
        let pos = self.traps.iter().position(|t| t.dialog == dialog)?;
        tracing::debug!("Trap disarmed on {:?}", dialog);
        Some(self.traps.remove(pos))
    }

    pub fn is_armed(&self, dialog: NodeId) -> bool {
        self.traps.iter().any(|t| t.dialog == dialog)
    }

    pub fn trap(&self, dialog: NodeId) -> Option<&Trap> {
        self.traps.iter().find(|t| t.dialog == dialog)
    }

    pub fn armed_count(&self) -> usize {
        self.traps.len()
    }

    /// Record `previous` as the return target of every armed dialog that
    /// focus just entered from outside, unless one is already set
    pub fn capture_return(&mut self, doc: &Document, target: NodeId, previous: NodeId) {
        for trap in &mut self.traps {
            let entered = doc.contains(trap.dialog, target) && !doc.contains(trap.dialog, previous);
            if entered && trap.return_focus.is_none() {
                tracing::debug!("Dialog {:?} will return focus to {:?}", trap.dialog, previous);
                trap.return_focus = Some(previous);
            }
        }
    }

    /// Drop traps whose dialog has left the document
    pub fn prune(&mut self, doc: &Document) {
        self.traps.retain(|t| {
            let keep = doc.is_connected(t.dialog);
            if !keep {
                tracing::debug!("Pruning trap on detached dialog {:?}", t.dialog);
            }
            keep
        });
    }

    /// Offer a key-down to the innermost armed dialog containing its target
    pub fn handle_key(&mut self, doc: &mut Document, event: &KeyboardEvent) -> TrapOutcome {
        self.prune(doc);

        let Some(trap) = self
            .traps
            .iter()
            .rev()
            .find(|t| doc.contains(t.dialog, event.target))
        else {
            return TrapOutcome::Ignored;
        };

        match event.key {
            Key::Escape => TrapOutcome::CloseRequested(trap.dialog),
            Key::Tab => {
                let (Some(first), Some(last)) = (trap.first(), trap.last()) else {
                    return TrapOutcome::Ignored;
                };
                let active = doc.active_element();
                let wrap_to = if event.modifiers.shift {
                    (active == Some(first)).then_some(last)
                } else {
                    (active == Some(last)).then_some(first)
                };
                match wrap_to {
                    Some(target) => {
                        doc.focus(target);
                        TrapOutcome::Cycled
                    }
                    None => TrapOutcome::Ignored,
                }
            }
            _ => TrapOutcome::Ignored,
        }
    }
}
