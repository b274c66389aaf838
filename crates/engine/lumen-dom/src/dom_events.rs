//! DOM Events
//!
//! Events the document records while it is mutated, for the host to
//! drain and dispatch.

use crate::NodeId;

/// DOM event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventType {
    /// Element received focus (bubbles)
    FocusIn,
    /// Element lost focus (bubbles)
    FocusOut,
    /// Attribute changed
    AttrModified,
}

/// DOM event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomEvent {
    pub event_type: DomEventType,
    pub target: NodeId,
    /// For focus events: the element losing/gaining focus on the other side
    pub related_target: Option<NodeId>,
    pub attr_name: Option<String>,
    pub prev_value: Option<String>,
    pub new_value: Option<String>,
}

impl DomEvent {
    fn bare(event_type: DomEventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            related_target: None,
            attr_name: None,
            prev_value: None,
            new_value: None,
        }
    }

    /// Create focusin event
    pub fn focus_in(target: NodeId, previous: Option<NodeId>) -> Self {
        Self {
            related_target: previous,
            ..Self::bare(DomEventType::FocusIn, target)
        }
    }

    /// Create focusout event
    pub fn focus_out(target: NodeId, next: Option<NodeId>) -> Self {
        Self {
            related_target: next,
            ..Self::bare(DomEventType::FocusOut, target)
        }
    }

    /// Create attribute modified event
    pub fn attr_modified(
        target: NodeId,
        name: &str,
        old_value: Option<&str>,
        new_value: Option<&str>,
    ) -> Self {
        Self {
            attr_name: Some(name.to_string()),
            prev_value: old_value.map(str::to_string),
            new_value: new_value.map(str::to_string),
            ..Self::bare(DomEventType::AttrModified, target)
        }
    }
}
