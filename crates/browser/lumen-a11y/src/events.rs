//! Page Events
//!
//! Events the host delivers to the layer, and the dispatch record
//! handlers see.

use lumen_dom::NodeId;

use crate::KeyboardEvent;

/// Event delivered by the host page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// DOMContentLoaded
    Ready,
    KeyDown(KeyboardEvent),
    Click { target: NodeId },
    /// Bubbling focus-in, emitted for every focus change. `related` is
    /// the element that lost focus, if any.
    FocusIn { target: NodeId, related: Option<NodeId> },
}

/// Event type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Ready,
    KeyDown,
    Click,
    FocusIn,
}

impl PageEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Ready => EventKind::Ready,
            Self::KeyDown(_) => EventKind::KeyDown,
            Self::Click { .. } => EventKind::Click,
            Self::FocusIn { .. } => EventKind::FocusIn,
        }
    }

    pub fn target(&self) -> Option<NodeId> {
        match self {
            Self::Ready => None,
            Self::KeyDown(key) => Some(key.target),
            Self::Click { target } | Self::FocusIn { target, .. } => Some(*target),
        }
    }
}

/// An event in flight
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub event: PageEvent,
    default_prevented: bool,
}

impl Dispatch {
    pub fn new(event: PageEvent) -> Self {
        Self { event, default_prevented: false }
    }

    /// `event.preventDefault()`
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Result of dispatching one event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub default_prevented: bool,
    /// Number of handlers that ran
    pub handled: usize,
}
