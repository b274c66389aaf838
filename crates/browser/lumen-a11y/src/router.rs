//! Event Router
//!
//! Explicit dispatch table from event kind to handlers. Handlers for a
//! kind run in registration order and all of them run, whether or not an
//! earlier one prevented the default.

use std::collections::HashMap;

use lumen_dom::Document;

use crate::{A11yState, Dispatch, DispatchOutcome, EventKind, PageEvent};

/// Event handler
pub type Handler = fn(&mut A11yState, &mut Document, &mut Dispatch);

/// Handler table
#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<EventKind, Vec<Handler>>,
}

impl EventRouter {
    /// Empty router
    pub fn new() -> Self {
        Self::default()
    }

    /// Router with the layer's handlers installed
    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        crate::handlers::register(&mut router);
        router
    }

    /// Add a handler for `kind`
    pub fn on(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    pub fn handler_count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, Vec::len)
    }

    /// Run every handler registered for the event's kind
    pub fn dispatch(&self, state: &mut A11yState, doc: &mut Document, event: PageEvent) -> DispatchOutcome {
        let kind = event.kind();
        let mut dispatch = Dispatch::new(event);
        let handlers = self.handlers.get(&kind).map(Vec::as_slice).unwrap_or_default();

        for handler in handlers {
            handler(state, doc, &mut dispatch);
        }

        DispatchOutcome {
            default_prevented: dispatch.default_prevented(),
            handled: handlers.len(),
        }
    }
}

impl std::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut counts: Vec<_> = self.handlers.iter().map(|(k, v)| (*k, v.len())).collect();
        counts.sort_by_key(|(k, _)| format!("{k:?}"));
        f.debug_struct("EventRouter").field("handlers", &counts).finish()
    }
}
