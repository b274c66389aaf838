//! Event Handlers
//!
//! The layer's handlers and the table they are installed in. Key-down
//! handlers are registered innermost first (theme button, dialog,
//! document) so they run in bubbling order.

use lumen_dom::{Document, NodeId};

use crate::landmarks::{activate_skip_link, enhance_landmarks, skip_link_for};
use crate::{
    A11yState, Dispatch, EventKind, EventRouter, Key, PageEvent, ShortcutAction, TrapOutcome,
    THEME_ATTRIBUTE,
};

/// Install the default handlers
pub fn register(router: &mut EventRouter) {
    router.on(EventKind::Ready, on_ready);
    router.on(EventKind::KeyDown, theme_button_key);
    router.on(EventKind::KeyDown, focus_trap_key);
    router.on(EventKind::KeyDown, global_shortcut);
    router.on(EventKind::Click, theme_button_click);
    router.on(EventKind::Click, skip_link_click);
    router.on(EventKind::FocusIn, track_focus);
}

/// Landmarks, the saved theme, and traps on dialogs already open
fn on_ready(state: &mut A11yState, doc: &mut Document, _: &mut Dispatch) {
    enhance_landmarks(doc, state.locale());
    if let Some(theme) = state.theme.restore_saved(doc) {
        tracing::debug!("Restored saved theme {}", theme.as_str());
    }

    for dialog in doc.query_selector_all("[role=\"dialog\"]") {
        if !doc.is_hidden(dialog) {
            state.traps.arm(doc, dialog, None);
        }
    }
}

/// Element carrying a theme choice at or above `node`. The theme root
/// and anything above it never count, since they carry the active
/// theme marker.
pub fn theme_button_for(doc: &Document, node: NodeId) -> Option<NodeId> {
    let stop = [doc.body(), doc.document_element()];
    let mut current = Some(node);
    while let Some(n) = current {
        if stop.contains(&n) {
            return None;
        }
        if doc.has_attribute(n, THEME_ATTRIBUTE) {
            return Some(n);
        }
        current = doc.tree().parent(n);
    }
    None
}

fn theme_button_key(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    let PageEvent::KeyDown(event) = &dispatch.event else {
        return;
    };
    if !matches!(event.key, Key::Enter | Key::Space) {
        return;
    }
    let Some(button) = theme_button_for(doc, event.target) else {
        return;
    };
    dispatch.prevent_default();
    let name = doc.get_attribute(button, THEME_ATTRIBUTE).unwrap_or_default().to_string();
    state.apply_theme_named(doc, &name);
}

fn theme_button_click(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    let PageEvent::Click { target } = dispatch.event else {
        return;
    };
    if let Some(button) = theme_button_for(doc, target) {
        let name = doc.get_attribute(button, THEME_ATTRIBUTE).unwrap_or_default().to_string();
        state.apply_theme_named(doc, &name);
    }
}

fn focus_trap_key(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    let PageEvent::KeyDown(event) = &dispatch.event else {
        return;
    };
    match state.traps.handle_key(doc, event) {
        TrapOutcome::Ignored => {}
        TrapOutcome::Cycled => dispatch.prevent_default(),
        TrapOutcome::CloseRequested(dialog) => {
            state.close_dialog(doc, dialog);
        }
    }
}

fn global_shortcut(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    let PageEvent::KeyDown(event) = &dispatch.event else {
        return;
    };
    let Some(action) = state.shortcuts.route(event) else {
        return;
    };
    dispatch.prevent_default();
    tracing::debug!("Shortcut {:?}", action);

    match action {
        ShortcutAction::FocusMain => {
            state.focus_landmark(doc, "main");
        }
        ShortcutAction::FocusNavigation => {
            state.focus_landmark(doc, "nav");
        }
        ShortcutAction::CycleTheme => {
            state.cycle_theme(doc);
        }
    }
}

fn skip_link_click(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    let PageEvent::Click { target } = dispatch.event else {
        return;
    };
    let Some(link) = skip_link_for(doc, target) else {
        return;
    };
    dispatch.prevent_default();
    let delay = state.config.skip_link_tabindex_ms;
    activate_skip_link(doc, link, &mut state.timers, delay);
}

fn track_focus(state: &mut A11yState, doc: &mut Document, dispatch: &mut Dispatch) {
    if let PageEvent::FocusIn { target, related } = dispatch.event {
        if let Some(previous) = related {
            state.traps.capture_return(doc, target, previous);
        }
        state.restorer.track(target);
    }
}
