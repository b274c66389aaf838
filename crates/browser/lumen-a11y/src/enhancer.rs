//! Accessibility Enhancer
//!
//! Owns the layer state and the router, and plays the browser's part:
//! delivering focus events, running timers and performing the default
//! action of events nobody prevented.

use lumen_dom::{Document, DomEventType, NodeId};

use crate::focus::sequential_step;
use crate::{
    Announcer, Config, DetectionReport, DispatchOutcome, EventRouter, FocusRestorer,
    FocusTrapManager, Key, KeyboardRouter, Locale, MediaPreferences, PageEvent, PreferenceDetector,
    PreferenceStore, Storage, Theme, ThemeController, TimerQueue, TimerTask,
};

/// Upper bound on focus event rounds per pump
const MAX_PUMP_ROUNDS: usize = 16;

/// All mutable state of the layer
#[derive(Debug)]
pub struct A11yState {
    pub config: Config,
    pub theme: ThemeController,
    pub announcer: Announcer,
    pub timers: TimerQueue,
    pub restorer: FocusRestorer,
    pub traps: FocusTrapManager,
    pub shortcuts: KeyboardRouter,
    pub detector: PreferenceDetector,
}

impl A11yState {
    pub fn new(config: Config, storage: Storage) -> Self {
        let store = PreferenceStore::new(storage, &config.storage_key);
        Self {
            theme: ThemeController::new(store, config.theme_target, config.locale),
            announcer: Announcer::new(config.announce_clear_ms),
            timers: TimerQueue::new(),
            restorer: FocusRestorer::new(),
            traps: FocusTrapManager::new(),
            shortcuts: KeyboardRouter::new(),
            detector: PreferenceDetector::new(&config.reduced_motion_duration),
            config,
        }
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn apply_theme(&mut self, doc: &mut Document, theme: Theme) {
        self.theme.apply(doc, theme, &mut self.announcer, &mut self.timers);
    }

    pub fn apply_theme_named(&mut self, doc: &mut Document, name: &str) {
        self.theme.apply_named(doc, name, &mut self.announcer, &mut self.timers);
    }

    pub fn cycle_theme(&mut self, doc: &mut Document) -> Theme {
        self.theme.cycle(doc, &mut self.announcer, &mut self.timers)
    }

    pub fn announce(&mut self, doc: &mut Document, message: &str) {
        self.announcer.announce(doc, &mut self.timers, message);
    }

    /// Focus the first element matching `selector`; skipped if absent
    pub fn focus_landmark(&mut self, doc: &mut Document, selector: &str) -> bool {
        match doc.query_selector(selector) {
            Some(landmark) => doc.focus(landmark),
            None => {
                tracing::debug!("No {} landmark to focus", selector);
                false
            }
        }
    }

    /// Show a dialog, lock page scrolling, trap focus inside it and move
    /// focus to its first focusable element. Returns whether a trap was
    /// armed.
    pub fn open_dialog(&mut self, doc: &mut Document, dialog: NodeId) -> bool {
        if doc.element(dialog).is_none() || !doc.is_connected(dialog) {
            return false;
        }
        let return_focus = doc
            .active_element()
            .or(self.restorer.last_focused())
            .filter(|&n| !doc.contains(dialog, n));

        // Focusables are only computed on a shown dialog
        let display = doc.style_property(dialog, "display").map(str::to_string);
        doc.set_style_property(dialog, "display", "");
        if !self.traps.arm(doc, dialog, return_focus) {
            doc.set_style_property(dialog, "display", display.as_deref().unwrap_or(""));
            tracing::debug!("Dialog {:?} left closed", dialog);
            return false;
        }
        let body = doc.body();
        doc.set_style_property(body, "overflow", "hidden");
        if let Some(first) = self.traps.trap(dialog).and_then(|t| t.first()) {
            doc.focus(first);
        }
        true
    }

    /// Hide a dialog, restore scrolling, disarm its trap and give focus
    /// back. Returns whether focus was restored.
    ///
    /// The element focused when the dialog opened wins; otherwise the
    /// last focused element outside the dialog is used. Focus left inside
    /// the hidden dialog is dropped.
    pub fn close_dialog(&mut self, doc: &mut Document, dialog: NodeId) -> bool {
        let trap = self.traps.disarm(dialog);

        doc.set_style_property(dialog, "display", "none");
        // An outer dialog still open keeps the page locked
        self.traps.prune(doc);
        if self.traps.armed_count() == 0 {
            let body = doc.body();
            doc.set_style_property(body, "overflow", "auto");
        }

        let target = trap
            .and_then(|t| t.return_focus)
            .or(self.restorer.last_focused())
            .filter(|&n| !doc.contains(dialog, n));
        let restored = target.is_some_and(|t| self.restorer.restore_to(doc, t));

        if !restored && doc.active_element().is_some_and(|a| doc.contains(dialog, a)) {
            doc.blur();
        }
        tracing::debug!("Dialog {:?} closed (focus restored: {})", dialog, restored);
        restored
    }
}

/// Accessibility enhancer
#[derive(Debug)]
pub struct Enhancer {
    state: A11yState,
    router: EventRouter,
}

impl Enhancer {
    pub fn new(config: Config, storage: Storage) -> Self {
        Self {
            state: A11yState::new(config, storage),
            router: EventRouter::with_defaults(),
        }
    }

    pub fn state(&self) -> &A11yState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut A11yState {
        &mut self.state
    }

    pub fn router_mut(&mut self) -> &mut EventRouter {
        &mut self.router
    }

    /// Script load: read system preferences once, with configured
    /// overrides applied. Later calls return `None`.
    pub fn start(&mut self, doc: &mut Document, system: &MediaPreferences) -> Option<DetectionReport> {
        let prefs = system.with_overrides(&self.state.config.media);
        let state = &mut self.state;
        let report = state.detector.run(
            doc,
            &prefs,
            &mut state.theme,
            &mut state.announcer,
            &mut state.timers,
        )?;
        tracing::info!(
            "Accessibility layer started (theme: {}, locale: {})",
            state.theme.active().as_str(),
            state.config.locale.tag()
        );
        self.pump(doc);
        Some(report)
    }

    /// Deliver an event, then perform its default action unless a
    /// handler prevented it
    pub fn dispatch(&mut self, doc: &mut Document, event: PageEvent) -> DispatchOutcome {
        self.pump(doc);
        let outcome = self.router.dispatch(&mut self.state, doc, event.clone());
        if !outcome.default_prevented {
            self.default_action(doc, &event);
        }
        self.pump(doc);
        outcome
    }

    /// Key-down on the focused element (or the body)
    pub fn key_down(&mut self, doc: &mut Document, key: Key, modifiers: crate::KeyModifiers) -> DispatchOutcome {
        let target = doc.active_element().unwrap_or(doc.body());
        let event = crate::KeyboardEvent::new(key, modifiers, target);
        self.dispatch(doc, PageEvent::KeyDown(event))
    }

    /// Advance the virtual clock and run the timers that came due
    pub fn advance(&mut self, doc: &mut Document, elapsed_ms: u64) {
        for (id, task) in self.state.timers.advance(elapsed_ms) {
            match task {
                TimerTask::ClearAnnouncement => self.state.announcer.on_clear_timer(doc, id),
                TimerTask::RemoveTabIndex(node) => {
                    doc.remove_attribute(node, "tabindex");
                }
            }
        }
        self.pump(doc);
    }

    /// Deliver focus changes the document recorded as focus-in events
    pub fn pump(&mut self, doc: &mut Document) {
        for _ in 0..MAX_PUMP_ROUNDS {
            if !doc.has_pending_events() {
                return;
            }
            for event in doc.drain_events() {
                if event.event_type == DomEventType::FocusIn {
                    let focus_in = PageEvent::FocusIn {
                        target: event.target,
                        related: event.related_target,
                    };
                    self.router.dispatch(&mut self.state, doc, focus_in);
                }
            }
        }
        tracing::warn!("Focus events still pending after {} rounds", MAX_PUMP_ROUNDS);
    }

    fn default_action(&mut self, doc: &mut Document, event: &PageEvent) {
        match event {
            PageEvent::KeyDown(key) => {
                let m = key.modifiers;
                if m.ctrl || m.alt || m.meta {
                    return;
                }
                match key.key {
                    Key::Tab => {
                        let order = doc.tab_order();
                        if let Some(next) = sequential_step(&order, doc.active_element(), m.shift) {
                            doc.focus(next);
                        }
                    }
                    // Keyboard activation fires a click
                    Key::Enter if is_activatable(doc, key.target, true) => {
                        self.dispatch(doc, PageEvent::Click { target: key.target });
                    }
                    Key::Space if is_activatable(doc, key.target, false) => {
                        self.dispatch(doc, PageEvent::Click { target: key.target });
                    }
                    _ => {}
                }
            }
            PageEvent::Click { target } => {
                let focusable = doc
                    .element(*target)
                    .is_some_and(|e| e.is_keyboard_focusable());
                if focusable && !doc.is_hidden(*target) {
                    doc.focus(*target);
                }
            }
            PageEvent::Ready | PageEvent::FocusIn { .. } => {}
        }
    }
}

/// Buttons activate on Enter and Space, links on Enter only
fn is_activatable(doc: &Document, node: NodeId, enter: bool) -> bool {
    match doc.element(node) {
        Some(e) if e.tag == "button" => true,
        Some(e) => enter && e.tag == "a" && e.has_attr("href"),
        None => false,
    }
}
