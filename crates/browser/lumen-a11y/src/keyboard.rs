//! Keyboard Events and Shortcuts
//!
//! Key-down events and the global shortcut table.

use std::collections::HashMap;

use lumen_dom::NodeId;

/// Key value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Character(char),
    Tab,
    Escape,
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Home,
    End,
    Unidentified(String),
}

impl Key {
    /// Parse a `KeyboardEvent.key` value
    pub fn parse(s: &str) -> Self {
        match s {
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "Enter" => Self::Enter,
            " " | "Space" => Self::Space,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            s => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Unidentified(s.to_string()),
                }
            }
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Character(c) => c.to_uppercase().to_string(),
            Self::Unidentified(s) => s.clone(),
            other => format!("{other:?}"),
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyModifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyModifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Key-down event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardEvent {
    pub key: Key,
    pub modifiers: KeyModifiers,
    /// Element the event was dispatched to (the focused element, or body)
    pub target: NodeId,
}

impl KeyboardEvent {
    pub fn new(key: Key, modifiers: KeyModifiers, target: NodeId) -> Self {
        Self { key, modifiers, target }
    }

    /// Parse a combo such as `Alt+T`, `Shift+Tab` or `Escape`
    pub fn from_combo(combo: &str, target: NodeId) -> Option<Self> {
        let mut modifiers = KeyModifiers::default();
        let mut parts: Vec<&str> = combo.split('+').collect();
        // "Alt++" means Alt and the plus key
        if combo.ends_with("++") {
            parts.truncate(parts.len() - 2);
            parts.push("+");
        }
        let key = parts.pop().filter(|k| !k.is_empty())?;
        for part in parts {
            match part.to_ascii_lowercase().as_str() {
                "alt" | "option" => modifiers.alt = true,
                "ctrl" | "control" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "meta" | "cmd" | "super" => modifiers.meta = true,
                _ => return None,
            }
        }
        Some(Self::new(Key::parse(key), modifiers, target))
    }

    pub fn is_tab(&self) -> bool {
        self.key == Key::Tab
    }
}

/// Keyboard shortcut
///
/// Character keys are stored lowercased and ignore Shift, so `Alt+T`
/// and `Alt+Shift+T` are the same shortcut.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyboardShortcut {
    pub key: Key,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyboardShortcut {
    pub fn new(key: Key) -> Self {
        Self { key: normalize(key), ctrl: false, alt: false, shift: false, meta: false }
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = !matches!(self.key, Key::Character(_));
        self
    }

    pub fn from_event(event: &KeyboardEvent) -> Self {
        let key = normalize(event.key.clone());
        let is_char = matches!(key, Key::Character(_));
        Self {
            key,
            ctrl: event.modifiers.ctrl,
            alt: event.modifiers.alt,
            shift: event.modifiers.shift && !is_char,
            meta: event.modifiers.meta,
        }
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.alt {
            parts.push("Alt".to_string());
        }
        if self.shift {
            parts.push("Shift".to_string());
        }
        if self.meta {
            parts.push("Cmd".to_string());
        }
        parts.push(self.key.label());
        parts.join("+")
    }
}

fn normalize(key: Key) -> Key {
    match key {
        Key::Character(c) => Key::Character(c.to_ascii_lowercase()),
        other => other,
    }
}

/// What a global shortcut does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    /// Focus the `main` landmark
    FocusMain,
    /// Focus the `nav` landmark
    FocusNavigation,
    /// Advance to the next theme
    CycleTheme,
}

/// Global shortcut dispatch table
#[derive(Debug, Default)]
pub struct KeyboardRouter {
    shortcuts: HashMap<KeyboardShortcut, ShortcutAction>,
}

impl KeyboardRouter {
    /// Router with the default bindings: Alt+1, Alt+2, Alt+T
    pub fn new() -> Self {
        let mut router = Self::default();
        router.register(KeyboardShortcut::new(Key::Character('1')).alt(), ShortcutAction::FocusMain);
        router.register(KeyboardShortcut::new(Key::Character('2')).alt(), ShortcutAction::FocusNavigation);
        router.register(KeyboardShortcut::new(Key::Character('t')).alt(), ShortcutAction::CycleTheme);
        router
    }

    pub fn register(&mut self, shortcut: KeyboardShortcut, action: ShortcutAction) {
        self.shortcuts.insert(shortcut, action);
    }

    pub fn unregister(&mut self, shortcut: &KeyboardShortcut) -> Option<ShortcutAction> {
        self.shortcuts.remove(shortcut)
    }

    /// Action bound to this event, if any
    pub fn route(&self, event: &KeyboardEvent) -> Option<ShortcutAction> {
        self.shortcuts.get(&KeyboardShortcut::from_event(event)).copied()
    }

    /// Bindings sorted by their display string
    pub fn bindings(&self) -> Vec<(String, ShortcutAction)> {
        let mut out: Vec<_> = self
            .shortcuts
            .iter()
            .map(|(s, a)| (s.display(), *a))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}
