//! Theme Controller
//!
//! One active theme at a time, marked on the theme root element and
//! remembered in the preference store.

use lumen_dom::{Document, NodeId};
use serde::Deserialize;

use crate::{Announcer, Locale, PreferenceStore, TimerQueue};

/// Attribute carrying the active theme on the root, and the target
/// theme on theme buttons
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Visual theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Default,
    Dark,
    HighContrast,
}

impl Theme {
    /// Cycle order
    pub const ALL: [Theme; 3] = [Theme::Default, Theme::Dark, Theme::HighContrast];

    /// Strict parse of a theme identifier
    pub fn from_identifier(s: &str) -> Option<Self> {
        match s.trim() {
            "default" => Some(Self::Default),
            "dark" => Some(Self::Dark),
            "high-contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }

    /// Lenient parse: anything unrecognized is the default theme
    pub fn parse(s: &str) -> Self {
        Self::from_identifier(s).unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
        }
    }

    /// Next theme in cycle order, wrapping after the last
    pub fn next(self) -> Self {
        match self {
            Self::Default => Self::Dark,
            Self::Dark => Self::HighContrast,
            Self::HighContrast => Self::Default,
        }
    }
}

/// Element that carries the theme marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeTarget {
    #[default]
    Body,
    Html,
}

impl ThemeTarget {
    pub fn resolve(&self, doc: &Document) -> NodeId {
        match self {
            Self::Body => doc.body(),
            Self::Html => doc.document_element(),
        }
    }
}

/// Theme state machine
#[derive(Debug)]
pub struct ThemeController {
    active: Theme,
    store: PreferenceStore,
    target: ThemeTarget,
    locale: Locale,
}

impl ThemeController {
    /// The persisted choice, if any, becomes the active theme
    pub fn new(store: PreferenceStore, target: ThemeTarget, locale: Locale) -> Self {
        Self {
            active: store.get().unwrap_or_default(),
            store,
            target,
            locale,
        }
    }

    pub fn active(&self) -> Theme {
        self.active
    }

    pub fn target(&self) -> ThemeTarget {
        self.target
    }

    pub fn store(&self) -> &PreferenceStore {
        &self.store
    }

    /// Theme marker currently on the root element
    pub fn marker(&self, doc: &Document) -> Option<Theme> {
        doc.get_attribute(self.target.resolve(doc), THEME_ATTRIBUTE)
            .map(Theme::parse)
    }

    /// Clear the marker, then set it for any non-default theme
    fn write_marker(&self, doc: &mut Document, theme: Theme) {
        let root = self.target.resolve(doc);
        doc.remove_attribute(root, THEME_ATTRIBUTE);
        if theme != Theme::Default {
            doc.set_attribute(root, THEME_ATTRIBUTE, theme.as_str());
        }
    }

    /// Switch theme: mark the root, persist the choice, announce it
    pub fn apply(
        &mut self,
        doc: &mut Document,
        theme: Theme,
        announcer: &mut Announcer,
        timers: &mut TimerQueue,
    ) {
        self.write_marker(doc, theme);
        self.store.set(theme);
        self.active = theme;
        tracing::debug!("Theme applied: {}", theme.as_str());

        let message = self.locale.theme_changed(theme);
        announcer.announce(doc, timers, &message);
    }

    /// Apply by identifier; unknown names fall back to the default theme
    pub fn apply_named(
        &mut self,
        doc: &mut Document,
        name: &str,
        announcer: &mut Announcer,
        timers: &mut TimerQueue,
    ) {
        self.apply(doc, Theme::parse(name), announcer, timers);
    }

    /// Advance to the next theme in cycle order
    pub fn cycle(&mut self, doc: &mut Document, announcer: &mut Announcer, timers: &mut TimerQueue) -> Theme {
        let next = self.active.next();
        self.apply(doc, next, announcer, timers);
        next
    }

    /// Put the persisted theme back on the root without announcing it
    pub fn restore_saved(&mut self, doc: &mut Document) -> Option<Theme> {
        let saved = self.store.get()?;
        self.write_marker(doc, saved);
        self.active = saved;
        Some(saved)
    }
}
