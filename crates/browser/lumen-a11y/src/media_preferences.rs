//! Media Preferences
//!
//! The system preferences the layer reacts to, answered as CSS media
//! queries.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};
use serde::Deserialize;

/// Color scheme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

/// Contrast preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContrastPreference {
    #[default]
    NoPreference,
    More,
    Less,
    Custom,
}

/// Combined media preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaPreferences {
    /// prefers-reduced-motion
    pub reduced_motion: bool,
    /// prefers-contrast
    pub contrast: ContrastPreference,
    /// prefers-color-scheme
    pub color_scheme: ColorScheme,
}

impl MediaPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query from system settings.
    ///
    /// Only the color scheme is detectable from the OS; motion and
    /// contrast default to no preference unless overridden.
    pub fn from_system() -> Self {
        let color_scheme = match detect_os_theme() {
            OsThemeMode::Dark => ColorScheme::Dark,
            OsThemeMode::Light => ColorScheme::Light,
        };
        Self {
            color_scheme,
            ..Self::default()
        }
    }

    /// Replace detected values with any configured overrides
    pub fn with_overrides(mut self, overrides: &MediaOverrides) -> Self {
        if let Some(reduced) = overrides.reduced_motion {
            self.reduced_motion = reduced;
        }
        if let Some(high) = overrides.high_contrast {
            self.contrast = if high {
                ContrastPreference::More
            } else {
                ContrastPreference::NoPreference
            };
        }
        if let Some(dark) = overrides.dark {
            self.color_scheme = if dark { ColorScheme::Dark } else { ColorScheme::Light };
        }
        self
    }

    pub fn prefers_high_contrast(&self) -> bool {
        self.contrast == ContrastPreference::More
    }

    pub fn prefers_dark(&self) -> bool {
        self.color_scheme == ColorScheme::Dark
    }

    /// Check if a media query matches
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();

        // prefers-reduced-motion
        if query.contains("prefers-reduced-motion") {
            if query.contains("no-preference") {
                return !self.reduced_motion;
            }
            if query.contains("reduce") {
                return self.reduced_motion;
            }
        }

        // prefers-color-scheme
        if query.contains("prefers-color-scheme") {
            if query.contains("dark") {
                return self.color_scheme == ColorScheme::Dark;
            }
            if query.contains("light") {
                return self.color_scheme == ColorScheme::Light;
            }
        }

        // prefers-contrast; `high` is the legacy spelling of `more`
        if query.contains("prefers-contrast") {
            if query.contains("no-preference") {
                return self.contrast == ContrastPreference::NoPreference;
            }
            if query.contains("more") || query.contains("high") {
                return self.contrast == ContrastPreference::More;
            }
            if query.contains("less") || query.contains("low") {
                return self.contrast == ContrastPreference::Less;
            }
            if query.contains("custom") {
                return self.contrast == ContrastPreference::Custom;
            }
        }

        false
    }
}

/// Configured replacements for system preferences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MediaOverrides {
    pub reduced_motion: Option<bool>,
    pub high_contrast: Option<bool>,
    pub dark: Option<bool>,
}
