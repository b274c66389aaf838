//! Preference Detector
//!
//! Runs once at startup: reduced motion shortens animations, and when
//! the user has no saved theme a contrast or dark system preference
//! picks one.

use lumen_dom::Document;

use crate::{Announcer, MediaPreferences, Theme, ThemeController, TimerQueue};

/// CSS custom property shortened under reduced motion
pub const ANIMATION_DURATION_PROPERTY: &str = "--animation-duration";

/// What the detector did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DetectionReport {
    pub reduced_motion: bool,
    /// Theme applied from a system preference
    pub applied_theme: Option<Theme>,
    /// A saved theme was present and took precedence
    pub saved_theme_kept: bool,
}

/// One-shot system preference detector
#[derive(Debug)]
pub struct PreferenceDetector {
    reduced_motion_duration: String,
    has_run: bool,
}

impl PreferenceDetector {
    pub fn new(reduced_motion_duration: &str) -> Self {
        Self {
            reduced_motion_duration: reduced_motion_duration.to_string(),
            has_run: false,
        }
    }

    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Read the preferences and act on them. Later calls do nothing and
    /// return `None`.
    pub fn run(
        &mut self,
        doc: &mut Document,
        prefs: &MediaPreferences,
        theme: &mut ThemeController,
        announcer: &mut Announcer,
        timers: &mut TimerQueue,
    ) -> Option<DetectionReport> {
        if self.has_run {
            return None;
        }
        self.has_run = true;

        let mut report = DetectionReport::default();

        if prefs.matches("(prefers-reduced-motion: reduce)") {
            let html = doc.document_element();
            doc.set_style_property(html, ANIMATION_DURATION_PROPERTY, &self.reduced_motion_duration);
            report.reduced_motion = true;
        }

        if theme.store().get().is_some() {
            report.saved_theme_kept = true;
        } else if prefs.matches("(prefers-contrast: more)") {
            theme.apply(doc, Theme::HighContrast, announcer, timers);
            report.applied_theme = Some(Theme::HighContrast);
        } else if prefs.matches("(prefers-color-scheme: dark)") {
            theme.apply(doc, Theme::Dark, announcer, timers);
            report.applied_theme = Some(Theme::Dark);
        }

        tracing::debug!("Preference detection: {:?}", report);
        Some(report)
    }
}

impl Default for PreferenceDetector {
    fn default() -> Self {
        Self::new("0.01ms")
    }
}
