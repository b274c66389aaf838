//! Lumen Accessibility Layer
//!
//! Page-level accessibility enhancements running on top of the
//! headless DOM in `lumen-dom`.
//!
//! Features:
//! - Theme switching (default, dark, high contrast) with persistence
//! - Live-region announcements for assistive technology
//! - Global keyboard shortcuts (Alt+1, Alt+2, Alt+T)
//! - Focus traps for modal dialogs with Escape-to-close
//! - Focus restoration
//! - System preference detection (reduced motion, contrast, color scheme)
//! - Landmark roles and skip links
//!
//! All mutable state lives in one [`A11yState`] owned by the
//! [`Enhancer`]; page events are routed through an explicit
//! [`EventRouter`] dispatch table.

pub mod announcer;
pub mod config;
pub mod detector;
pub mod enhancer;
pub mod events;
pub mod focus;
pub mod focus_trap;
pub mod handlers;
pub mod keyboard;
pub mod landmarks;
pub mod locale;
pub mod media_preferences;
pub mod router;
pub mod storage;
pub mod theme;
pub mod timers;

pub use announcer::{Announcer, ANNOUNCER_ID};
pub use config::Config;
pub use detector::{DetectionReport, PreferenceDetector};
pub use enhancer::{A11yState, Enhancer};
pub use events::{Dispatch, DispatchOutcome, EventKind, PageEvent};
pub use focus::FocusRestorer;
pub use focus_trap::{FocusTrapManager, Trap, TrapOutcome};
pub use keyboard::{Key, KeyModifiers, KeyboardEvent, KeyboardRouter, KeyboardShortcut, ShortcutAction};
pub use locale::Locale;
pub use media_preferences::{ColorScheme, ContrastPreference, MediaOverrides, MediaPreferences};
pub use router::{EventRouter, Handler};
pub use storage::{PreferenceStore, Storage};
pub use theme::{Theme, ThemeController, ThemeTarget, THEME_ATTRIBUTE};
pub use timers::{TimerId, TimerQueue, TimerTask};

/// Accessibility layer error
#[derive(Debug, thiserror::Error)]
pub enum A11yError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
