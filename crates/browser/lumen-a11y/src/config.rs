//! Layer Configuration
//!
//! Every field has a default; a JSON file only needs the keys it
//! changes.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::storage::PREFERENCE_KEY;
use crate::{A11yError, Locale, MediaOverrides, ThemeTarget};

/// How long an announcement stays in the live region
pub const DEFAULT_ANNOUNCE_CLEAR_MS: u64 = 3000;

/// How long a skip link target keeps its temporary tabindex
pub const DEFAULT_SKIP_LINK_TABINDEX_MS: u64 = 1000;

/// Accessibility layer configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage key of the theme preference
    pub storage_key: String,
    pub announce_clear_ms: u64,
    pub skip_link_tabindex_ms: u64,
    /// Value of `--animation-duration` under reduced motion
    pub reduced_motion_duration: String,
    /// Element carrying the theme marker
    pub theme_target: ThemeTarget,
    pub locale: Locale,
    /// Replacements for detected system preferences
    pub media: MediaOverrides,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: PREFERENCE_KEY.to_string(),
            announce_clear_ms: DEFAULT_ANNOUNCE_CLEAR_MS,
            skip_link_tabindex_ms: DEFAULT_SKIP_LINK_TABINDEX_MS,
            reduced_motion_duration: "0.01ms".to_string(),
            theme_target: ThemeTarget::Body,
            locale: Locale::En,
            media: MediaOverrides::default(),
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, A11yError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, A11yError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
