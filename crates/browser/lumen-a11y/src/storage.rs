//! Storage
//!
//! Origin-scoped key-value storage (localStorage semantics) and the
//! theme preference record kept in it.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::Theme;

/// Storage backend
#[derive(Debug, Default)]
pub struct Storage {
    data: HashMap<String, String>,
    path: Option<PathBuf>,
}

impl Storage {
    /// In-memory storage (sessionStorage)
    pub fn session() -> Self {
        Self::default()
    }

    /// Persistent storage backed by a JSON object file (localStorage).
    ///
    /// A missing, unreadable or malformed file starts empty; the store is
    /// always usable.
    pub fn local(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed storage {}: {}", path.display(), e);
                HashMap::new()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!("Could not read storage {}: {}", path.display(), e);
                HashMap::new()
            }
        };

        Self { data, path: Some(path) }
    }

    /// localStorage for `origin`, stored under `dir`
    pub fn for_origin(dir: &Path, origin: &str) -> Self {
        Self::local(dir.join(origin_file_name(origin)))
    }

    pub fn get_item(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    pub fn set_item(&mut self, key: &str, value: &str) {
        self.data.insert(key.to_string(), value.to_string());
        self.persist();
    }

    pub fn remove_item(&mut self, key: &str) {
        if self.data.remove(key).is_some() {
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
        self.persist();
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn is_persistent(&self) -> bool {
        self.path.is_some()
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let sorted: BTreeMap<_, _> = self.data.iter().collect();
        let result = serde_json::to_string_pretty(&sorted)
            .map_err(io::Error::from)
            .and_then(|contents| write_atomically(path, &contents));
        if let Err(e) = result {
            tracing::warn!("Could not persist storage {}: {}", path.display(), e);
        }
    }
}

fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(tmp, path)
}

/// `https://example.com:8080` -> `https_example.com_8080.storage`
fn origin_file_name(origin: &str) -> String {
    let mut name: String = origin
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    while name.contains("__") {
        name = name.replace("__", "_");
    }
    format!("{}.storage", name.trim_matches('_'))
}

/// Default storage key for the theme preference
pub const PREFERENCE_KEY: &str = "preferred-theme";

/// The persisted theme choice
///
/// Absent, empty or unrecognized values all read as "no preference".
#[derive(Debug)]
pub struct PreferenceStore {
    storage: Storage,
    key: String,
}

impl PreferenceStore {
    pub fn new(storage: Storage, key: &str) -> Self {
        Self { storage, key: key.to_string() }
    }

    /// Persisted explicit choice, if any
    pub fn get(&self) -> Option<Theme> {
        self.storage
            .get_item(&self.key)
            .and_then(Theme::from_identifier)
            .filter(|t| *t != Theme::Default)
    }

    pub fn set(&mut self, theme: Theme) {
        if theme == Theme::Default {
            self.clear();
        } else {
            self.storage.set_item(&self.key, theme.as_str());
        }
    }

    pub fn clear(&mut self) {
        self.storage.remove_item(&self.key);
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new(Storage::session(), PREFERENCE_KEY)
    }
}
