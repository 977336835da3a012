//! Thin key-value persistence used for the last-loaded city.
//!
//! No eviction, no policy: `get_string` with a default and `set_value`,
//! backed by a TOML file next to the config.

use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

/// Key under which the most recently loaded city is stored.
pub const KEY_LAST_CITY: &str = "last_city";

/// City used before anything has been loaded successfully.
pub const DEFAULT_CITY: &str = "London";

pub trait CacheProvider: Send + Sync {
    /// Returns the stored value for `key`, or `default` when absent.
    fn get_string(&self, key: &str, default: &str) -> String;

    /// Stores `value` under `key`, overwriting any previous value.
    fn set_value(&self, key: &str, value: &str);
}

/// In-memory cache; state is lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl CacheProvider for MemoryCache {
    fn get_string(&self, key: &str, default: &str) -> String {
        let entries = self.entries.lock().expect("cache lock");
        entries.get(key).cloned().unwrap_or_else(|| default.to_owned())
    }

    fn set_value(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.insert(key.to_owned(), value.to_owned());
    }
}

/// File-backed cache. Reads once at open, writes through on every set.
///
/// Write failures are logged and swallowed: losing the remembered city
/// must never fail a weather load.
#[derive(Debug)]
pub struct DiskCache {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl DiskCache {
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("ignoring unreadable cache file {}: {e}", path.display());
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };

        Self { path, entries: Mutex::new(entries) }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let serialized = match toml::to_string_pretty(entries) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("failed to serialize cache: {e}");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                tracing::warn!("failed to create cache directory {}: {e}", parent.display());
                return;
            }
        }

        if let Err(e) = fs::write(&self.path, serialized) {
            tracing::warn!("failed to write cache file {}: {e}", self.path.display());
        }
    }
}

impl CacheProvider for DiskCache {
    fn get_string(&self, key: &str, default: &str) -> String {
        let entries = self.entries.lock().expect("cache lock");
        entries.get(key).cloned().unwrap_or_else(|| default.to_owned())
    }

    fn set_value(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("cache lock");
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }
}
