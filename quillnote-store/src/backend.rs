//! Pluggable key-value backends.
//!
//! Each backend is an independent, independently lossy store. The trial
//! clock and usage counter write to all of them and reconcile on read,
//! so no single backend is trusted on its own.

use crate::error::StoreResult;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// A single redundant key-value source.
///
/// `read` fails closed (any problem means "absent"); `write` fails open
/// (failures are logged and swallowed).
pub trait StoreBackend: Send + Sync {
    /// A short label for logging and diagnostics.
    fn label(&self) -> &str;

    /// Reads a value, or `None` if missing or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Writes a value, swallowing failures.
    fn write(&self, key: &str, value: &str);
}

// ── Preference store ─────────────────────────────────────────────

/// The platform preference store: a flat JSON string map in the user's
/// configuration directory.
pub struct PrefsBackend {
    path: PathBuf,
}

impl PrefsBackend {
    /// Creates a preference backend rooted at the given directory.
    #[must_use]
    pub fn new(dir: &Path) -> Self {
        Self {
            path: dir.join("prefs.json"),
        }
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn store(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StoreBackend for PrefsBackend {
    fn label(&self) -> &str {
        "prefs"
    }

    fn read(&self, key: &str) -> Option<String> {
        self.load().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut map = self.load().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        if let Err(e) = self.store(&map) {
            warn!(backend = self.label(), key, "preference write failed: {e}");
        }
    }
}

// ── Hidden file cache ────────────────────────────────────────────

/// A hidden file cache: `key=value` lines in a dotfile planted in an
/// unrelated-looking directory.
///
/// The dot prefix keeps it out of casual directory listings; on Windows
/// the installer additionally marks it hidden+system.
pub struct CacheFileBackend {
    label: String,
    path: PathBuf,
}

impl CacheFileBackend {
    /// Creates a cache backend with the given file name inside `dir`.
    #[must_use]
    pub fn new(label: &str, dir: &Path, file_name: &str) -> Self {
        Self {
            label: label.to_string(),
            path: dir.join(file_name),
        }
    }

    fn load(&self) -> StoreResult<BTreeMap<String, String>> {
        let raw = std::fs::read_to_string(&self.path)?;
        let mut map = BTreeMap::new();
        for line in raw.lines() {
            if let Some((k, v)) = line.split_once('=') {
                map.insert(k.to_string(), v.to_string());
            }
        }
        Ok(map)
    }

    fn store(&self, map: &BTreeMap<String, String>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut raw = String::new();
        for (k, v) in map {
            raw.push_str(k);
            raw.push('=');
            raw.push_str(v);
            raw.push('\n');
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl StoreBackend for CacheFileBackend {
    fn label(&self) -> &str {
        &self.label
    }

    fn read(&self, key: &str) -> Option<String> {
        self.load().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        let mut map = self.load().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        if let Err(e) = self.store(&map) {
            warn!(backend = self.label.as_str(), key, "cache write failed: {e}");
        }
    }
}

// ── In-memory backend ────────────────────────────────────────────

/// An in-memory backend for tests and platforms without a writable disk.
#[derive(Default)]
pub struct MemoryBackend {
    label: String,
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    /// Creates an empty in-memory backend.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            map: Mutex::new(BTreeMap::new()),
        }
    }

    /// Removes a key, simulating a deleted store.
    pub fn clear(&self, key: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.remove(key);
        }
    }
}

impl StoreBackend for MemoryBackend {
    fn label(&self) -> &str {
        &self.label
    }

    fn read(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn write(&self, key: &str, value: &str) {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
    }
}
