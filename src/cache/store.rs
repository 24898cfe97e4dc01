//! Persistent cache store backed by a single JSON file
//!
//! Provides a `CacheStore` that maps request URLs to raw response bodies.
//! The whole mapping is loaded once at startup and rewritten to disk after
//! every mutation, so the on-disk copy always reflects the latest state.

use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur when persisting the cache
///
/// Load-side failures are never surfaced (a missing or corrupt backing file
/// simply yields an empty cache); these errors only arise on the write path,
/// where silent data loss is unacceptable.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Writing the backing file failed
    #[error("failed to write cache file: {0}")]
    Write(#[from] std::io::Error),

    /// Serializing the mapping to JSON failed
    #[error("failed to serialize cache contents: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Disk-backed mapping from request URL to raw response body
///
/// Keys are exact URL strings, used verbatim: case, trailing slashes, and
/// query-parameter order are all significant. The most recent insert for a
/// key wins. There is no expiry; an entry persists until the backing file is
/// deleted.
#[derive(Debug)]
pub struct CacheStore {
    /// Path of the backing JSON file
    path: PathBuf,
    /// In-memory copy of the on-disk mapping
    entries: HashMap<String, String>,
}

impl CacheStore {
    /// Opens the cache at the given backing file path
    ///
    /// Reads and parses the backing file if it exists. Any failure — file
    /// missing, unreadable, or containing malformed JSON — yields an empty
    /// cache rather than an error: "no cache" and "corrupt cache" are
    /// treated identically.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load_entries(&path);
        Self { path, entries }
    }

    /// Returns the default backing file path in the XDG cache directory
    ///
    /// Uses `~/.cache/parkscout/sites.json` on Linux, or the equivalent path
    /// on other platforms. Returns `None` if no cache directory can be
    /// determined (e.g., no home directory).
    pub fn default_path() -> Option<PathBuf> {
        let project_dirs = ProjectDirs::from("", "", "parkscout")?;
        Some(project_dirs.cache_dir().join("sites.json"))
    }

    /// Returns the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached body for `key`, if present
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns whether `key` has a cached body
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Inserts a body for `key`, replacing any previous entry
    ///
    /// The change is in-memory only until [`save`](Self::save) is called.
    pub fn insert(&mut self, key: impl Into<String>, body: impl Into<String>) {
        self.entries.insert(key.into(), body.into());
    }

    /// Returns the number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the entire mapping to the backing file
    ///
    /// The file is overwritten in one shot; there are no incremental or
    /// append writes. Unlike loading, a failure here is fatal and propagates
    /// to the caller, since the mutation cannot be considered durable.
    pub fn save(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// Reads the backing file into a mapping, recovering to empty on any failure
fn load_entries(path: &Path) -> HashMap<String, String> {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| serde_json::from_str(&contents).ok())
        .unwrap_or_default()
}
