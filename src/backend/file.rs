//! JSON file backend used by the command-line front-end.
//!
//! The file holds one flat JSON object of string entries, for example
//! `{"color-scheme":"light"}`. Every write rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::PreferenceBackend;
use crate::error::{PreferenceError, Result};

/// Preference entries persisted to a JSON file on disk.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Map<String, Value>,
}

impl FileBackend {
    /// Opens the backend at `path`.
    ///
    /// Never fails: a missing file starts empty, and an unreadable or
    /// malformed file is logged and treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::try_load(&path) {
            Ok(entries) => entries,
            Err(err) => {
                log::warn!("ignoring preference file: {err:#}");
                Map::new()
            }
        };
        Self { path, entries }
    }

    /// Loads the entries at `path`. A missing file yields an empty map.
    pub fn try_load(path: &Path) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        if text.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&text).map_err(|source| PreferenceError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes all entries to disk, creating the parent directory if needed.
    pub fn try_save(&self) -> Result<()> {
        let io_err = |source: std::io::Error| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }

        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| PreferenceError::Json {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceBackend for FileBackend {
    fn read(&self, key: &str) -> Option<String> {
        // Non-string entries are someone else's data; treat them as absent.
        self.entries.get(key).and_then(Value::as_str).map(str::to_string)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), Value::String(value.to_string()));
        if let Err(err) = self.try_save() {
            log::warn!("could not persist preference '{key}': {err:#}");
        }
    }
}
