//! Backend over eframe's persistence storage.
//!
//! eframe only lends its storage out at creation time and in `App::save`, so
//! this backend snapshots the keys it cares about up front, buffers writes,
//! and copies dirty entries back when the host calls [`EframeBackend::flush`].

use std::collections::{HashMap, HashSet};

use super::PreferenceBackend;

#[derive(Debug, Default)]
pub struct EframeBackend {
    entries: HashMap<String, String>,
    dirty: HashSet<String>,
}

impl EframeBackend {
    /// Snapshots `keys` from `storage`. With no storage the backend starts empty.
    pub fn load(storage: Option<&dyn eframe::Storage>, keys: &[&str]) -> Self {
        let mut entries = HashMap::new();
        if let Some(storage) = storage {
            for key in keys {
                if let Some(value) = storage.get_string(key) {
                    entries.insert(key.to_string(), value);
                }
            }
        }
        Self {
            entries,
            dirty: HashSet::new(),
        }
    }

    /// True if there are writes not yet copied into eframe storage.
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Copies buffered writes into `storage` and flushes it.
    pub fn flush(&mut self, storage: &mut dyn eframe::Storage) {
        if self.dirty.is_empty() {
            return;
        }
        for key in self.dirty.drain() {
            if let Some(value) = self.entries.get(&key) {
                storage.set_string(&key, value.clone());
            }
        }
        storage.flush();
    }
}

impl PreferenceBackend for EframeBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.dirty.insert(key.to_string());
    }
}
