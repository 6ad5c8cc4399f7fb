use std::collections::HashMap;

use super::PreferenceBackend;

/// In-process backend. Nothing outlives the value itself.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    data: HashMap<String, String>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend pre-populated with one entry.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut backend = Self::new();
        backend.data.insert(key.to_string(), value.to_string());
        backend
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Number of `write` calls received so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl PreferenceBackend for MemoryBackend {
    fn read(&self, key: &str) -> Option<String> {
        self.data.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.writes += 1;
        self.data.insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_missing_key() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.read("color-scheme"), None);
    }

    #[test]
    fn test_write_then_read() {
        let mut backend = MemoryBackend::with_entry("color-scheme", "dark");
        backend.write("color-scheme", "light");

        assert_eq!(backend.read("color-scheme").as_deref(), Some("light"));
        assert_eq!(backend.write_count(), 1);
    }
}
