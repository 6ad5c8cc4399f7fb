//! Persistent key-value backends the preference store reads from and writes to.
//!
//! The store only needs two synchronous operations. Both are infallible at the
//! interface: an implementation that cannot reach its medium logs the failure
//! and behaves as if the key were absent (on read) or drops the write.

use std::cell::RefCell;
use std::rc::Rc;

mod eframe_storage;
mod file;
mod memory;

pub use eframe_storage::EframeBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;

/// A client-local string store that survives across sessions.
pub trait PreferenceBackend {
    /// Returns the stored value for `key`, or `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`.
    fn write(&mut self, key: &str, value: &str);
}

/// Lets a host keep a handle on the backend it injected into a store.
impl<B: PreferenceBackend + ?Sized> PreferenceBackend for Rc<RefCell<B>> {
    fn read(&self, key: &str) -> Option<String> {
        self.borrow().read(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        self.borrow_mut().write(key, value);
    }
}

impl<B: PreferenceBackend + ?Sized> PreferenceBackend for Box<B> {
    fn read(&self, key: &str) -> Option<String> {
        (**self).read(key)
    }

    fn write(&mut self, key: &str, value: &str) {
        (**self).write(key, value);
    }
}
