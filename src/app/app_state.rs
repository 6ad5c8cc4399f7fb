//! Centralized application state for the scheme viewer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use colorscheme::{ColorScheme, EframeBackend, PreferenceStore, Subscription};

/// Application state shared by the panels.
///
/// The store owns the scheme; the viewer only keeps what it needs to flush
/// the backend and to show what subscribers observed.
pub struct AppState {
    /// The preference store driving the whole window
    pub store: PreferenceStore,

    /// Handle on the backend injected into `store`, flushed on save
    backend: Rc<RefCell<EframeBackend>>,

    /// Number of values delivered to the viewer's own subscriber
    deliveries: Rc<Cell<usize>>,
    _delivery_counter: Subscription,

    /// Scheme whose palette is currently installed in egui, shared with
    /// the store's surface
    installed: Rc<Cell<Option<ColorScheme>>>,
}

impl AppState {
    /// Wraps `store` and subscribes the viewer's delivery counter.
    pub fn new(
        store: PreferenceStore,
        backend: Rc<RefCell<EframeBackend>>,
        installed: Rc<Cell<Option<ColorScheme>>>,
    ) -> Self {
        let deliveries = Rc::new(Cell::new(0));
        let counter = Rc::clone(&deliveries);
        let subscription = store.subscribe(move |_| counter.set(counter.get() + 1));

        Self {
            store,
            backend,
            deliveries,
            _delivery_counter: subscription,
            installed,
        }
    }

    pub fn backend(&self) -> &Rc<RefCell<EframeBackend>> {
        &self.backend
    }

    /// Deliveries seen by the viewer, including the initial one.
    pub fn deliveries(&self) -> usize {
        self.deliveries.get()
    }

    /// Returns the scheme to install if it differs from the installed one.
    pub fn take_pending_scheme(&mut self) -> Option<ColorScheme> {
        let current = self.store.get();
        if self.installed.get() == Some(current) {
            return None;
        }
        self.installed.set(Some(current));
        Some(current)
    }
}
