//! Theme management and persistence coordination.
//!
//! Handles store creation from eframe storage, palette application, and
//! persistent storage across sessions.
//!
//! The palette reaches egui through one path per change: `toggle` goes
//! through the store's surface, and everything else (startup, `select`)
//! through [`ThemeCoordinator::apply_current_theme`]. Both record what they
//! installed in a shared cell so neither repeats the other's work.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use colorscheme::config::STORAGE_KEY;
use colorscheme::{ColorScheme, EframeBackend, Palette, PreferenceStore, PresentationSurface};

use crate::app::AppState;

/// The egui context as the store's surface, remembering what it installed.
struct InstalledSurface {
    ctx: egui::Context,
    installed: Rc<Cell<Option<ColorScheme>>>,
}

impl PresentationSurface for InstalledSurface {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.ctx.set_attribute(name, value);
        if let Ok(scheme) = value.parse::<ColorScheme>() {
            self.installed.set(Some(scheme));
        }
    }
}

/// Coordinates theme management and persistence.
pub struct ThemeCoordinator;

impl ThemeCoordinator {
    /// Builds the application state during startup.
    ///
    /// The stored scheme is read from eframe storage when persistence is
    /// available; otherwise the store starts detached and defaults to dark.
    pub fn create_state(storage: Option<&dyn eframe::Storage>, ctx: &egui::Context) -> AppState {
        let backend = Rc::new(RefCell::new(EframeBackend::load(storage, &[STORAGE_KEY])));
        let installed = Rc::new(Cell::new(None));

        let store = match storage {
            Some(_) => PreferenceStore::with_backend(Box::new(Rc::clone(&backend))),
            None => PreferenceStore::detached(),
        };
        let store = store.with_surface(Box::new(InstalledSurface {
            ctx: ctx.clone(),
            installed: Rc::clone(&installed),
        }));

        AppState::new(store, backend, installed)
    }

    /// Flips the scheme. The store persists it and updates egui itself.
    pub fn toggle(state: &mut AppState) {
        state.store.toggle();
    }

    /// Selects a scheme explicitly and persists it.
    ///
    /// `set` leaves the surface alone, so the palette follows on the next
    /// [`apply_current_theme`](Self::apply_current_theme).
    pub fn select(state: &mut AppState, scheme: ColorScheme) {
        state.store.set(scheme);
        state.store.persist();
    }

    /// Installs the current palette unless it is already installed.
    ///
    /// Returns whether anything was installed.
    pub fn apply_current_theme(ctx: &egui::Context, state: &mut AppState) -> bool {
        match state.take_pending_scheme() {
            Some(scheme) => {
                Palette::for_scheme(scheme).install(ctx);
                true
            }
            None => false,
        }
    }

    /// Saves buffered preference writes to persistent storage.
    ///
    /// Should be called during application shutdown or when the scheme changes.
    pub fn save_theme_to_storage(storage: &mut dyn eframe::Storage, state: &AppState) {
        state.backend().borrow_mut().flush(storage);
    }
}
