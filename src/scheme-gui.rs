//! Color scheme viewer GUI application
//!
//! A small egui window that drives a [`colorscheme::PreferenceStore`] the way
//! the blog header does: a toggle button flips the scheme, the choice is
//! persisted through eframe storage, and the palette is applied to the UI.
//!
//! The application is built with a modular architecture:
//! - `app/` - Application state and theme coordination
//! - `ui/` - UI panel rendering

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod app;
mod ui;

use app::{AppState, ThemeCoordinator};
use ui::panel_manager::{PanelInteraction, PanelManager};

/// Main application entry point that initializes and launches the viewer.
fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 480.0])
            .with_title("Color Scheme Viewer"),
        ..Default::default()
    };

    eframe::run_native(
        colorscheme::config::APP_NAME,
        options,
        Box::new(|cc| Ok(Box::new(SchemeViewerApp::new(cc)))),
    )
}

/// The viewer application, delegating to `ThemeCoordinator` and `PanelManager`.
struct SchemeViewerApp {
    /// Centralized application state
    state: AppState,
}

impl SchemeViewerApp {
    /// Creates a new viewer with the scheme loaded from persistent storage.
    fn new(cc: &eframe::CreationContext) -> Self {
        let state = ThemeCoordinator::create_state(cc.storage, &cc.egui_ctx);
        Self { state }
    }

    fn handle_panel_interaction(&mut self, interaction: PanelInteraction) {
        match interaction {
            PanelInteraction::ToggleRequested => {
                ThemeCoordinator::toggle(&mut self.state);
            }
            PanelInteraction::SchemeSelected(scheme) => {
                ThemeCoordinator::select(&mut self.state, scheme);
            }
        }
    }
}

impl eframe::App for SchemeViewerApp {
    /// Called when the app is being shut down - ensures preferences are saved.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        ThemeCoordinator::save_theme_to_storage(storage, &self.state);
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        ThemeCoordinator::apply_current_theme(ctx, &mut self.state);

        if let Some(interaction) = PanelManager::render_all_panels(ctx, &self.state) {
            self.handle_panel_interaction(interaction);
            ctx.request_repaint();
        }

        // Persist preferences during frame (for crash resilience)
        if self.state.backend().borrow().is_dirty() {
            if let Some(storage) = frame.storage_mut() {
                ThemeCoordinator::save_theme_to_storage(storage, &self.state);
            }
        }
    }
}
