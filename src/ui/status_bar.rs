//! Status bar UI rendering
//!
//! Handles the bottom status bar with store diagnostics.

use eframe::egui;
use egui::RichText;
use crate::app::AppState;

/// Renders the status panel at the bottom of the window
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
pub fn render_status_bar(ui: &mut egui::Ui, state: &AppState) {
    let pending = if state.backend().borrow().is_dirty() { " (unsaved)" } else { "" };

    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("Scheme: {}{}", state.store.get(), pending)).strong());
        ui.label(RichText::new("|").strong());
        ui.label(RichText::new(format!("Started from: {:?}", state.store.initial_source())).strong());
        ui.label(RichText::new("|").strong());
        ui.label(RichText::new(format!(
            "Subscribers: {} | Deliveries: {}",
            state.store.subscriber_count(),
            state.deliveries()
        )).strong());
    });
}
