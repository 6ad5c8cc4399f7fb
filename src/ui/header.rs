//! Header panel UI rendering
//!
//! Handles the top bar with the scheme toggle and the scheme selector.

use eframe::egui;
use egui::Color32;
use colorscheme::ColorScheme;
use crate::app::AppState;

/// Result of user interaction with the header panel
pub enum HeaderInteraction {
    /// User clicked the toggle button
    ToggleRequested,
    /// User picked a scheme from the selector
    SchemeSelected(ColorScheme),
}

/// Renders the application header
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let current = state.store.get();

    ui.horizontal(|ui| {
        ui.heading("Color scheme");

        // Push scheme controls to the right
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let icon = match current {
                ColorScheme::Dark => "☀",
                ColorScheme::Light => "🌙",
            };
            if ui.button(icon).on_hover_text("Toggle color scheme").clicked() {
                interaction = Some(HeaderInteraction::ToggleRequested);
            }

            let mut selected = current;
            egui::ComboBox::from_id_salt("scheme_selector")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for scheme in ColorScheme::ALL {
                        ui.selectable_value(&mut selected, scheme, scheme.label());
                    }
                });

            if selected != current {
                interaction = Some(HeaderInteraction::SchemeSelected(selected));
            }

            ui.label("Scheme:");
        });
    });

    if !state.store.has_backend() {
        ui.colored_label(Color32::YELLOW, "Persistence unavailable: the scheme resets on restart");
    }

    interaction
}
