//! Panel orchestration and layout management.
//!
//! Coordinates the header, preview, and status panels and forwards their
//! interactions to the application.

use colorscheme::ColorScheme;
use crate::app::AppState;
use crate::ui::{header, preview_panel, status_bar};

/// Result of panel interactions that need to be handled by the application.
pub enum PanelInteraction {
    /// User asked to flip the scheme
    ToggleRequested,
    /// User picked a specific scheme
    SchemeSelected(ColorScheme),
}

/// Manages the layout and rendering of all UI panels.
pub struct PanelManager;

impl PanelManager {
    /// Renders all panels in the application window.
    ///
    /// Called from the eframe::App::update() implementation.
    pub fn render_all_panels(ctx: &egui::Context, state: &AppState) -> Option<PanelInteraction> {
        let mut interaction: Option<PanelInteraction> = None;

        // Header panel at the top
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            if let Some(header_interaction) = header::render_header(ui, state) {
                interaction = Some(match header_interaction {
                    header::HeaderInteraction::ToggleRequested => PanelInteraction::ToggleRequested,
                    header::HeaderInteraction::SchemeSelected(scheme) => {
                        PanelInteraction::SchemeSelected(scheme)
                    }
                });
            }
        });

        // Status panel at the very bottom
        egui::TopBottomPanel::bottom("status_panel").show(ctx, |ui| {
            status_bar::render_status_bar(ui, state);
        });

        let preview_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(12))
            .fill(ctx.style().visuals.panel_fill);

        egui::CentralPanel::default()
            .frame(preview_frame)
            .show(ctx, |ui| {
                preview_panel::render_preview_panel(ui, state);
            });

        interaction
    }
}
