//! Preview panel rendering
//!
//! Shows sample content and the active palette's swatches.

use eframe::egui;
use egui::RichText;
use colorscheme::Palette;
use crate::app::AppState;

const SWATCH_SIZE: egui::Vec2 = egui::vec2(56.0, 28.0);

/// Renders sample blog content followed by the palette swatches
pub fn render_preview_panel(ui: &mut egui::Ui, state: &AppState) {
    let palette = Palette::for_scheme(state.store.get());

    ui.heading("Shall I compare thee to a summer's day?");
    ui.label(RichText::new("Sonnet 18").color(palette.text_dim));
    ui.add_space(8.0);
    ui.label("Thou art more lovely and more temperate:");
    ui.label("Rough winds do shake the darling buds of May,");
    ui.label("And summer's lease hath all too short a date;");
    ui.label(RichText::new("William Shakespeare").italics().color(palette.text_dim));

    ui.add_space(16.0);
    ui.separator();
    ui.label(RichText::new(format!("Palette: {}", palette.scheme.label())).strong());

    ui.horizontal_wrapped(|ui| {
        for (name, color) in palette.swatches() {
            ui.vertical(|ui| {
                let (rect, response) = ui.allocate_exact_size(SWATCH_SIZE, egui::Sense::hover());
                ui.painter().rect_filled(rect, 2.0, color);
                response.on_hover_text(format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b()));
                ui.small(name);
            });
        }
    });
}
