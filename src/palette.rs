//! Color palettes for the two schemes.
//!
//! A [`Palette`] is what the egui presentation surface applies when the
//! `color-scheme` attribute changes. The light palette is a paper-like page,
//! the dark one follows the poimandres tones the blog's code blocks use.
//!
//! # Examples
//!
//! ```
//! use colorscheme::{ColorScheme, Palette};
//!
//! let dark = Palette::for_scheme(ColorScheme::Dark);
//! println!("Dark background: {:?}", dark.background);
//! ```

use egui::Color32;

use crate::scheme::ColorScheme;

/// Colors applied to the UI for one scheme
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub scheme: ColorScheme,

    // Surfaces
    pub background: Color32,
    pub panel_background: Color32,
    pub extreme_background: Color32,

    // Foreground
    pub text: Color32,
    pub text_dim: Color32,

    // Interactive
    pub selection: Color32,
    pub hover: Color32,
    pub border: Color32,
    pub link: Color32,

    // Accents (swatches, warnings)
    pub accent: Color32,
    pub error: Color32,
    pub warning: Color32,
}

impl Palette {
    /// Returns the palette for `scheme`.
    pub fn for_scheme(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => light_palette(),
            ColorScheme::Dark => dark_palette(),
        }
    }

    /// Builds egui visuals for this palette, starting from egui's own
    /// light or dark defaults.
    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = if self.scheme.is_dark() {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        self.apply(&mut visuals);
        visuals
    }

    /// Makes this palette the active look of `ctx`.
    ///
    /// The egui theme is pinned as well, so a later OS theme change does not
    /// swap the visuals back.
    pub fn install(&self, ctx: &egui::Context) {
        let theme = if self.scheme.is_dark() {
            egui::Theme::Dark
        } else {
            egui::Theme::Light
        };
        ctx.set_theme(theme);
        ctx.set_visuals(self.visuals());
    }

    /// Overrides the palette's colors on existing visuals.
    pub fn apply(&self, visuals: &mut egui::Visuals) {
        visuals.panel_fill = self.panel_background;
        visuals.window_fill = self.background;
        visuals.extreme_bg_color = self.extreme_background;
        visuals.faint_bg_color = self.hover;

        visuals.override_text_color = Some(self.text);

        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke.color = self.accent;

        visuals.widgets.noninteractive.bg_fill = self.panel_background;
        visuals.widgets.noninteractive.bg_stroke.color = self.border;
        visuals.widgets.inactive.bg_fill = self.hover;
        visuals.widgets.hovered.bg_fill = self.hover;
        visuals.widgets.active.bg_fill = self.selection;

        visuals.hyperlink_color = self.link;
        visuals.error_fg_color = self.error;
        visuals.warn_fg_color = self.warning;
    }

    /// Named swatches, in display order.
    pub fn swatches(&self) -> [(&'static str, Color32); 8] {
        [
            ("background", self.background),
            ("panel", self.panel_background),
            ("text", self.text),
            ("text dim", self.text_dim),
            ("selection", self.selection),
            ("link", self.link),
            ("accent", self.accent),
            ("border", self.border),
        ]
    }
}

fn light_palette() -> Palette {
    Palette {
        scheme: ColorScheme::Light,
        background: hex_to_color32("#fafafa"),
        panel_background: hex_to_color32("#f4f4f5"),
        extreme_background: hex_to_color32("#ffffff"),
        text: hex_to_color32("#1f1f23"),
        text_dim: hex_to_color32("#71717a"),
        selection: hex_to_color32("#c7d7fe"),
        hover: hex_to_color32("#e4e4e7"),
        border: hex_to_color32("#a1a1aa"),
        link: hex_to_color32("#1d4ed8"),
        accent: hex_to_color32("#5de4c7"),
        error: hex_to_color32("#c62828"),
        warning: hex_to_color32("#b45309"),
    }
}

fn dark_palette() -> Palette {
    Palette {
        scheme: ColorScheme::Dark,
        // poimandres background: #1b1e28
        background: hex_to_color32("#1b1e28"),
        panel_background: hex_to_color32("#1b1e28"),
        extreme_background: hex_to_color32("#171922"),
        // poimandres foreground: #a6accd
        text: hex_to_color32("#a6accd"),
        text_dim: hex_to_color32("#767c9d"),
        selection: hex_to_color32("#303340"),
        hover: hex_to_color32("#252b37"),
        border: hex_to_color32("#506477"),
        link: hex_to_color32("#89ddff"),
        accent: hex_to_color32("#5de4c7"),
        error: hex_to_color32("#d0679d"),
        warning: hex_to_color32("#fffac2"),
    }
}

/// Converts a hex color string (like "#1b1e28") to Color32
pub fn hex_to_color32(hex: &str) -> Color32 {
    let hex = hex.trim_start_matches('#');

    if hex.len() == 6 {
        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(0);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(0);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(0);
        Color32::from_rgb(r, g, b)
    } else {
        Color32::from_rgb(0, 0, 0) // Fallback to black
    }
}
