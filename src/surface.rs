//! Presentation surfaces: where `toggle` reflects the active scheme.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::config::SCHEME_ATTRIBUTE;
use crate::palette::Palette;
use crate::scheme::ColorScheme;

/// An environment hook that accepts a single named attribute assignment.
pub trait PresentationSurface {
    fn set_attribute(&mut self, name: &str, value: &str);
}

impl<S: PresentationSurface + ?Sized> PresentationSurface for Rc<RefCell<S>> {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_attribute(name, value);
    }
}

/// Keeps the last value assigned to each attribute.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    attributes: HashMap<String, String>,
    assignments: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Total number of assignments seen.
    pub fn assignments(&self) -> usize {
        self.assignments
    }
}

impl PresentationSurface for RecordingSurface {
    fn set_attribute(&mut self, name: &str, value: &str) {
        self.assignments += 1;
        self.attributes.insert(name.to_string(), value.to_string());
    }
}

/// egui reflects the scheme by swapping in the matching palette's visuals.
impl PresentationSurface for egui::Context {
    fn set_attribute(&mut self, name: &str, value: &str) {
        if name != SCHEME_ATTRIBUTE {
            log::debug!("egui surface ignores attribute '{name}'");
            return;
        }
        match value.parse::<ColorScheme>() {
            Ok(scheme) => {
                Palette::for_scheme(scheme).install(self);
                self.request_repaint();
            }
            Err(err) => log::debug!("egui surface ignores {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_keeps_last_value() {
        let mut surface = RecordingSurface::new();
        surface.set_attribute("color-scheme", "light");
        surface.set_attribute("color-scheme", "dark");

        assert_eq!(surface.attribute("color-scheme"), Some("dark"));
        assert_eq!(surface.assignments(), 2);
    }

    #[test]
    fn test_shared_surface_records_through_rc() {
        let shared = Rc::new(RefCell::new(RecordingSurface::new()));
        let mut handle = Rc::clone(&shared);
        handle.set_attribute("color-scheme", "light");

        assert_eq!(shared.borrow().attribute("color-scheme"), Some("light"));
    }

    #[test]
    fn test_egui_surface_switches_visuals() {
        let mut ctx = egui::Context::default();
        ctx.set_attribute(SCHEME_ATTRIBUTE, "light");
        assert!(!ctx.style().visuals.dark_mode);

        ctx.set_attribute(SCHEME_ATTRIBUTE, "dark");
        assert!(ctx.style().visuals.dark_mode);

        // Unknown values leave the visuals alone.
        ctx.set_attribute(SCHEME_ATTRIBUTE, "sepia");
        assert!(ctx.style().visuals.dark_mode);
    }
}
