//! Application-level modules for the scheme viewer.
//!
//! This module contains the centralized state and the theme coordinator.

mod app_state;
mod theme_coordinator;

pub use app_state::AppState;
pub use theme_coordinator::ThemeCoordinator;
