//! UI panel rendering subsystem
//!
//! This module contains all UI panel rendering logic for the scheme viewer:
//! - Header panel (title, scheme toggle, scheme selector)
//! - Preview panel (sample content and palette swatches)
//! - Status bar (store diagnostics)
//! - Panel manager (panel orchestration and layout)

pub mod header;
pub mod preview_panel;
pub mod status_bar;
pub mod panel_manager;
