pub mod backend;
pub mod config;
pub mod error;
pub mod palette;
pub mod scheme;
pub mod store;
pub mod surface;

// Export the store
pub use store::{InitialSource, PreferenceStore, Subscription};
pub use scheme::ColorScheme;
pub use error::PreferenceError;

// Export collaborators
pub use backend::{PreferenceBackend, MemoryBackend, FileBackend, EframeBackend};
pub use surface::{PresentationSurface, RecordingSurface};

// Export palette support
pub use palette::{Palette, hex_to_color32};
