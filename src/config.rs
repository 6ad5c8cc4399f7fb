//! Fixed names and path resolution shared by the library and the binaries.

use std::path::PathBuf;

use crate::scheme::ColorScheme;

/// Key under which the preference is persisted.
pub const STORAGE_KEY: &str = "color-scheme";

/// Presentation attribute that receives the active scheme on toggle.
pub const SCHEME_ATTRIBUTE: &str = "color-scheme";

/// Scheme used when nothing usable is stored.
pub const DEFAULT_SCHEME: ColorScheme = ColorScheme::Dark;

pub const APP_NAME: &str = "colorscheme";

/// Environment variable overriding the file backend location.
pub const STORE_PATH_ENV: &str = "COLORSCHEME_STORE";

const STORE_FILE_NAME: &str = "preferences.json";

/// Resolves the preference file used by the file backend.
///
/// `$COLORSCHEME_STORE` wins when set and non-empty; otherwise the file lives
/// in the platform config directory. Returns `None` when neither is available,
/// in which case callers run without a persistent backend.
pub fn default_store_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(STORE_PATH_ENV) {
        if !path.is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(STORE_FILE_NAME))
}
