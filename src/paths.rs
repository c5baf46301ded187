// SPDX-License-Identifier: MPL-2.0
//! Config directory resolution.
//!
//! # Resolution Order
//!
//! 1. **Explicit override** - parameter to [`get_app_config_dir_with_override`]
//!    (the CLI `--config-dir` flag and tests use this)
//! 2. **Environment variable** `PAGE_LOCALE_CONFIG_DIR`
//! 3. **Platform default** - via `dirs` crate, with the app name appended

use std::path::PathBuf;

/// Application name used for directory naming.
const APP_NAME: &str = "PageLocale";

/// Environment variable to override the config directory.
pub const ENV_CONFIG_DIR: &str = "PAGE_LOCALE_CONFIG_DIR";

/// Returns the application config directory path.
///
/// This directory holds `settings.toml`, which carries the persisted
/// language selection for native builds.
///
/// Returns `None` if the config directory cannot be determined (for example
/// on `wasm32`, where `dirs` has no platform directories).
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the application config directory path with an optional override.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = override_path {
        return Some(path);
    }

    if let Ok(env_path) = std::env::var(ENV_CONFIG_DIR) {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path
    })
}
