// SPDX-License-Identifier: MPL-2.0
//! Durable storage for the active language code.
//!
//! Stores hold the code as a plain string. Callers treat every store as
//! best-effort: a failing store never prevents a language from being applied.

use crate::config::{self, Config};
use crate::error::Result;
use std::path::PathBuf;

pub trait LanguageStore {
    /// The previously persisted code, if any.
    fn load(&self) -> Result<Option<String>>;

    fn save(&mut self, code: &str) -> Result<()>;
}

/// Keeps the code for the lifetime of the value only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    code: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }
}

impl LanguageStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.code.clone())
    }

    fn save(&mut self, code: &str) -> Result<()> {
        self.code = Some(code.to_string());
        Ok(())
    }
}

/// Persists the code as `[general] language` in `settings.toml`.
///
/// Other settings in the file are preserved across saves.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    base_dir: Option<PathBuf>,
}

impl ConfigStore {
    /// Uses the standard config directory resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `base_dir` instead of the standard config directory.
    pub fn with_base_dir(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    fn read(&self) -> Result<Config> {
        match config::get_config_path_with_override(self.base_dir.clone()) {
            Some(path) if path.exists() => config::load_from_path(&path),
            _ => Ok(Config::default()),
        }
    }
}

impl LanguageStore for ConfigStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .read()?
            .general
            .language
            .filter(|code| !code.is_empty()))
    }

    fn save(&mut self, code: &str) -> Result<()> {
        // An unreadable file is replaced rather than blocking the save.
        let mut cfg = self.read().unwrap_or_default();
        cfg.general.language = Some(code.to_string());
        config::save_with_override(&cfg, self.base_dir.clone())
    }
}
