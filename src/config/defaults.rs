// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for configuration constants.
//!
//! # Categories
//!
//! - **Page**: Names of the markup hooks the applier drives
//! - **Storage**: Where the active language is persisted
//! - **Language**: Fallback used when nothing else matches

// ==========================================================================
// Page Defaults
// ==========================================================================

/// Attribute whose value is the translation key of an element.
pub const DEFAULT_MARKER_ATTRIBUTE: &str = "data-translate";

/// Element id of the language selector control.
pub const DEFAULT_SELECTOR_ID: &str = "lang-select";

// ==========================================================================
// Storage Defaults
// ==========================================================================

/// Key under which the browser's local storage keeps the language code.
pub const STORAGE_KEY: &str = "selectedLanguage";

// ==========================================================================
// Language Defaults
// ==========================================================================

/// Language applied when neither storage nor the locale picks one.
pub const FALLBACK_LANGUAGE_CODE: &str = "uk";

/// Language whose table defines the reference key set of the catalog.
pub const REFERENCE_LANGUAGE_CODE: &str = "en";
