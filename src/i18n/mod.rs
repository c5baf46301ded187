// SPDX-License-Identifier: MPL-2.0
//! Translation catalog and language model.
//!
//! Tables are authored as Fluent files under `assets/i18n/`, embedded at
//! compile time, and flattened into plain key to string maps when the
//! catalog is built.
//!
//! # Features
//!
//! - Fixed set of four page languages (`en`, `ru`, `zh`, `uk`)
//! - Prefix-based detection from a reported locale, falling back to `uk`
//! - Completeness check of every table against the `en` key set

pub mod catalog;
pub mod language;

pub use catalog::{CompletenessReport, TranslationCatalog, TranslationTable};
pub use language::Language;
