// SPDX-License-Identifier: MPL-2.0
//! `page_locale` localizes static login and signup pages.
//!
//! A [`TranslationCatalog`](i18n::TranslationCatalog) maps each of four
//! language codes to a flat key/string table. A
//! [`Localizer`](localizer::Localizer) session picks the active language
//! (persisted choice first, then the reported locale), writes translations
//! into every element carrying the marker attribute, keeps the language
//! selector in sync, and persists the choice through a
//! [`LanguageStore`](storage::LanguageStore).
//!
//! On `wasm32` the [`web`] module binds all of this to the browser DOM and
//! `localStorage`.

pub mod config;
pub mod error;
pub mod i18n;
pub mod localizer;
pub mod page;
pub mod paths;
pub mod storage;
#[cfg(target_arch = "wasm32")]
pub mod web;
