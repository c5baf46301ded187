// SPDX-License-Identifier: MPL-2.0
//! The fixed set of page languages and locale-based detection.

use crate::config::FALLBACK_LANGUAGE_CODE;
use std::fmt;
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    En,
    Ru,
    Zh,
    Uk,
}

impl Language {
    /// Every supported language, in catalog order.
    pub const ALL: [Language; 4] = [Language::En, Language::Ru, Language::Zh, Language::Uk];

    /// Order in which locale prefixes are tested during detection.
    const DETECTION_ORDER: [Language; 3] = [Language::Ru, Language::En, Language::Zh];

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Zh => "zh",
            Language::Uk => "uk",
        }
    }

    /// Exact match on a two-letter code. Region subtags are not accepted here.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Label shown for this language in a selector control.
    pub fn native_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Ru => "Русский",
            Language::Zh => "中文",
            Language::Uk => "Українська",
        }
    }

    pub fn fallback() -> Self {
        // FALLBACK_LANGUAGE_CODE is one of the codes above.
        Self::from_code(FALLBACK_LANGUAGE_CODE).unwrap_or(Language::Uk)
    }

    /// Picks a language from a reported locale string such as `"ru-RU"`.
    ///
    /// The locale is matched by prefix, testing `ru`, then `en`, then `zh`.
    /// Anything else, including a missing locale, resolves to the fallback.
    ///
    /// Matching ignores ASCII case and surrounding whitespace, so `"EN-us"`
    /// and `" ru"` are accepted. A plain case-sensitive `startsWith` would
    /// send both to the fallback.
    pub fn detect(locale: Option<&str>) -> Self {
        let Some(locale) = locale else {
            return Self::fallback();
        };
        let locale = locale.trim().to_ascii_lowercase();
        Self::DETECTION_ORDER
            .into_iter()
            .find(|lang| locale.starts_with(lang.code()))
            .unwrap_or_else(Self::fallback)
    }

    pub fn identifier(self) -> LanguageIdentifier {
        LanguageIdentifier::from_str(self.code()).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| format!("unsupported language code: {s}"))
    }
}
