// SPDX-License-Identifier: MPL-2.0
use super::language::Language;
use crate::config::REFERENCE_LANGUAGE_CODE;
use crate::error::{Error, Result};
use fluent_bundle::{FluentBundle, FluentResource};
use fluent_syntax::ast;
use rust_embed::RustEmbed;
use std::collections::{BTreeMap, BTreeSet};

#[derive(RustEmbed)]
#[folder = "assets/i18n/"]
struct Asset;

/// Flat key to string mapping for one language.
pub type TranslationTable = BTreeMap<String, String>;

/// Every language's table. Built once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    tables: BTreeMap<Language, TranslationTable>,
}

/// Keys that differ between each table and the reference table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletenessReport {
    /// Reference keys a language does not define.
    pub missing: BTreeMap<Language, Vec<String>>,
    /// Keys a language defines that the reference table does not.
    pub extra: BTreeMap<Language, Vec<String>>,
}

impl CompletenessReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

impl TranslationCatalog {
    /// Loads the tables embedded from `assets/i18n/<code>.ftl`.
    pub fn builtin() -> Result<Self> {
        let mut sources = Vec::with_capacity(Language::ALL.len());
        for lang in Language::ALL {
            let filename = format!("{}.ftl", lang.code());
            let file = Asset::get(&filename)
                .ok_or_else(|| Error::Catalog(format!("missing translation asset {filename}")))?;
            sources.push((lang, String::from_utf8_lossy(file.data.as_ref()).to_string()));
        }
        Self::from_sources(sources)
    }

    /// Builds a catalog from Fluent sources, one per language.
    ///
    /// Languages without a source simply have no table; lookups against them
    /// resolve to nothing.
    pub fn from_sources<I>(sources: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Language, String)>,
    {
        let mut tables = BTreeMap::new();
        for (lang, source) in sources {
            tables.insert(lang, parse_table(lang, source)?);
        }
        Ok(Self { tables })
    }

    /// Resolves `key` in the table for `code`.
    ///
    /// Unknown codes and missing keys both yield `None`.
    pub fn lookup(&self, code: &str, key: &str) -> Option<&str> {
        self.table(code)?.get(key).map(String::as_str)
    }

    pub fn table(&self, code: &str) -> Option<&TranslationTable> {
        Language::from_code(code).and_then(|lang| self.tables.get(&lang))
    }

    pub fn languages(&self) -> impl Iterator<Item = Language> + '_ {
        self.tables.keys().copied()
    }

    /// Keys defined for `code`, sorted. Empty for unknown codes.
    pub fn keys(&self, code: &str) -> Vec<&str> {
        self.table(code)
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Compares every table's key set against the `en` table.
    pub fn completeness(&self) -> CompletenessReport {
        let reference: BTreeSet<&str> = self.keys(REFERENCE_LANGUAGE_CODE).into_iter().collect();
        let mut report = CompletenessReport::default();

        for (lang, table) in &self.tables {
            let keys: BTreeSet<&str> = table.keys().map(String::as_str).collect();
            let missing: Vec<String> = reference.difference(&keys).map(|k| k.to_string()).collect();
            let extra: Vec<String> = keys.difference(&reference).map(|k| k.to_string()).collect();
            if !missing.is_empty() {
                report.missing.insert(*lang, missing);
            }
            if !extra.is_empty() {
                report.extra.insert(*lang, extra);
            }
        }
        for lang in Language::ALL {
            if !self.tables.contains_key(&lang) && !reference.is_empty() {
                report
                    .missing
                    .insert(lang, reference.iter().map(|k| k.to_string()).collect());
            }
        }
        report
    }
}

/// Parses one Fluent source and flattens every message value into a table.
fn parse_table(lang: Language, source: String) -> Result<TranslationTable> {
    let resource = FluentResource::try_new(source).map_err(|(_, errors)| {
        Error::Catalog(format!("{}.ftl: {} syntax error(s)", lang.code(), errors.len()))
    })?;

    let ids: Vec<String> = resource
        .entries()
        .filter_map(|entry| match entry {
            ast::Entry::Message(message) if message.value.is_some() => {
                Some(message.id.name.to_string())
            }
            _ => None,
        })
        .collect();

    let mut bundle = FluentBundle::new(vec![lang.identifier()]);
    bundle.set_use_isolating(false);
    bundle.add_resource(resource).map_err(|errors| {
        Error::Catalog(format!("{}.ftl: {} duplicate entr(ies)", lang.code(), errors.len()))
    })?;

    let mut table = TranslationTable::new();
    for id in ids {
        let Some(pattern) = bundle.get_message(&id).and_then(|msg| msg.value()) else {
            continue;
        };
        let mut errors = vec![];
        let value = bundle.format_pattern(pattern, None, &mut errors);
        if !errors.is_empty() {
            return Err(Error::Catalog(format!(
                "{}.ftl: message {id} failed to format",
                lang.code()
            )));
        }
        table.insert(id, value.into_owned());
    }
    Ok(table)
}
