// SPDX-License-Identifier: MPL-2.0
//! Applies catalog translations to a page and tracks the active language.
//!
//! The [`Localizer`] is the session object: it owns the catalog and the
//! language store and drives any [`Page`]. Nothing it does surfaces an error:
//!
//! - a key missing from the active table renders as empty text
//! - an unrecognized code behaves like a table with no keys
//! - a page without a selector control is left as is
//! - store faults are logged and swallowed, and the selection lives on in
//!   memory for the rest of the session

use crate::i18n::{Language, TranslationCatalog};
use crate::page::Page;
use crate::storage::{LanguageStore, MemoryStore};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No language applied yet.
    #[default]
    Unresolved,
    /// The given code has been applied.
    Resolved(String),
}

pub struct Localizer<S = MemoryStore> {
    catalog: TranslationCatalog,
    store: Option<S>,
    state: SessionState,
}

impl<S: LanguageStore> Localizer<S> {
    pub fn new(catalog: TranslationCatalog, store: S) -> Self {
        Self {
            catalog,
            store: Some(store),
            state: SessionState::Unresolved,
        }
    }

    /// A session whose selection is never persisted.
    pub fn without_storage(catalog: TranslationCatalog) -> Self {
        Self {
            catalog,
            store: None,
            state: SessionState::Unresolved,
        }
    }

    pub fn catalog(&self) -> &TranslationCatalog {
        &self.catalog
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active_language(&self) -> Option<&str> {
        match &self.state {
            SessionState::Resolved(code) => Some(code),
            SessionState::Unresolved => None,
        }
    }

    /// The code a fresh page load would apply.
    ///
    /// A persisted code wins, whatever the locale says. Otherwise the locale
    /// picks by prefix (`ru`, `en`, `zh`) and everything else gets `uk`.
    pub fn resolve_initial(&self, locale: Option<&str>) -> String {
        if let Some(stored) = self.stored_code() {
            return stored;
        }
        Language::detect(locale).code().to_string()
    }

    /// Resolves the initial language and applies it. Returns the applied code.
    pub fn initialize<P: Page>(&mut self, page: &mut P, locale: Option<&str>) -> String {
        let code = self.resolve_initial(locale);
        tracing::info!(code = %code, locale = ?locale, "resolved initial language");
        self.apply_language(page, &code);
        code
    }

    /// Writes the `code` translation into every marked element, syncs the
    /// selector, and persists `code`.
    pub fn apply_language<P: Page>(&mut self, page: &mut P, code: &str) {
        if self.catalog.table(code).is_none() {
            tracing::warn!(code, "no translation table for language; marked elements will be blank");
        }

        let elements = page.marked_elements();
        for element in &elements {
            let Some(key) = page.translation_key(element) else {
                continue;
            };
            let text = self.catalog.lookup(code, &key).unwrap_or_default();
            page.set_text(element, text);
        }

        if !page.set_selector_value(code) {
            tracing::trace!("page has no language selector");
        }

        self.persist(code);
        self.state = SessionState::Resolved(code.to_string());
        tracing::debug!(code, elements = elements.len(), "applied language");
    }

    /// Entry point for user-initiated changes, such as the selector's change
    /// event. Same behavior as [`Self::apply_language`].
    pub fn switch_language<P: Page>(&mut self, page: &mut P, code: &str) {
        self.apply_language(page, code);
    }

    fn stored_code(&self) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.load() {
            Ok(code) => code.filter(|c| !c.is_empty()),
            Err(err) => {
                tracing::warn!(error = %err, "language storage unreadable; ignoring stored preference");
                None
            }
        }
    }

    fn persist(&mut self, code: &str) {
        let Some(store) = self.store.as_mut() else {
            return;
        };
        if let Err(err) = store.save(code) {
            tracing::warn!(code, error = %err, "could not persist language; keeping it for this session only");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::page::StaticPage;

    /// Store whose every access fails, as with storage disabled by policy.
    struct BrokenStore;

    impl LanguageStore for BrokenStore {
        fn load(&self) -> Result<Option<String>> {
            Err(Error::Io("storage disabled".to_string()))
        }

        fn save(&mut self, _code: &str) -> Result<()> {
            Err(Error::Io("storage disabled".to_string()))
        }
    }

    fn catalog() -> TranslationCatalog {
        TranslationCatalog::builtin().expect("catalog")
    }

    fn login_page() -> StaticPage {
        StaticPage::new()
            .with_selector("")
            .with_element("title", "")
            .with_element("email-label", "")
            .with_element("password-label", "")
            .with_element("login-button", "")
    }

    #[test]
    fn apply_sets_every_marked_element_from_catalog() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = login_page();

        localizer.apply_language(&mut page, "zh");

        for element in page.elements() {
            assert_eq!(
                Some(element.text.as_str()),
                localizer.catalog().lookup("zh", &element.key)
            );
        }
        assert_eq!(page.selector_value(), Some("zh"));
    }

    #[test]
    fn apply_persists_code() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        localizer.apply_language(&mut login_page(), "ru");
        assert_eq!(localizer.store().and_then(MemoryStore::code), Some("ru"));
        assert_eq!(localizer.active_language(), Some("ru"));
    }

    #[test]
    fn missing_key_renders_empty() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = StaticPage::new().with_element("not-a-key", "stale");
        localizer.apply_language(&mut page, "en");
        assert_eq!(page.text_of("not-a-key"), Some(""));
    }

    #[test]
    fn unknown_code_blanks_elements_but_still_persists() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = login_page();
        localizer.apply_language(&mut page, "en");
        localizer.apply_language(&mut page, "fr");

        assert!(page.elements().iter().all(|e| e.text.is_empty()));
        assert_eq!(page.selector_value(), Some("fr"));
        assert_eq!(localizer.store().and_then(MemoryStore::code), Some("fr"));
    }

    #[test]
    fn page_without_selector_is_tolerated() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = StaticPage::new().with_element("title", "");
        localizer.apply_language(&mut page, "uk");
        assert_eq!(page.text_of("title"), Some("Авторизація"));
        assert_eq!(page.selector(), None);
    }

    #[test]
    fn stored_code_wins_over_locale() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::with_code("zh"));
        let mut page = login_page();
        let applied = localizer.initialize(&mut page, Some("ru-RU"));
        assert_eq!(applied, "zh");
        assert_eq!(page.text_of("title"), Some("授权"));
    }

    #[test]
    fn unmatched_locale_defaults_to_ukrainian() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = login_page();
        let applied = localizer.initialize(&mut page, Some("fr-FR"));
        assert_eq!(applied, "uk");
        assert_eq!(page.text_of("login-button"), Some("Увійти"));
    }

    #[test]
    fn empty_stored_code_is_ignored() {
        let localizer = Localizer::new(catalog(), MemoryStore::with_code(""));
        assert_eq!(localizer.resolve_initial(Some("en-US")), "en");
    }

    #[test]
    fn switch_updates_text_and_selector() {
        let mut localizer = Localizer::new(catalog(), MemoryStore::new());
        let mut page = login_page();
        localizer.apply_language(&mut page, "en");
        assert_eq!(page.text_of("login-button"), Some("Login"));

        localizer.switch_language(&mut page, "ru");

        assert_eq!(page.text_of("title"), Some("Авторизация"));
        assert_eq!(page.text_of("login-button"), Some("Войти"));
        assert_eq!(page.selector_value(), Some("ru"));
        assert_eq!(localizer.state(), &SessionState::Resolved("ru".to_string()));
    }

    #[test]
    fn broken_storage_falls_back_to_memory() {
        let mut localizer = Localizer::new(catalog(), BrokenStore);
        let mut page = login_page();

        let applied = localizer.initialize(&mut page, Some("en-US"));
        assert_eq!(applied, "en");
        assert_eq!(page.text_of("login-button"), Some("Login"));

        localizer.switch_language(&mut page, "zh");
        assert_eq!(localizer.active_language(), Some("zh"));
    }

    #[test]
    fn session_starts_unresolved() {
        let localizer: Localizer = Localizer::without_storage(catalog());
        assert_eq!(localizer.state(), &SessionState::Unresolved);
        assert_eq!(localizer.active_language(), None);
        assert!(localizer.store().is_none());
    }
}
