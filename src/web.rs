// SPDX-License-Identifier: MPL-2.0
//! Browser binding (wasm32 only).
//!
//! Load the module on the login or signup page. The initial language is
//! resolved and applied once the document has been parsed: immediately when
//! the module is instantiated after that point, otherwise from a one-shot
//! `DOMContentLoaded` listener. The selector control calls
//! `switchLanguage(this.value)` from its change handler.
//!
//! Local storage is best-effort: when the browser refuses access the session
//! runs without persistence.

use crate::config::{PageConfig, STORAGE_KEY};
use crate::error::{Error, Result};
use crate::i18n::TranslationCatalog;
use crate::localizer::Localizer;
use crate::page::Page;
use crate::storage::LanguageStore;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlSelectElement, Storage};

const READY_STATE_LOADING: &str = "loading";

thread_local! {
    static SESSION: RefCell<Option<Session>> = const { RefCell::new(None) };
}

struct Session {
    localizer: Localizer<LocalStorageStore>,
    page: DomPage,
}

/// The live document.
pub struct DomPage {
    document: Document,
    config: PageConfig,
}

impl DomPage {
    pub fn new(document: Document, config: PageConfig) -> Self {
        Self { document, config }
    }
}

impl Page for DomPage {
    type Element = Element;

    fn marked_elements(&self) -> Vec<Element> {
        let selector = format!("[{}]", self.config.marker_attribute);
        let Ok(nodes) = self.document.query_selector_all(&selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn translation_key(&self, element: &Element) -> Option<String> {
        element.get_attribute(&self.config.marker_attribute)
    }

    fn set_text(&mut self, element: &Element, text: &str) {
        match element.dyn_ref::<HtmlElement>() {
            Some(html) => html.set_inner_text(text),
            None => element.set_text_content(Some(text)),
        }
    }

    fn set_selector_value(&mut self, code: &str) -> bool {
        let Some(select) = self
            .document
            .get_element_by_id(&self.config.selector_id)
            .and_then(|element| element.dyn_into::<HtmlSelectElement>().ok())
        else {
            return false;
        };
        select.set_value(code);
        true
    }
}

/// `window.localStorage` under the `selectedLanguage` key.
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// `None` when storage is disabled or throws on access.
    pub fn available() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl LanguageStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>> {
        self.storage
            .get_item(STORAGE_KEY)
            .map_err(|err| Error::Io(format!("localStorage read failed: {err:?}")))
    }

    fn save(&mut self, code: &str) -> Result<()> {
        self.storage
            .set_item(STORAGE_KEY, code)
            .map_err(|err| Error::Io(format!("localStorage write failed: {err:?}")))
    }
}

fn js_error(err: Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> std::result::Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

#[wasm_bindgen(start)]
pub fn start() -> std::result::Result<(), JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() != READY_STATE_LOADING {
        return initialize_session(document);
    }

    let parsed = document.clone();
    let on_loaded = Closure::once_into_js(move || {
        if let Err(err) = initialize_session(parsed) {
            tracing::warn!(error = ?err, "could not localize page");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_loaded.unchecked_ref())
}

/// Resolves the initial language for `document`, applies it, and installs
/// the session used by `switchLanguage`. Replaces any previous session.
pub fn initialize_session(document: Document) -> std::result::Result<(), JsValue> {
    let locale = window()?.navigator().language();

    let catalog = TranslationCatalog::builtin().map_err(js_error)?;
    let mut localizer = match LocalStorageStore::available() {
        Some(store) => Localizer::new(catalog, store),
        None => Localizer::without_storage(catalog),
    };
    let mut page = DomPage::new(document, PageConfig::default());
    localizer.initialize(&mut page, locale.as_deref());

    SESSION.with(|session| {
        *session.borrow_mut() = Some(Session { localizer, page });
    });
    Ok(())
}

#[wasm_bindgen(js_name = switchLanguage)]
pub fn switch_language(code: &str) {
    SESSION.with(|session| {
        if let Some(Session { localizer, page }) = session.borrow_mut().as_mut() {
            localizer.switch_language(page, code);
        }
    });
}

#[wasm_bindgen(js_name = activeLanguage)]
pub fn active_language() -> Option<String> {
    SESSION.with(|session| {
        session
            .borrow()
            .as_ref()
            .and_then(|s| s.localizer.active_language().map(str::to_string))
    })
}
