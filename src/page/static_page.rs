// SPDX-License-Identifier: MPL-2.0
use super::Page;
use crate::config::REFERENCE_LANGUAGE_CODE;
use crate::i18n::TranslationCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedElement {
    pub key: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageSelector {
    pub value: String,
}

/// A page held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPage {
    elements: Vec<MarkedElement>,
    selector: Option<LanguageSelector>,
}

impl StaticPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_element(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.push_element(key, text);
        self
    }

    pub fn with_selector(mut self, value: impl Into<String>) -> Self {
        self.set_selector(value);
        self
    }

    pub fn push_element(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.elements.push(MarkedElement {
            key: key.into(),
            text: text.into(),
        });
    }

    pub(crate) fn set_element_text(&mut self, index: usize, text: &str) {
        if let Some(element) = self.elements.get_mut(index) {
            element.text = text.to_string();
        }
    }

    pub(crate) fn set_selector(&mut self, value: impl Into<String>) {
        self.selector = Some(LanguageSelector {
            value: value.into(),
        });
    }

    pub fn elements(&self) -> &[MarkedElement] {
        &self.elements
    }

    /// Text of the first element marked with `key`.
    pub fn text_of(&self, key: &str) -> Option<&str> {
        self.elements
            .iter()
            .find(|element| element.key == key)
            .map(|element| element.text.as_str())
    }

    pub fn selector(&self) -> Option<&LanguageSelector> {
        self.selector.as_ref()
    }

    pub fn selector_value(&self) -> Option<&str> {
        self.selector.as_ref().map(|selector| selector.value.as_str())
    }

    /// Marker keys the catalog's reference table does not define, deduplicated
    /// and in first-seen order.
    pub fn unknown_keys(&self, catalog: &TranslationCatalog) -> Vec<&str> {
        let mut unknown: Vec<&str> = Vec::new();
        for element in &self.elements {
            let key = element.key.as_str();
            if catalog.lookup(REFERENCE_LANGUAGE_CODE, key).is_none() && !unknown.contains(&key) {
                unknown.push(key);
            }
        }
        unknown
    }
}

impl Page for StaticPage {
    type Element = usize;

    fn marked_elements(&self) -> Vec<usize> {
        (0..self.elements.len()).collect()
    }

    fn translation_key(&self, element: &usize) -> Option<String> {
        self.elements.get(*element).map(|e| e.key.clone())
    }

    fn set_text(&mut self, element: &usize, text: &str) {
        self.set_element_text(*element, text);
    }

    fn set_selector_value(&mut self, code: &str) -> bool {
        match self.selector.as_mut() {
            Some(selector) => {
                selector.value = code.to_string();
                true
            }
            None => false,
        }
    }
}
