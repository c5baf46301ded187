// SPDX-License-Identifier: MPL-2.0
//! Page abstraction driven by the [`Localizer`](crate::localizer::Localizer).
//!
//! A page exposes the elements that carry the translation marker attribute
//! and, optionally, a language selector control. The browser DOM, an
//! in-memory page, and a page scanned from markup all implement [`Page`].

pub mod markup;
pub mod static_page;

pub use static_page::{LanguageSelector, MarkedElement, StaticPage};

pub trait Page {
    /// Handle to one marked element.
    type Element;

    /// Marked elements in document order.
    fn marked_elements(&self) -> Vec<Self::Element>;

    /// The key stored in the element's marker attribute.
    fn translation_key(&self, element: &Self::Element) -> Option<String>;

    /// Replaces the element's visible text.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Synchronizes the selector control. Returns `false` when the page has
    /// no selector.
    fn set_selector_value(&mut self, code: &str) -> bool;
}
