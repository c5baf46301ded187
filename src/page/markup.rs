// SPDX-License-Identifier: MPL-2.0
//! Reads page markup into a [`StaticPage`].
//!
//! The scanner is lenient: end tag names are not checked and HTML void
//! elements (`<input>`, `<br>`, ...) may be left unclosed. Script and style
//! bodies are not treated specially.

use super::StaticPage;
use crate::config::PageConfig;
use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

const VOID_ELEMENTS: &[&[u8]] = &[
    b"area", b"base", b"br", b"col", b"embed", b"hr", b"img", b"input", b"link", b"meta",
    b"param", b"source", b"track", b"wbr",
];

/// Marked element whose closing tag has not been seen yet.
struct Capture {
    index: usize,
    name: Vec<u8>,
    /// Unclosed descendants sharing `name`.
    nesting: usize,
    text: String,
}

/// Scans `source` for elements carrying `config.marker_attribute` and for an
/// element whose id is `config.selector_id`.
///
/// Every marked element is collected, including ones nested inside another
/// marked element. Captured text follows `textContent`: all descendant text
/// concatenated, with only the outer whitespace trimmed.
pub fn scan(source: &str, config: &PageConfig) -> Result<StaticPage> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().check_end_names = false;

    let mut page = StaticPage::new();
    let mut open: Vec<Capture> = Vec::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                let is_void = VOID_ELEMENTS.contains(&name.as_slice());
                inspect_attributes(e, config, &mut page)?;
                let key = marker_key(e, config)?;

                if is_void {
                    if let Some(key) = key {
                        page.push_element(key, "");
                    }
                    continue;
                }

                for capture in open.iter_mut().filter(|c| c.name == name) {
                    capture.nesting += 1;
                }
                if let Some(key) = key {
                    let index = page.elements().len();
                    page.push_element(key, "");
                    open.push(Capture {
                        index,
                        name,
                        nesting: 0,
                        text: String::new(),
                    });
                }
            }
            Event::Empty(ref e) => {
                inspect_attributes(e, config, &mut page)?;
                if let Some(key) = marker_key(e, config)? {
                    page.push_element(key, "");
                }
            }
            Event::Text(ref e) => {
                if !open.is_empty() {
                    let text = decode_text(e)?;
                    for capture in &mut open {
                        capture.text.push_str(&text);
                    }
                }
            }
            Event::CData(ref e) => {
                let text = String::from_utf8_lossy(e);
                for capture in &mut open {
                    capture.text.push_str(&text);
                }
            }
            Event::End(ref e) => {
                let name = e.local_name().as_ref().to_ascii_lowercase();
                let mut closed = Vec::new();
                open.retain_mut(|capture| {
                    if capture.name != name {
                        return true;
                    }
                    if capture.nesting == 0 {
                        closed.push((capture.index, std::mem::take(&mut capture.text)));
                        return false;
                    }
                    capture.nesting -= 1;
                    true
                });
                for (index, text) in closed {
                    page.set_element_text(index, text.trim());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(capture) = open.first() {
        return Err(Error::Markup(format!(
            "element marked with {} is never closed",
            page.elements()
                .get(capture.index)
                .map(|e| e.key.as_str())
                .unwrap_or_default()
        )));
    }

    Ok(page)
}

fn marker_key(e: &BytesStart<'_>, config: &PageConfig) -> Result<Option<String>> {
    attribute_value(e, config.marker_attribute.as_bytes())
}

/// Notes the selector control when this element carries its id.
fn inspect_attributes(e: &BytesStart<'_>, config: &PageConfig, page: &mut StaticPage) -> Result<()> {
    if page.selector().is_some() {
        return Ok(());
    }
    if attribute_value(e, b"id")?.as_deref() == Some(config.selector_id.as_str()) {
        let value = attribute_value(e, b"value")?.unwrap_or_default();
        page.set_selector(value);
    }
    Ok(())
}

fn attribute_value(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.html_attributes() {
        let attr = attr?;
        if attr.key.as_ref().eq_ignore_ascii_case(name) {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn decode_text(e: &BytesText<'_>) -> Result<String> {
    match e.unescape() {
        Ok(text) => Ok(text.into_owned()),
        // HTML named entities such as `&nbsp;` are kept verbatim.
        Err(_) => std::str::from_utf8(e)
            .map(str::to_string)
            .map_err(|err| Error::Markup(err.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title data-translate="title">Authorization</title></head>
<body>
  <select id="lang-select">
    <option value="en">English</option>
    <option value="ru">Русский</option>
  </select>
  <form>
    <label data-translate="email-label">Email:</label>
    <input type="email" required>
    <button data-translate="login-button"><span>Log</span>in</button>
    <a href="?a=1&amp;b=2" data-translate="forgot-password-button">Forgot password?</a>
    <p data-translate="message-ok"/>
  </form>
</body>
</html>"#;

    #[test]
    fn scan_collects_marked_elements_in_order() {
        let page = scan(LOGIN_PAGE, &PageConfig::default()).expect("scan");
        let keys: Vec<&str> = page.elements().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(
            keys,
            vec![
                "title",
                "email-label",
                "login-button",
                "forgot-password-button",
                "message-ok"
            ]
        );
    }

    #[test]
    fn scan_captures_current_text() {
        let page = scan(LOGIN_PAGE, &PageConfig::default()).expect("scan");
        assert_eq!(page.text_of("title"), Some("Authorization"));
        assert_eq!(page.text_of("email-label"), Some("Email:"));
        assert_eq!(page.text_of("login-button"), Some("Login"));
        assert_eq!(page.text_of("message-ok"), Some(""));
    }

    #[test]
    fn scan_detects_selector() {
        let page = scan(LOGIN_PAGE, &PageConfig::default()).expect("scan");
        assert!(page.selector().is_some());
    }

    #[test]
    fn scan_without_selector() {
        let page = scan("<div><b data-translate=\"title\">x</b></div>", &PageConfig::default())
            .expect("scan");
        assert!(page.selector().is_none());
        assert_eq!(page.elements().len(), 1);
    }

    #[test]
    fn scan_honors_custom_hook_names() {
        let config = PageConfig {
            marker_attribute: "data-i18n".to_string(),
            selector_id: "language".to_string(),
        };
        let source = r#"<div><select id="language"></select><h1 data-i18n="title">T</h1><h2 data-translate="title">U</h2></div>"#;
        let page = scan(source, &config).expect("scan");
        assert_eq!(page.elements().len(), 1);
        assert_eq!(page.text_of("title"), Some("T"));
        assert!(page.selector().is_some());
    }

    #[test]
    fn scan_handles_nested_same_name_elements() {
        let source = r#"<div data-translate="registration"><div>inner</div>outer</div>"#;
        let page = scan(source, &PageConfig::default()).expect("scan");
        assert_eq!(page.text_of("registration"), Some("innerouter"));
    }

    #[test]
    fn scan_keeps_marked_elements_nested_in_marked_elements() {
        let source =
            r#"<div data-translate="registration"><span data-translate="title">x</span> y</div>"#;
        let page = scan(source, &PageConfig::default()).expect("scan");
        let keys: Vec<&str> = page.elements().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["registration", "title"]);
        assert_eq!(page.text_of("title"), Some("x"));
        assert_eq!(page.text_of("registration"), Some("x y"));
    }

    #[test]
    fn scan_keeps_nested_markers_of_the_same_tag() {
        let source = r#"<div data-translate="registration"><div data-translate="title">a</div>b</div>"#;
        let page = scan(source, &PageConfig::default()).expect("scan");
        assert_eq!(page.text_of("title"), Some("a"));
        assert_eq!(page.text_of("registration"), Some("ab"));
    }

    #[test]
    fn scan_collects_self_closing_marker_inside_marked_element() {
        let source = r#"<p data-translate="registration">r<i data-translate="title"/></p>"#;
        let page = scan(source, &PageConfig::default()).expect("scan");
        assert_eq!(page.elements().len(), 2);
        assert_eq!(page.text_of("registration"), Some("r"));
    }

    #[test]
    fn scan_keeps_unknown_html_entities_verbatim() {
        let source = r#"<p data-translate="title">A&nbsp;B</p>"#;
        let page = scan(source, &PageConfig::default()).expect("scan");
        assert_eq!(page.text_of("title"), Some("A&nbsp;B"));
    }

    #[test]
    fn scan_reports_unclosed_marked_element() {
        let result = scan(r#"<p data-translate="title">dangling"#, &PageConfig::default());
        assert!(matches!(result, Err(Error::Markup(_))));
    }
}
