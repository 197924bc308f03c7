//! Allow-list HTML sanitizer
//!
//! The final pass over rendered rich text. The fragment is parsed with
//! `scraper` (html5ever) and written back keeping only allow-listed elements
//! and attributes. Disallowed elements are removed; their text content is kept
//! unless the element is one whose content is never meant to be shown
//! (scripts, styles, embedded documents).

use std::sync::LazyLock;

use html_escape::{encode_double_quoted_attribute, encode_text};
use regex::Regex;
use scraper::{ElementRef, Html};

/// Version of the allow-list below. Bump when either list changes.
pub const ALLOW_LIST_VERSION: u32 = 1;

/// Elements that survive sanitization
pub const ALLOWED_TAGS: &[&str] = &[
    "b", "i", "em", "strong", "a", "p", "br", "ul", "ol", "li", "code", "pre", "img",
];

/// Attributes that survive sanitization. `data-*` is never allowed.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "src", "alt", "title", "target"];

/// Elements dropped together with everything inside them
const DROPPED_WITH_CONTENT: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "template", "noscript", "textarea",
    "title", "svg", "math", "head",
];

const VOID_TAGS: &[&str] = &["br", "img"];

static SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):").expect("valid scheme regex"));

static DATA_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^data:image/(png|jpe?g|gif|webp);").expect("valid data url regex")
});

/// Sanitize an HTML fragment against the allow-list.
pub fn sanitize_html(dirty: &str) -> String {
    let fragment = Html::parse_fragment(dirty);
    let mut out = String::with_capacity(dirty.len());
    write_children(fragment.root_element(), &mut out);
    out
}

fn write_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            write_element(child_element, out);
        } else if let Some(text) = child.value().as_text() {
            let raw: &str = text;
            out.push_str(&encode_text(raw));
        }
    }
}

fn write_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();

    if DROPPED_WITH_CONTENT.contains(&name) {
        return;
    }

    if !ALLOWED_TAGS.contains(&name) {
        write_children(element, out);
        return;
    }

    out.push('<');
    out.push_str(name);
    // Written in allow-list order so output does not depend on source order.
    for &attr in ALLOWED_ATTRIBUTES {
        let Some(value) = element.value().attr(attr) else {
            continue;
        };
        if !attribute_allowed(name, attr, value) {
            continue;
        }
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&name) {
        return;
    }

    write_children(element, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn attribute_allowed(tag: &str, attr: &str, value: &str) -> bool {
    match attr {
        "href" => is_safe_href(value),
        "src" => {
            let safe = is_safe_src(value);
            if !safe && tag == "img" {
                log::warn!("dropping image with disallowed source: {value}");
            }
            safe
        }
        _ => true,
    }
}

/// Links may point to http(s), mailto or a relative location.
pub fn is_safe_href(url: &str) -> bool {
    match scheme(url) {
        None => true,
        Some(scheme) => matches!(scheme.as_str(), "http" | "https" | "mailto"),
    }
}

/// Images may load from http(s), a relative location or an inline raster image.
pub fn is_safe_src(url: &str) -> bool {
    match scheme(url) {
        None => true,
        Some(scheme) if scheme == "data" => DATA_IMAGE.is_match(url.trim()),
        Some(scheme) => matches!(scheme.as_str(), "http" | "https"),
    }
}

/// Lower-cased URL scheme, ignoring whitespace and control characters that
/// browsers strip before resolving.
fn scheme(url: &str) -> Option<String> {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    SCHEME
        .captures(&cleaned)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}
