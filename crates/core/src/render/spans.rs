//! Flatten sanitized rich text into styled spans for non-HTML presenters.

use scraper::{ElementRef, Html};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

/// A run of text sharing one style. Line breaks are spans containing `"\n"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Span {
    pub text: String,
    pub style: Style,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Convert a sanitized HTML fragment into spans.
pub fn to_spans(html: &str) -> Vec<Span> {
    let fragment = Html::parse_fragment(html);
    let mut spans = Vec::new();
    collect(fragment.root_element(), Style::default(), None, &mut spans);
    spans
}

fn collect(element: ElementRef<'_>, style: Style, link: Option<&str>, spans: &mut Vec<Span>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            let raw: &str = text;
            push(spans, raw, style, link);
            continue;
        }

        let Some(child_element) = ElementRef::wrap(child) else {
            continue;
        };

        let el = child_element.value();
        let mut inner = style;
        let mut inner_link = link;

        match el.name() {
            "br" => {
                push(spans, "\n", Style::default(), None);
                continue;
            }
            "img" => {
                let alt = el.attr("alt").unwrap_or_default();
                let label = if alt.is_empty() {
                    "[image]".to_string()
                } else {
                    format!("[image: {alt}]")
                };
                push(spans, &label, style, el.attr("src"));
                continue;
            }
            "strong" | "b" => inner.bold = true,
            "em" | "i" => inner.italic = true,
            "code" => inner.code = true,
            "a" => inner_link = el.attr("href").or(link),
            _ => {}
        }

        collect(child_element, inner, inner_link, spans);
    }
}

fn push(spans: &mut Vec<Span>, text: &str, style: Style, link: Option<&str>) {
    if text.is_empty() {
        return;
    }

    if let Some(last) = spans.last_mut() {
        if last.style == style && last.link.as_deref() == link && last.text != "\n" && text != "\n"
        {
            last.text.push_str(text);
            return;
        }
    }

    spans.push(Span {
        text: text.to_string(),
        style,
        link: link.map(str::to_string),
    });
}
