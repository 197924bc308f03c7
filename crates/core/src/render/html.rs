//! Inline tokens to HTML
//!
//! Text and code are entity-escaped as they are written, so no markup from
//! the input survives into the output. Attribute values are escaped for a
//! double-quoted context.

use html_escape::{encode_double_quoted_attribute, encode_text};

use super::inline::Inline;

/// Serialize tokens into an HTML fragment.
pub fn to_html(tokens: &[Inline]) -> String {
    let mut out = String::new();
    write_tokens(tokens, &mut out);
    out
}

fn write_tokens(tokens: &[Inline], out: &mut String) {
    for token in tokens {
        match token {
            Inline::Text { text } => out.push_str(&encode_text(text)),
            Inline::Bold { children } => {
                out.push_str("<strong>");
                write_tokens(children, out);
                out.push_str("</strong>");
            }
            Inline::Italic { children } => {
                out.push_str("<em>");
                write_tokens(children, out);
                out.push_str("</em>");
            }
            Inline::Code { code } => {
                out.push_str("<code>");
                out.push_str(&encode_text(code));
                out.push_str("</code>");
            }
            Inline::Link { children, url } => {
                out.push_str("<a href=\"");
                out.push_str(&encode_double_quoted_attribute(url.trim()));
                out.push_str("\" target=\"_blank\">");
                write_tokens(children, out);
                out.push_str("</a>");
            }
            Inline::Image { alt, url } => {
                out.push_str("<img src=\"");
                out.push_str(&encode_double_quoted_attribute(url.trim()));
                out.push_str("\" alt=\"");
                out.push_str(&encode_double_quoted_attribute(alt));
                out.push_str("\">");
            }
            Inline::LineBreak => out.push_str("<br>"),
        }
    }
}
