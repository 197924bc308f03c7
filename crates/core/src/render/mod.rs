//! Content renderer
//!
//! Turns raw topic and post text into segments that are safe to display.
//!
//! The pipeline:
//!
//! 1. [`fence::split_fences`] separates fenced code blocks from the rest.
//! 2. Each text chunk is tokenized by [`inline::tokenize`] (inline code, images,
//!    links, bold, italic, line breaks).
//! 3. Tokens are written as HTML with all text entity-escaped.
//! 4. The HTML goes through the allow-list sanitizer in [`sanitize`].
//!
//! Code blocks are never tokenized; they keep their raw text and are escaped
//! by whichever presenter displays them.
//!
//! # Example
//!
//! ```rust
//! use forumhub_core::render::{render_content, Segment};
//!
//! let segments = render_content("Check `foo()`\n```js\nconst x = 1;\n```\n**done**");
//!
//! assert_eq!(segments.len(), 3);
//! assert_eq!(
//!     segments[1],
//!     Segment::Code { language: "js".to_string(), code: "const x = 1;\n".to_string() }
//! );
//! ```

pub mod fence;
pub mod html;
pub mod inline;
pub mod sanitize;
pub mod spans;

use html_escape::encode_safe;
use serde::Serialize;

use fence::Chunk;

/// A unit of rendered content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    /// Sanitized HTML fragment
    RichText { html: String },
    /// Raw code for the highlighted block presenter
    Code { language: String, code: String },
}

impl Segment {
    /// Code lines paired with their 1-based line numbers.
    /// Empty for rich text.
    pub fn numbered_lines(&self) -> Vec<(usize, &str)> {
        match self {
            Segment::Code { code, .. } => code
                .lines()
                .enumerate()
                .map(|(index, line)| (index + 1, line))
                .collect(),
            Segment::RichText { .. } => Vec::new(),
        }
    }
}

/// Render raw text into display segments. Never fails; empty input yields no
/// segments.
pub fn render_content(raw: &str) -> Vec<Segment> {
    fence::split_fences(raw)
        .into_iter()
        .map(|chunk| match chunk {
            Chunk::Text(text) => Segment::RichText {
                html: render_rich_text(text),
            },
            Chunk::Fenced { language, code } => Segment::Code {
                language: language.to_string(),
                code: code.to_string(),
            },
        })
        .collect()
}

/// Render a chunk that contains no fenced code into sanitized HTML.
pub fn render_rich_text(text: &str) -> String {
    let tokens = inline::tokenize(text);
    sanitize::sanitize_html(&html::to_html(&tokens))
}

/// Render segments as one HTML fragment.
///
/// Rich text is wrapped in `<div class="prose">`; code blocks become
/// `<pre><code class="language-…">` with the code entity-escaped.
pub fn segments_to_html(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::RichText { html } => {
                out.push_str("<div class=\"prose\">");
                out.push_str(html);
                out.push_str("</div>\n");
            }
            Segment::Code { language, code } => {
                out.push_str("<pre><code class=\"language-");
                out.push_str(&encode_safe(language));
                out.push_str("\">");
                out.push_str(&encode_safe(code));
                out.push_str("</code></pre>\n");
            }
        }
    }

    out
}
