//! Inline markup tokenizer
//!
//! A single left-to-right scan over a text chunk. At every position the rules
//! are tried in priority order: inline code, image, link, bold, italic, line
//! break. A marker that does not form a complete construct is kept as literal
//! text, so malformed input never fails.
//!
//! Code spans are atomic: closing markers for bold, italic and link text are
//! never searched for inside a code span.

use std::cell::{Cell, RefCell};

use serde::Serialize;

/// Inline token produced by [`tokenize`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Bold { children: Vec<Inline> },
    Italic { children: Vec<Inline> },
    Code { code: String },
    Link { children: Vec<Inline>, url: String },
    Image { alt: String, url: String },
    LineBreak,
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }
}

/// Tokenize a text chunk that contains no fenced code.
pub fn tokenize(input: &str) -> Vec<Inline> {
    Scanner::new(input, true).run()
}

struct Scanner<'a> {
    input: &'a str,
    allow_links: bool,
    close_bracket: OutsideCode,
    star: OutsideCode,
    bracket: NextByte,
    paren: NextByte,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str, allow_links: bool) -> Self {
        Self {
            input,
            allow_links,
            close_bracket: OutsideCode::new(b']'),
            star: OutsideCode::new(b'*'),
            bracket: NextByte::new(b']'),
            paren: NextByte::new(b')'),
        }
    }

    fn run(&self) -> Vec<Inline> {
        let mut tokens = Vec::new();
        let mut text = String::new();
        let mut pos = 0;

        while pos < self.input.len() {
            if let Some((token, consumed)) = self.match_at(pos) {
                if !text.is_empty() {
                    tokens.push(Inline::text(std::mem::take(&mut text)));
                }
                tokens.push(token);
                pos += consumed;
                continue;
            }

            // Markers are ASCII, so any other char is copied verbatim.
            let ch = self.input[pos..].chars().next().unwrap_or_default();
            text.push(ch);
            pos += ch.len_utf8();
        }

        if !text.is_empty() {
            tokens.push(Inline::text(text));
        }

        tokens
    }

    /// Try every rule at `pos`; returns the token and the bytes it consumed.
    fn match_at(&self, pos: usize) -> Option<(Inline, usize)> {
        let rest = &self.input[pos..];

        if rest.starts_with('`') {
            return self.code_span(pos);
        }
        if rest.starts_with("![") {
            if let Some(found) = self.image(pos) {
                return Some(found);
            }
        }
        if self.allow_links && rest.starts_with('[') {
            if let Some(found) = self.link(pos) {
                return Some(found);
            }
        }
        if rest.starts_with("**") {
            if let Some(found) = self.bold(pos) {
                return Some(found);
            }
        }
        if rest.starts_with('*') {
            return self.italic(pos);
        }
        if rest.starts_with("\r\n") {
            return Some((Inline::LineBreak, 2));
        }
        if rest.starts_with('\n') {
            return Some((Inline::LineBreak, 1));
        }

        None
    }

    /// `` `code` `` with non-empty content
    fn code_span(&self, pos: usize) -> Option<(Inline, usize)> {
        let rest = &self.input[pos..];
        let close = rest[1..].find('`')? + 1;
        if close == 1 {
            return None;
        }

        Some((
            Inline::Code {
                code: rest[1..close].to_string(),
            },
            close + 1,
        ))
    }

    /// `![alt](url)`; alt may be empty, url may not
    fn image(&self, pos: usize) -> Option<(Inline, usize)> {
        let alt_end = self.bracket.find(self.input, pos + 2)? - pos;
        let (url, end) = self.destination(pos, alt_end)?;

        Some((
            Inline::Image {
                alt: self.input[pos + 2..pos + alt_end].to_string(),
                url: url.to_string(),
            },
            end,
        ))
    }

    /// `[text](url)`; neither part may be empty
    fn link(&self, pos: usize) -> Option<(Inline, usize)> {
        let text_end = self.close_bracket.find(self.input, pos + 1)? - pos;
        if text_end == 1 {
            return None;
        }
        let (url, end) = self.destination(pos, text_end)?;

        let inner = Scanner::new(&self.input[pos + 1..pos + text_end], false);

        Some((
            Inline::Link {
                children: inner.run(),
                url: url.to_string(),
            },
            end,
        ))
    }

    /// `**text**` where text has no `*` outside code spans
    fn bold(&self, pos: usize) -> Option<(Inline, usize)> {
        let close = self.star.find(self.input, pos + 2)? - pos;
        if close == 2 || !self.input[pos + close..].starts_with("**") {
            return None;
        }

        Some((
            Inline::Bold {
                children: self.nested(&self.input[pos + 2..pos + close]),
            },
            close + 2,
        ))
    }

    /// `*text*` where text has no `*` outside code spans
    fn italic(&self, pos: usize) -> Option<(Inline, usize)> {
        let close = self.star.find(self.input, pos + 1)? - pos;
        if close == 1 {
            return None;
        }

        Some((
            Inline::Italic {
                children: self.nested(&self.input[pos + 1..pos + close]),
            },
            close + 1,
        ))
    }

    /// Parse `(url)` directly after the `]` at `pos + bracket`.
    /// Returns the url and the length consumed from `pos` through `)`.
    fn destination(&self, pos: usize, bracket: usize) -> Option<(&'a str, usize)> {
        let open = pos + bracket + 1;
        if !self.input[open..].starts_with('(') {
            return None;
        }
        let close = self.paren.find(self.input, open + 1)?;
        if close == open + 1 {
            return None;
        }

        Some((&self.input[open + 1..close], close + 1 - pos))
    }

    fn nested(&self, input: &'a str) -> Vec<Inline> {
        Scanner::new(input, self.allow_links).run()
    }
}

/// Next occurrence of an ASCII byte, remembering the last answer.
///
/// The scanner asks with non-decreasing offsets, so a failed search is
/// never repeated and a found marker is reused until the scan passes it.
struct NextByte {
    byte: u8,
    last: Cell<Option<(usize, Option<usize>)>>,
}

impl NextByte {
    fn new(byte: u8) -> Self {
        Self {
            byte,
            last: Cell::new(None),
        }
    }

    fn find(&self, input: &str, from: usize) -> Option<usize> {
        if let Some((start, found)) = self.last.get() {
            if start <= from && found.map_or(true, |at| from <= at) {
                return found;
            }
        }

        let found = input
            .as_bytes()
            .get(from..)?
            .iter()
            .position(|b| *b == self.byte)
            .map(|at| at + from);
        self.last.set(Some((from, found)));
        found
    }
}

/// Find an ASCII marker at or after an offset, skipping complete code spans.
///
/// Every offset a search walks through gets that search's answer, so each
/// byte is walked at most once per marker.
struct OutsideCode {
    needle: u8,
    known: RefCell<Vec<Option<Option<usize>>>>,
}

impl OutsideCode {
    fn new(needle: u8) -> Self {
        Self {
            needle,
            known: RefCell::new(Vec::new()),
        }
    }

    fn find(&self, input: &str, from: usize) -> Option<usize> {
        let bytes = input.as_bytes();
        let mut known = self.known.borrow_mut();
        if known.len() != bytes.len() {
            *known = vec![None; bytes.len()];
        }

        let mut walked = Vec::new();
        let mut pos = from;
        let found = loop {
            if pos >= bytes.len() {
                break None;
            }
            if let Some(answer) = known[pos] {
                break answer;
            }
            walked.push(pos);

            if bytes[pos] == self.needle {
                break Some(pos);
            }
            if bytes[pos] == b'`' {
                if let Some(close) = input[pos + 1..].find('`') {
                    if close > 0 {
                        pos += close + 2;
                        continue;
                    }
                }
            }
            // The needle and backtick are ASCII, so stepping inside a
            // multi-byte char never matches either.
            pos += 1;
        };

        for at in walked {
            known[at] = Some(found);
        }
        found
    }
}
