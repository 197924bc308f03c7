//! Fenced code block scanner
//!
//! Splits raw text on triple-backtick fences. A fence opens with three
//! backticks, an optional `[A-Za-z0-9_]+` language tag and a newline; it closes
//! at the next triple backtick. Text around fences is returned untouched.

const FENCE: &str = "```";

/// Language used when a fence has no tag
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// A chunk of raw input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Chunk<'a> {
    Text(&'a str),
    Fenced { language: &'a str, code: &'a str },
}

/// Split `input` into text and fenced-code chunks, in input order.
///
/// An opening fence without a matching close is left in the trailing text.
/// Empty text between chunks is not emitted.
pub fn split_fences(input: &str) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut emitted = 0;
    let mut search_from = 0;

    while let Some(offset) = input[search_from..].find(FENCE) {
        let open = search_from + offset;

        let Some((language, body_start)) = parse_opening(input, open) else {
            // Not an opener here; a fence may still start one byte later
            // (e.g. "````js\n").
            search_from = open + 1;
            continue;
        };

        let Some(close_offset) = input[body_start..].find(FENCE) else {
            break;
        };
        let close = body_start + close_offset;

        if open > emitted {
            chunks.push(Chunk::Text(&input[emitted..open]));
        }

        chunks.push(Chunk::Fenced {
            language: if language.is_empty() {
                DEFAULT_LANGUAGE
            } else {
                language
            },
            code: &input[body_start..close],
        });

        emitted = close + FENCE.len();
        search_from = emitted;
    }

    if emitted < input.len() {
        chunks.push(Chunk::Text(&input[emitted..]));
    }

    chunks
}

/// Returns the language tag and the byte offset where the code body starts.
fn parse_opening(input: &str, open: usize) -> Option<(&str, usize)> {
    let after = open + FENCE.len();
    let tag_len = input[after..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count();
    let newline = after + tag_len;

    if input.as_bytes().get(newline) == Some(&b'\n') {
        Some((&input[after..newline], newline + 1))
    } else {
        None
    }
}
