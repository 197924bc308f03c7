//! Terminal presentation of rendered content

use colored::Colorize;
use forumhub_core::models::{format_timestamp, Role};
use forumhub_core::render::spans::{to_spans, Span};
use forumhub_core::render::Segment;

use crate::prelude::*;

/// Format rendered segments for a terminal
pub fn format_segments(segments: &[Segment]) -> String {
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::RichText { html } => out.push_str(&format_spans(&to_spans(html))),
            Segment::Code { language, .. } => {
                if !out.is_empty() && !out.ends_with('\n') {
                    out.push('\n');
                }
                out.push_str(&format_code_block(language, &segment.numbered_lines()));
            }
        }
    }

    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn format_spans(spans: &[Span]) -> String {
    let mut out = String::new();

    for span in spans {
        if span.text == "\n" {
            out.push('\n');
            continue;
        }

        let text = terminal_safe(&span.text);
        let mut styled = if span.style.code {
            text.bright_yellow()
        } else {
            text.normal()
        };
        if span.style.bold {
            styled = styled.bold();
        }
        if span.style.italic {
            styled = styled.italic();
        }

        match &span.link {
            Some(url) if !span.style.code => {
                out.push_str(&f!(
                    "{} ({})",
                    styled.underline().cyan(),
                    terminal_safe(url).bright_black()
                ))
            }
            _ => out.push_str(&styled.to_string()),
        }
    }

    out
}

/// A code block with a language header and numbered lines
fn format_code_block(language: &str, lines: &[(usize, &str)]) -> String {
    let width = lines.len().to_string().len();
    let language = terminal_safe(language);
    let mut out = f!("{}\n", f!("── {language} ──").bright_black());

    for (number, line) in lines {
        out.push_str(&f!(
            "{} {} {}\n",
            f!("{number:>width$}").bright_black(),
            "│".bright_black(),
            terminal_safe(line)
        ));
    }

    out
}

/// Drop control characters other than newline and tab.
///
/// Post bodies and names come from other users, so escape sequences in them
/// must not reach the terminal.
pub fn terminal_safe(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t'))
        .collect()
}

/// Author name with role badge and timestamp
pub fn author_line(name: Option<&str>, role: Option<Role>, timestamp: &str) -> String {
    let name = terminal_safe(name.unwrap_or("unknown"));
    let badge = match role {
        Some(Role::Admin) => f!(" [{}]", Role::Admin.badge()).bright_red().to_string(),
        Some(Role::Moderator) => f!(" [{}]", Role::Moderator.badge()).bright_blue().to_string(),
        _ => String::new(),
    };

    f!(
        "{}{} {}",
        name.bright_magenta(),
        badge,
        format_timestamp(timestamp).bright_black()
    )
}
