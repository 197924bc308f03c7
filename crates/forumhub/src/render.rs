use std::io::Read;
use std::path::{Path, PathBuf};

use crate::prelude::{eprintln, println, *};
use crate::present::format_segments;
use forumhub_core::render::{render_content, segments_to_html, Segment};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Terminal,
    Html,
    Json,
}

#[derive(Debug, clap::Args, Clone)]
pub struct RenderOptions {
    /// File with forum markdown; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Terminal)]
    pub format: Format,
}

pub fn handler(options: RenderOptions, verbose: bool) -> Result<()> {
    let raw = match options.file.as_deref() {
        Some(path) if path != Path::new("-") => read_source(path)?,
        _ => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .wrap_err("Failed to read stdin")?;
            raw
        }
    };

    if verbose {
        eprintln!("Rendering {} byte(s)...", raw.len());
    }

    let segments = render_content(&raw);
    print!("{}", format_output(&segments, options.format)?);

    Ok(())
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).wrap_err_with(|| f!("Failed to read {}", path.display()))
}

pub fn format_output(segments: &[Segment], format: Format) -> Result<String> {
    Ok(match format {
        Format::Terminal => format_segments(segments),
        Format::Html => segments_to_html(segments),
        Format::Json => f!("{}\n", to_json(&segments)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_render_file_to_html() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "Check `foo()` and:\n```js\nconst x = 1;\n```\n**done** <script>alert(1)</script>"
        )
        .unwrap();

        let raw = read_source(file.path()).unwrap();
        let html = format_output(&render_content(&raw), Format::Html).unwrap();

        assert!(html.contains("<code>foo()</code>"));
        assert!(html.contains("<pre><code class=\"language-js\">const x = 1;\n</code></pre>"));
        assert!(html.contains("<strong>done</strong>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_render_json_tags_segments() {
        let json = format_output(&render_content("a\n```\nb\n```"), Format::Json).unwrap();

        assert!(json.contains("\"type\": \"rich_text\""));
        assert!(json.contains("\"type\": \"code\""));
        assert!(json.contains("\"language\": \"plaintext\""));
    }

    #[test]
    fn test_render_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_source(&dir.path().join("missing.md")).unwrap_err();

        assert!(err.to_string().contains("Failed to read"));
    }
}
