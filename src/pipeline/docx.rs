//! DOCX conversion: paragraph, heading, and table reconstruction.
//!
//! Parsing goes through the injected [`DocxStructure`] capability, which
//! yields a flat [`DocxBlock`] sequence; rendering that sequence to
//! Markdown is a pure function so heading levels and table layout are
//! testable without a real `.docx`. No capability, or a parse failure,
//! degrades to the manual-conversion placeholder exactly like PDF.

use crate::capability::{DocxBlock, DocxStructure};
use crate::report::FileOutcome;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Heading level from a paragraph style name.
///
/// A style counts as a heading when its name starts with "heading"
/// (case-insensitive, covering `Heading1`, `heading 2`, …). The level is
/// the style name's trailing digit; a non-digit last character means
/// level 1. Returns `None` for non-heading styles.
pub fn heading_level(style: &str) -> Option<usize> {
    if !style.to_ascii_lowercase().starts_with("heading") {
        return None;
    }
    match style.chars().last().and_then(|c| c.to_digit(10)) {
        Some(0) => Some(1),
        Some(n) => Some(n as usize),
        None => Some(1),
    }
}

/// Render parsed blocks to Markdown.
pub fn render_blocks(blocks: &[DocxBlock]) -> String {
    let mut out = String::new();
    for block in blocks {
        match block {
            DocxBlock::Paragraph { style, text } => {
                let text = text.trim();
                if text.is_empty() {
                    continue; // blank paragraphs are dropped
                }
                match style.as_deref().and_then(heading_level) {
                    Some(level) => {
                        out.push_str(&"#".repeat(level));
                        out.push(' ');
                        out.push_str(text);
                        out.push_str("\n\n");
                    }
                    None => {
                        out.push_str(text);
                        out.push_str("\n\n");
                    }
                }
            }
            DocxBlock::Table { rows } => {
                out.push_str(&render_table(rows));
            }
        }
    }
    out
}

/// GFM table: header from the first row, `---` separator matching the
/// column count, one line per remaining row.
fn render_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };
    let cols = header.len();
    if cols == 0 {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("| {} |\n", header.join(" | ")));
    out.push_str(&format!("|{}\n", " --- |".repeat(cols)));
    for row in &rows[1..] {
        out.push_str(&format!("| {} |\n", row.join(" | ")));
    }
    out.push('\n');
    out
}

/// Convert one DOCX, degrading to the placeholder when parsing is
/// unavailable or fails.
pub async fn convert(
    input: &Path,
    output: &Path,
    parser: Option<&Arc<dyn DocxStructure>>,
) -> FileOutcome {
    let Some(parser) = parser else {
        return super::placeholder::write_placeholder(
            input,
            output,
            "DOCX",
            "no Word document parsing capability available",
        )
        .await;
    };

    let parser = Arc::clone(parser);
    let path = input.to_path_buf();
    let parsed = tokio::task::spawn_blocking(move || parser.parse(&path)).await;

    let blocks = match parsed {
        Ok(Ok(blocks)) => blocks,
        Ok(Err(e)) => {
            return super::placeholder::write_placeholder(
                input,
                output,
                "DOCX",
                &format!("document parsing failed: {e}"),
            )
            .await;
        }
        Err(join_err) => {
            return super::placeholder::write_placeholder(
                input,
                output,
                "DOCX",
                &format!("document parsing aborted: {join_err}"),
            )
            .await;
        }
    };

    let mut doc = super::front_matter(input, "DOCX");
    doc.push_str(&render_blocks(&blocks));

    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!(
                "Converted DOCX: {} ({} blocks)",
                input.display(),
                blocks.len()
            );
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
