//! Pass-through copying for formats that are already text-tool friendly.
//!
//! Markdown, CSV, JSON and YAML need no conversion: they are copied
//! byte-for-byte, keeping their extension. CSV has an optional variant
//! ([`CsvMode::Fenced`]) that wraps the raw content in a fenced code block
//! under a "CSV Data" heading so it displays verbatim inside a Markdown
//! document. Both variants record success in the converted list.

use crate::config::{ConvertConfig, CsvMode};
use crate::error::FileError;
use crate::report::FileOutcome;
use std::path::Path;
use tracing::info;

/// Copy or wrap one pass-through artifact.
pub async fn convert(input: &Path, output: &Path, config: &ConvertConfig) -> FileOutcome {
    let is_csv = input
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv && config.csv_mode == CsvMode::Fenced {
        return fence_csv(input, output).await;
    }
    copy_verbatim(input, output).await
}

/// Byte-for-byte copy, original extension preserved.
async fn copy_verbatim(input: &Path, output: &Path) -> FileOutcome {
    if let Some(parent) = output.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return FileOutcome::Failed(FileError::Io {
                path: input.to_path_buf(),
                detail: format!("create dir: {e}"),
            });
        }
    }
    match tokio::fs::copy(input, output).await {
        Ok(_) => {
            info!("Copied: {}", input.display());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(FileError::Io {
            path: input.to_path_buf(),
            detail: format!("copy: {e}"),
        }),
    }
}

/// Wrap the raw CSV content — no delimiter parsing, no reshaping — in a
/// fenced block so the bytes survive untouched inside a Markdown document.
async fn fence_csv(input: &Path, output: &Path) -> FileOutcome {
    let content = match tokio::fs::read_to_string(input).await {
        Ok(s) => s,
        Err(e) => {
            return FileOutcome::Failed(FileError::Io {
                path: input.to_path_buf(),
                detail: format!("read: {e}"),
            });
        }
    };

    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let newline_pad = if content.ends_with('\n') { "" } else { "\n" };
    let doc = format!("# CSV Data: {name}\n\n```csv\n{content}{newline_pad}```\n");

    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!("Converted CSV: {}", input.display());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
