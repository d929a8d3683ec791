//! PPTX conversion via the external tool, with slide-boundary rewriting.
//!
//! PowerPoint is the one format with no library-backed capability: the
//! external converter (pandoc by default) is the only path, so its absence
//! or failure is a recorded per-file *error* — unlike PDF/DOCX, which
//! degrade to the placeholder. The invocation is synchronous from the
//! batch's point of view and bounded by the configured timeout; a timeout
//! counts as a conversion failure and is never retried.

use crate::config::ConvertConfig;
use crate::error::FileError;
use crate::report::FileOutcome;
use std::path::Path;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, info};

/// Post-process the tool's unwrapped Markdown into slide sections:
/// a presentation header, a conversion notice, a horizontal rule, and every
/// top-level heading marker rewritten to a slide boundary.
pub fn reshape_slides(source: &Path, markdown: &str) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let mut out = format!("# Presentation: {stem}\n\n_Converted from PowerPoint_\n\n---\n\n");
    for line in markdown.lines() {
        if let Some(rest) = line.strip_prefix("# ") {
            out.push_str("## Slide: ");
            out.push_str(rest);
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Convert one PPTX by invoking the external tool.
pub async fn convert(input: &Path, output: &Path, config: &ConvertConfig) -> FileOutcome {
    // Resolve the tool up front so "not installed" reads as what it is,
    // not as a spawn error.
    let program = match which::which(&config.tool_program) {
        Ok(p) => p,
        Err(e) => {
            return FileOutcome::Failed(FileError::ToolMissing {
                path: input.to_path_buf(),
                tool: config.tool_program.clone(),
                detail: e.to_string(),
            });
        }
    };
    debug!("Using conversion tool: {}", program.display());

    let invocation = Command::new(&program)
        .arg(input)
        .args(["-t", "markdown", "--wrap=none"])
        .kill_on_drop(true)
        .output();

    let result = tokio::time::timeout(
        Duration::from_secs(config.tool_timeout_secs),
        invocation,
    )
    .await;

    let out = match result {
        Err(_elapsed) => {
            return FileOutcome::Failed(FileError::ToolTimeout {
                path: input.to_path_buf(),
                secs: config.tool_timeout_secs,
            });
        }
        Ok(Err(e)) => {
            return FileOutcome::Failed(FileError::ToolFailed {
                path: input.to_path_buf(),
                detail: format!("spawn: {e}"),
            });
        }
        Ok(Ok(out)) => out,
    };

    if !out.status.success() {
        return FileOutcome::Failed(FileError::ToolFailed {
            path: input.to_path_buf(),
            detail: String::from_utf8_lossy(&out.stderr).trim().to_string(),
        });
    }

    let markdown = String::from_utf8_lossy(&out.stdout);
    let doc = reshape_slides(input, &markdown);

    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!("Converted PPTX: {}", input.display());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
