//! Manual-conversion placeholder documents.
//!
//! Emitted when a structured converter has no capability to run with, or
//! its extraction failed. The run records these as *skipped* — needing
//! manual attention — which is distinct from both "converted" and "error":
//! a placeholder never fails the run's exit status.

use crate::report::{FileOutcome, Skip, SkipReason};
use std::path::Path;
use tracing::warn;

/// Render the placeholder document: a "conversion required" heading, the
/// declared type and reason, and a fixed four-step checklist for a human.
pub fn placeholder_document(source: &Path, kind_label: &str, reason: &str) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!(
        "# Conversion Required: {name}\n\
         \n\
         **Type:** {kind_label}\n\
         **Reason:** {reason}\n\
         \n\
         This document could not be converted automatically.\n\
         \n\
         ## Manual Conversion Steps\n\
         \n\
         1. Open the original file: `{name}`\n\
         2. Copy its text content\n\
         3. Paste the content here in Markdown form\n\
         4. Delete this notice\n"
    )
}

/// Write the placeholder to `output` and record the file as skipped.
///
/// A write failure downgrades further, to a recorded error — the batch
/// still continues.
pub async fn write_placeholder(
    input: &Path,
    output: &Path,
    kind_label: &str,
    reason: &str,
) -> FileOutcome {
    warn!(
        "Needs manual conversion ({}): {} — {}",
        kind_label,
        input.display(),
        reason
    );
    let doc = placeholder_document(input, kind_label, reason);
    match super::write_markdown(output, &doc).await {
        Ok(()) => FileOutcome::Skipped(Skip {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            reason: SkipReason::ManualConversion {
                detail: reason.to_string(),
            },
        }),
        Err(e) => FileOutcome::Failed(e),
    }
}
