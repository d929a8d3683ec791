//! PDF conversion: page-by-page text extraction, or the placeholder.
//!
//! Extraction goes through the injected [`PdfText`] capability. No
//! capability, or an extraction failure, degrades to the manual-conversion
//! placeholder — a skip, never an error, so a missing extractor cannot fail
//! the run. Extraction itself is CPU-bound and runs in `spawn_blocking`.

use crate::capability::PdfText;
use crate::report::FileOutcome;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Assemble the Markdown document from extracted page texts.
///
/// One `## Page N` section per page, in order; pages whose extracted text
/// is only whitespace are dropped.
pub fn render_pages(source: &Path, pages: &[String]) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());

    let mut doc = super::front_matter(source, "PDF");
    doc.push_str(&format!("# {stem}\n"));
    for (i, page) in pages.iter().enumerate() {
        let text = page.trim();
        if text.is_empty() {
            continue;
        }
        doc.push_str(&format!("\n## Page {}\n\n{}\n", i + 1, text));
    }
    doc
}

/// Convert one PDF, degrading to the placeholder when extraction is
/// unavailable or fails.
pub async fn convert(
    input: &Path,
    output: &Path,
    extractor: Option<&Arc<dyn PdfText>>,
) -> FileOutcome {
    let Some(extractor) = extractor else {
        return super::placeholder::write_placeholder(
            input,
            output,
            "PDF",
            "no PDF text extraction capability available",
        )
        .await;
    };

    let extractor = Arc::clone(extractor);
    let path = input.to_path_buf();
    let extracted = tokio::task::spawn_blocking(move || extractor.extract_pages(&path)).await;

    let pages = match extracted {
        Ok(Ok(pages)) => pages,
        Ok(Err(e)) => {
            return super::placeholder::write_placeholder(
                input,
                output,
                "PDF",
                &format!("text extraction failed: {e}"),
            )
            .await;
        }
        Err(join_err) => {
            // The extractor panicked; treat it like any extraction failure.
            return super::placeholder::write_placeholder(
                input,
                output,
                "PDF",
                &format!("text extraction aborted: {join_err}"),
            )
            .await;
        }
    };

    let doc = render_pages(input, &pages);
    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!("Converted PDF: {} ({} pages)", input.display(), pages.len());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
