//! Image referencing: copy the binary aside, emit a stub document.
//!
//! Images cannot be turned into text automatically, so the binary is
//! copied unchanged into the reserved `images/` directory next to the
//! input root and a Markdown stub is emitted that embeds it and leaves
//! TODO sections for a human to describe. The copy mirrors the input's
//! relative subpath under `images/`, so same-named images from different
//! subdirectories keep distinct binaries. The stub is recorded as
//! *converted* even though its body needs human input — the reference
//! document itself is complete. (The PDF/DOCX placeholder records
//! "skipped" for conceptually similar incompleteness; that asymmetry
//! matches the original behaviour and is kept.)

use crate::config::ConvertConfig;
use crate::error::FileError;
use crate::report::FileOutcome;
use std::path::Path;
use tracing::info;

/// Render the reference stub for an image copied to `relative_src`.
pub fn reference_document(source: &Path, relative_src: &Path) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!(
        "# Image: {name}\n\
         \n\
         ![{name}]({src})\n\
         \n\
         ## Description\n\
         _TODO: Describe what this diagram or screenshot shows_\n\
         \n\
         ## Key Elements\n\
         - _TODO: List key elements visible in the image_\n",
        src = relative_src.display()
    )
}

/// Copy the image into `images/` and write the reference stub.
pub async fn convert(input: &Path, output: &Path, config: &ConvertConfig) -> FileOutcome {
    let io_err = |detail: String| {
        FileOutcome::Failed(FileError::Io {
            path: input.to_path_buf(),
            detail,
        })
    };

    let Some(file_name) = input.file_name() else {
        return io_err("image has no file name".into());
    };

    // Mirror the relative subpath so sub1/logo.png and sub2/logo.png end up
    // as distinct binaries instead of the later copy clobbering the earlier.
    let rel = input
        .strip_prefix(&config.input_dir)
        .unwrap_or_else(|_| Path::new(file_name));
    let copied = config.images_dir().join(rel);
    if let Some(parent) = copied.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            return io_err(format!("create images dir: {e}"));
        }
    }
    if let Err(e) = tokio::fs::copy(input, &copied).await {
        return io_err(format!("copy image: {e}"));
    }

    // Embed path is relative to the stub's own directory so the document
    // renders wherever the output tree ends up.
    let stub_dir = output.parent().unwrap_or_else(|| Path::new("."));
    let relative_src = super::relative_to(stub_dir, &copied);
    let doc = reference_document(input, &relative_src);

    match super::write_markdown(output, &doc).await {
        Ok(()) => {
            info!("Created image reference: {}", input.display());
            FileOutcome::Converted {
                input: input.to_path_buf(),
                output: output.to_path_buf(),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}
