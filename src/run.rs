//! The batch orchestrator: scan, classify, dispatch, record.
//!
//! Files are processed strictly one at a time in lexical order. The three
//! result sequences in [`RunReport`] are the only mutable state, owned by
//! this function for the duration of one call. A per-file failure never
//! aborts the batch; the only fatal errors are the input directory missing
//! and the output root being uncreatable.

use crate::classify::FileKind;
use crate::config::ConvertConfig;
use crate::error::{ConvertError, FileError};
use crate::report::{FileOutcome, RunReport, Skip, SkipReason};
use crate::{pipeline, scan};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Process every candidate file under the configured input root.
///
/// Returns `Ok(RunReport)` even when individual files failed — check
/// [`RunReport::is_success`]. Returns `Err(ConvertError)` only for fatal
/// setup problems.
pub async fn process(config: &ConvertConfig) -> Result<RunReport, ConvertError> {
    let start = Instant::now();
    info!("Scanning: {}", config.input_dir.display());

    let candidates = scan::scan(config)?;

    let output_root = config.output_root();
    tokio::fs::create_dir_all(&output_root)
        .await
        .map_err(|e| ConvertError::OutputDirFailed {
            path: output_root.clone(),
            source: e,
        })?;

    let mut report = RunReport::default();

    for candidate in &candidates {
        // Unknown extensions are warned about and tracked nowhere: not
        // converted, not skipped, not errored.
        if candidate.kind == FileKind::Unknown {
            warn!("Unknown type: {}", candidate.path.display());
            continue;
        }

        let dest = scan::dest_path(config, candidate);

        if config.incremental && scan::is_up_to_date(&candidate.path, &dest) {
            info!("Skipped (up-to-date): {}", candidate.path.display());
            report.record(FileOutcome::Skipped(Skip {
                input: candidate.path.clone(),
                output: dest,
                reason: SkipReason::UpToDate,
            }));
            continue;
        }

        if let Some(parent) = dest.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                report.record(FileOutcome::Failed(FileError::Io {
                    path: candidate.path.clone(),
                    detail: format!("create dir: {e}"),
                }));
                continue;
            }
        }

        debug!(
            "Converting {} ({}) -> {}",
            candidate.path.display(),
            candidate.kind.label(),
            dest.display()
        );

        let outcome = match candidate.kind {
            FileKind::Pdf => {
                pipeline::pdf::convert(&candidate.path, &dest, config.capabilities.pdf.as_ref())
                    .await
            }
            FileKind::Docx => {
                pipeline::docx::convert(
                    &candidate.path,
                    &dest,
                    config.capabilities.docx.as_ref(),
                )
                .await
            }
            FileKind::Pptx => pipeline::pptx::convert(&candidate.path, &dest, config).await,
            FileKind::Txt => pipeline::txt::convert(&candidate.path, &dest).await,
            FileKind::PassThrough => {
                pipeline::passthrough::convert(&candidate.path, &dest, config).await
            }
            FileKind::Image => pipeline::image::convert(&candidate.path, &dest, config).await,
            FileKind::Unknown => unreachable!("unknown kinds are filtered above"),
        };

        if let FileOutcome::Failed(ref e) = outcome {
            warn!("Failed: {e}");
        }
        report.record(outcome);
    }

    info!(
        "Conversion complete in {}ms: {} converted, {} skipped, {} errors",
        start.elapsed().as_millis(),
        report.converted_count(),
        report.skipped_count(),
        report.error_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::Capabilities;

    #[tokio::test]
    async fn missing_input_dir_is_fatal() {
        let config = ConvertConfig::builder("/no/such/input")
            .capabilities(Capabilities::none())
            .build()
            .unwrap();
        let err = process(&config).await.unwrap_err();
        assert!(matches!(err, ConvertError::InputDirNotFound { .. }));
    }

    #[tokio::test]
    async fn empty_directory_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConvertConfig::builder(dir.path())
            .capabilities(Capabilities::none())
            .build()
            .unwrap();
        let report = process(&config).await.unwrap();
        assert_eq!(report.converted_count(), 0);
        assert_eq!(report.skipped_count(), 0);
        assert!(report.is_success());
    }
}
