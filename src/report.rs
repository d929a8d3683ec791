//! Run report: the three append-only result sequences.
//!
//! Every candidate file produces exactly one [`FileOutcome`], recorded in
//! exactly one of the report's three sequences — except unknown extensions,
//! which are warned about and recorded nowhere. The sequences are the only
//! mutable state of a run and live exactly as long as one
//! [`crate::run::process`] call.

use crate::error::FileError;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Why a file was recorded as skipped rather than converted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// Destination already exists and is newer than the input.
    UpToDate,
    /// Automated conversion was unavailable or failed; a placeholder
    /// document was written instead and a human must finish the job.
    ManualConversion { detail: String },
}

/// One skipped file.
#[derive(Debug, Clone, Serialize)]
pub struct Skip {
    /// The input artifact.
    pub input: PathBuf,
    /// The output document, when one was written (placeholder skips have
    /// one; up-to-date skips point at the pre-existing output).
    pub output: PathBuf,
    pub reason: SkipReason,
}

/// The single outcome of processing one candidate file.
#[derive(Debug, Clone)]
pub enum FileOutcome {
    /// An output artifact was produced (or copied) successfully.
    Converted { input: PathBuf, output: PathBuf },
    /// The file was deliberately not converted; see the reason.
    Skipped(Skip),
    /// Conversion was attempted and failed; the run continues.
    Failed(FileError),
}

/// Totals and detail lists for one converter run.
#[derive(Debug, Default, Clone, Serialize)]
pub struct RunReport {
    /// Output paths of successful conversions and copies, in processing order.
    pub converted: Vec<PathBuf>,
    /// Skipped files with reasons, in processing order.
    pub skipped: Vec<Skip>,
    /// Per-file failures, in processing order.
    pub errors: Vec<FileError>,
}

impl RunReport {
    /// Append one outcome to the matching sequence.
    pub fn record(&mut self, outcome: FileOutcome) {
        match outcome {
            FileOutcome::Converted { output, .. } => self.converted.push(output),
            FileOutcome::Skipped(skip) => self.skipped.push(skip),
            FileOutcome::Failed(err) => self.errors.push(err),
        }
    }

    /// True when nothing landed in the error list. Skips (including
    /// manual-conversion placeholders) do not affect success.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// Output paths of placeholders awaiting manual conversion.
    pub fn manual_conversion_outputs(&self) -> Vec<&Path> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::ManualConversion { .. }))
            .map(|s| s.output.as_path())
            .collect()
    }

    pub fn converted_count(&self) -> usize {
        self.converted.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
