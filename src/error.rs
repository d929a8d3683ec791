//! Error types for the artifact2md library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`ConvertError`] — **Fatal**: the batch cannot proceed at all (input
//!   directory missing, output root cannot be created, invalid
//!   configuration). Returned as `Err(ConvertError)` from
//!   [`crate::run::process`].
//!
//! * [`FileError`] — **Non-fatal**: a single file failed (conversion tool
//!   missing, tool timed out, write failed) but the rest of the batch is
//!   fine. Appended to [`crate::report::RunReport::errors`] so callers can
//!   inspect partial success rather than losing the whole run to one bad
//!   artifact.
//!
//! A third category exists that is *neither*: a structured converter that
//! degrades to the manual-conversion placeholder records a skip, not an
//! error. See [`crate::report::SkipReason`].

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the artifact2md library.
///
/// Per-file failures use [`FileError`] and are stored in
/// [`crate::report::RunReport`] rather than propagated here.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Input directory was not found at the given path.
    #[error("Input directory not found: '{path}'\nCheck the path exists and is readable.")]
    InputDirNotFound { path: PathBuf },

    /// The input path exists but is not a directory.
    #[error("Input path '{path}' is not a directory")]
    NotADirectory { path: PathBuf },

    /// Could not create the output root directory. This is the one
    /// filesystem failure the run does not survive.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Directory traversal failed below the input root.
    #[error("Failed to scan '{path}': {detail}")]
    ScanFailed { path: PathBuf, detail: String },

    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A non-fatal error for a single artifact.
///
/// Recorded in the run report's error list; the batch continues with the
/// next file. Any entry here makes the overall run report failure
/// (nonzero exit from the CLI).
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum FileError {
    /// The external conversion tool is not installed or not on PATH.
    #[error("{}: conversion tool '{tool}' not found: {detail}", path.display())]
    ToolMissing {
        path: PathBuf,
        tool: String,
        detail: String,
    },

    /// The external conversion tool ran but exited nonzero.
    #[error("{}: conversion tool failed: {detail}", path.display())]
    ToolFailed { path: PathBuf, detail: String },

    /// The external conversion tool exceeded the configured timeout.
    /// No retry is performed; a single failed attempt is final.
    #[error("{}: conversion tool timed out after {secs}s", path.display())]
    ToolTimeout { path: PathBuf, secs: u64 },

    /// Reading the input or writing the output failed.
    #[error("{}: {detail}", path.display())]
    Io { path: PathBuf, detail: String },
}

impl FileError {
    /// The input artifact this error belongs to.
    pub fn path(&self) -> &PathBuf {
        match self {
            FileError::ToolMissing { path, .. }
            | FileError::ToolFailed { path, .. }
            | FileError::ToolTimeout { path, .. }
            | FileError::Io { path, .. } => path,
        }
    }
}
