//! # artifact2md
//!
//! Batch-convert a directory of mixed document artifacts into Markdown
//! suitable for downstream text-based tooling.
//!
//! ## Pipeline Overview
//!
//! ```text
//! input dir
//!  │
//!  ├─ 1. Scan      enumerate files (hidden/images/output trees excluded)
//!  ├─ 2. Classify  extension → {pdf, docx, pptx, txt, pass-through, image}
//!  ├─ 3. Convert   per-type converter, capability or external tool
//!  │               └─ degrade to a manual-conversion placeholder when
//!  │                  PDF/DOCX parsing is unavailable or fails
//!  └─ 4. Report    converted / skipped / errored, exit 0 iff no errors
//! ```
//!
//! Files are processed one at a time in lexical order; a per-file failure
//! is recorded and the batch continues. Outputs mirror the input tree's
//! relative structure, with extensions swapped to `.md` (pass-through
//! copies keep theirs).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use artifact2md::{process, ConvertConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConvertConfig::builder("raw-artifacts").build()?;
//!     let report = process(&config).await?;
//!     println!(
//!         "{} converted, {} skipped, {} errors",
//!         report.converted_count(),
//!         report.skipped_count(),
//!         report.error_count()
//!     );
//!     std::process::exit(if report.is_success() { 0 } else { 1 });
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `artifact2md` binary (clap + anyhow + tracing-subscriber) |
//! | `pdf`   | on      | Built-in PDF text extraction (pdf-extract) |
//! | `docx`  | on      | Built-in DOCX structure parsing (docx-rs) |
//!
//! Compiling out `pdf` or `docx` removes the capability: affected files
//! then receive a manual-conversion placeholder instead of failing.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod capability;
pub mod classify;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod run;
pub mod scan;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use capability::{Capabilities, CapabilityError, DocxBlock, DocxStructure, PdfText};
pub use classify::FileKind;
pub use config::{ConvertConfig, ConvertConfigBuilder, CsvMode};
pub use error::{ConvertError, FileError};
pub use report::{FileOutcome, RunReport, Skip, SkipReason};
pub use run::process;
