//! Extension-based artifact classification.
//!
//! Classification is extension-only and case-insensitive — no content
//! sniffing. The original dispatch was a map of suffix → handler function;
//! here it is a tagged enum resolved by one pure lookup so the converter
//! loop is a single exhaustive `match` and the mapping is independently
//! testable.
//!
//! [`FileKind::Unknown`] is deliberately a fourth state outside the three
//! result sequences: unknown files are warned about and then untracked —
//! neither converted, nor skipped, nor errored. The summary counts depend
//! on that distinction.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do with an artifact, decided purely from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// Page-by-page text extraction via the PDF capability.
    Pdf,
    /// Paragraph/heading/table reconstruction via the DOCX capability.
    Docx,
    /// External tool conversion with slide-boundary rewriting.
    Pptx,
    /// Encoding-tolerant plain-text wrap.
    Txt,
    /// Copied as-is (md, csv, json, yml, yaml); CSV may be fenced instead.
    PassThrough,
    /// Copied into `images/` and referenced from a stub document.
    Image,
    /// Unrecognised extension: warn and leave untracked.
    Unknown,
}

impl FileKind {
    /// Classify a path by its (lower-cased) extension.
    pub fn from_path(path: &Path) -> FileKind {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => classify(&ext.to_ascii_lowercase()),
            None => FileKind::Unknown,
        }
    }

    /// Whether this kind produces a Markdown document (as opposed to a
    /// verbatim copy or nothing at all).
    pub fn emits_markdown(self) -> bool {
        !matches!(self, FileKind::PassThrough | FileKind::Unknown)
    }

    /// Human-readable label used in log lines and placeholder documents.
    pub fn label(self) -> &'static str {
        match self {
            FileKind::Pdf => "PDF",
            FileKind::Docx => "DOCX",
            FileKind::Pptx => "PPTX",
            FileKind::Txt => "TXT",
            FileKind::PassThrough => "pass-through",
            FileKind::Image => "image",
            FileKind::Unknown => "unknown",
        }
    }
}

/// Pure mapping from a lower-cased extension (without the dot) to behaviour.
pub fn classify(ext: &str) -> FileKind {
    match ext {
        "pdf" => FileKind::Pdf,
        "docx" => FileKind::Docx,
        "pptx" => FileKind::Pptx,
        "txt" => FileKind::Txt,
        "md" | "csv" | "json" | "yml" | "yaml" => FileKind::PassThrough,
        "png" | "jpg" | "jpeg" | "gif" | "bmp" => FileKind::Image,
        _ => FileKind::Unknown,
    }
}
