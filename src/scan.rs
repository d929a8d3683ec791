//! Directory scanning and destination-path mapping.
//!
//! The scanner produces the candidate list for one run: regular files under
//! the input root, classified by extension, in deterministic lexical order
//! (traversal order is not contractual, so we pick one and keep it stable
//! for reproducible reports).
//!
//! Excluded up front:
//! - hidden entries (name starts with `.`)
//! - anything under the reserved `images/` subdirectory — those binaries
//!   are outputs of the image referencer, not inputs
//! - in recursive mode, anything under the output root when it is nested
//!   inside the input root (the default layout), so a second run never
//!   re-consumes its own outputs

use crate::classify::FileKind;
use crate::config::{ConvertConfig, CsvMode};
use crate::error::ConvertError;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One file the run will process.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Full path to the input artifact.
    pub path: PathBuf,
    /// Path relative to the input root; mirrored under the output root.
    pub rel: PathBuf,
    /// Extension-based classification.
    pub kind: FileKind,
}

/// Enumerate candidate files under the input root.
pub fn scan(config: &ConvertConfig) -> Result<Vec<Candidate>, ConvertError> {
    let root = &config.input_dir;
    if !root.exists() {
        return Err(ConvertError::InputDirNotFound { path: root.clone() });
    }
    if !root.is_dir() {
        return Err(ConvertError::NotADirectory { path: root.clone() });
    }

    let images_dir = config.images_dir();
    let output_root = config.output_root();

    let mut candidates = Vec::new();
    if config.recursive {
        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| {
                // Never descend into hidden dirs, the images dir, or the
                // output tree; never yield hidden files. Depth 0 is the
                // input root itself and is always kept.
                if e.depth() == 0 {
                    return true;
                }
                if is_hidden(e.path()) {
                    return false;
                }
                let p = e.path();
                p != images_dir.as_path() && p != output_root.as_path()
            });
        for entry in walker {
            let entry = entry.map_err(|e| ConvertError::ScanFailed {
                path: root.clone(),
                detail: e.to_string(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            push_candidate(entry.path(), root, &mut candidates);
        }
    } else {
        let read_dir = std::fs::read_dir(root).map_err(|e| ConvertError::ScanFailed {
            path: root.clone(),
            detail: e.to_string(),
        })?;
        for entry in read_dir {
            let entry = entry.map_err(|e| ConvertError::ScanFailed {
                path: root.clone(),
                detail: e.to_string(),
            })?;
            let path = entry.path();
            if !path.is_file() || is_hidden(&path) {
                continue;
            }
            push_candidate(&path, root, &mut candidates);
        }
    }

    // Lexical order by relative path: deterministic reports regardless of
    // the underlying directory iteration order.
    candidates.sort_by(|a, b| a.rel.cmp(&b.rel));
    debug!("Scan found {} candidate files", candidates.len());
    Ok(candidates)
}

fn push_candidate(path: &Path, root: &Path, out: &mut Vec<Candidate>) {
    let rel = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    out.push(Candidate {
        path: path.to_path_buf(),
        rel,
        kind: FileKind::from_path(path),
    });
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Destination path for a candidate: the relative path mirrored under the
/// output root, with the extension swapped to `.md` for everything that
/// emits a Markdown document. Pass-through copies keep their extension,
/// except CSV in fenced mode, whose output *is* a Markdown document.
pub fn dest_path(config: &ConvertConfig, candidate: &Candidate) -> PathBuf {
    let mirrored = config.output_root().join(&candidate.rel);
    let fenced_csv = candidate.kind == FileKind::PassThrough
        && config.csv_mode == CsvMode::Fenced
        && has_extension(&candidate.path, "csv");
    if candidate.kind.emits_markdown() || fenced_csv {
        mirrored.with_extension("md")
    } else {
        mirrored
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}

/// Up-to-date shortcut: true when `output` exists with a strictly newer
/// modification time than `input`. Any mtime read failure means "not up to
/// date" — reconverting is always safe.
pub fn is_up_to_date(input: &Path, output: &Path) -> bool {
    let (Ok(in_meta), Ok(out_meta)) = (input.metadata(), output.metadata()) else {
        return false;
    };
    match (in_meta.modified(), out_meta.modified()) {
        (Ok(in_time), Ok(out_time)) => out_time > in_time,
        _ => false,
    }
}
