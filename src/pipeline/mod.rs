//! Per-type converters and their shared plumbing.
//!
//! Each submodule implements exactly one artifact type. Keeping them
//! separate makes each independently testable and keeps the dispatch in
//! [`crate::run`] a flat match over [`crate::classify::FileKind`].
//!
//! ## Data Flow
//!
//! ```text
//! candidate ──▶ pdf / docx ──▶ capability or placeholder
//!           ──▶ pptx        ──▶ external tool + slide rewrite
//!           ──▶ txt         ──▶ encoding ladder
//!           ──▶ passthrough ──▶ copy or CSV fence
//!           ──▶ image       ──▶ binary copy + reference stub
//! ```
//!
//! Every converter returns one [`crate::report::FileOutcome`] and never
//! aborts the batch.

pub mod docx;
pub mod image;
pub mod passthrough;
pub mod pdf;
pub mod placeholder;
pub mod pptx;
pub mod txt;

use crate::error::FileError;
use chrono::{SecondsFormat, Utc};
use std::path::Path;

/// YAML front-matter header carried by every structured conversion:
/// source filename, declared type, UTC conversion timestamp.
pub fn front_matter(source: &Path, kind_label: &str) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!(
        "---\nsource: \"{}\"\ntype: {}\nconverted: {}\n---\n\n",
        name,
        kind_label,
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}

/// Write a Markdown document atomically (temp file + rename) so a crash
/// mid-write never leaves a truncated output that a later incremental run
/// would treat as up to date.
pub async fn write_markdown(path: &Path, content: &str) -> Result<(), FileError> {
    let io_err = |e: std::io::Error| FileError::Io {
        path: path.to_path_buf(),
        detail: e.to_string(),
    };

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    let tmp_path = path.with_extension("md.tmp");
    tokio::fs::write(&tmp_path, content).await.map_err(io_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(io_err)
}

/// Relative path from `from_dir` to `to`, built from the longest common
/// prefix. Both paths must share a root for the result to be meaningful;
/// when they do not, `to` is returned as-is.
pub fn relative_to(from_dir: &Path, to: &Path) -> std::path::PathBuf {
    let from: Vec<_> = from_dir.components().collect();
    let to_parts: Vec<_> = to.components().collect();

    let common = from
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 && from_dir.is_absolute() != to.is_absolute() {
        return to.to_path_buf();
    }

    let mut rel = std::path::PathBuf::new();
    for _ in common..from.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part);
    }
    rel
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn front_matter_names_source_and_type() {
        let fm = front_matter(Path::new("/data/report.pdf"), "PDF");
        assert!(fm.starts_with("---\n"));
        assert!(fm.contains("source: \"report.pdf\""));
        assert!(fm.contains("type: PDF"));
        assert!(fm.contains("converted: "));
        assert!(fm.ends_with("---\n\n"));
    }

    #[test]
    fn relative_to_sibling_directory() {
        let rel = relative_to(
            Path::new("/in/converted"),
            Path::new("/in/images/logo.png"),
        );
        assert_eq!(rel, PathBuf::from("../images/logo.png"));
    }

    #[test]
    fn relative_to_nested_output() {
        let rel = relative_to(
            Path::new("/in/converted/sub"),
            Path::new("/in/images/logo.png"),
        );
        assert_eq!(rel, PathBuf::from("../../images/logo.png"));
    }

    #[test]
    fn relative_to_same_directory() {
        let rel = relative_to(Path::new("/a/b"), Path::new("/a/b/x.png"));
        assert_eq!(rel, PathBuf::from("x.png"));
    }

    #[tokio::test]
    async fn write_markdown_creates_parents_and_is_complete() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/out.md");
        write_markdown(&path, "# hello\n").await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# hello\n");
        // No temp file left behind.
        assert!(!path.with_extension("md.tmp").exists());
    }
}
