//! End-to-end integration tests for artifact2md.
//!
//! Every scenario runs against a fresh `TempDir` with injected parsing
//! capabilities, so no external tool and no real PDF/DOCX files are needed
//! and the suite is deterministic in CI.

use artifact2md::{
    process, Capabilities, CapabilityError, ConvertConfig, CsvMode, DocxBlock, DocxStructure,
    FileError, PdfText, SkipReason,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

// ── Test capabilities ─────────────────────────────────────────────────────────

/// Extractor returning fixed page texts regardless of input.
struct StaticPdf(Vec<&'static str>);
impl PdfText for StaticPdf {
    fn extract_pages(&self, _: &Path) -> Result<Vec<String>, CapabilityError> {
        Ok(self.0.iter().map(|s| s.to_string()).collect())
    }
}

/// Extractor that always fails, driving the placeholder path.
struct BrokenPdf;
impl PdfText for BrokenPdf {
    fn extract_pages(&self, _: &Path) -> Result<Vec<String>, CapabilityError> {
        Err(CapabilityError("simulated extraction failure".into()))
    }
}

/// Parser returning a fixed block sequence regardless of input.
struct StaticDocx(Vec<DocxBlock>);
impl DocxStructure for StaticDocx {
    fn parse(&self, _: &Path) -> Result<Vec<DocxBlock>, CapabilityError> {
        Ok(self.0.clone())
    }
}

fn caps_with_pdf(pages: Vec<&'static str>) -> Capabilities {
    Capabilities {
        pdf: Some(Arc::new(StaticPdf(pages))),
        docx: None,
    }
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).unwrap();
}

fn config(dir: &TempDir, caps: Capabilities) -> ConvertConfig {
    ConvertConfig::builder(dir.path())
        .capabilities(caps)
        .build()
        .unwrap()
}

// ── Mixed-directory scenario ─────────────────────────────────────────────────

#[tokio::test]
async fn mixed_directory_counts_and_outputs() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "report.pdf", b"%PDF-fake");
    write(dir.path(), "notes.txt", b"meeting notes\n");
    write(dir.path(), "data.csv", b"a,b\n1,2\n");
    write(dir.path(), "logo.png", &[0x89, b'P', b'N', b'G']);
    write(dir.path(), "weird.xyz", b"???");

    let report = process(&config(&dir, caps_with_pdf(vec!["page one"])))
        .await
        .unwrap();

    // Four tracked outcomes, the unknown file in none of them.
    assert_eq!(report.converted_count() + report.skipped_count(), 4);
    assert_eq!(report.converted_count(), 4, "pdf extractor was available");
    assert_eq!(report.error_count(), 0);
    assert!(report.is_success());

    let out = dir.path().join("converted");
    assert!(out.join("report.md").exists());
    assert!(out.join("notes.md").exists());
    assert!(out.join("data.csv").exists());
    assert!(out.join("logo.md").exists());
    // Unknown type: warned, no output artifact.
    assert!(!out.join("weird.md").exists());
    assert!(!out.join("weird.xyz").exists());
}

#[tokio::test]
async fn pdf_without_extractor_is_skipped_with_placeholder() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "report.pdf", b"%PDF-fake");

    let report = process(&config(&dir, Capabilities::none())).await.unwrap();

    assert_eq!(report.converted_count(), 0);
    assert_eq!(report.skipped_count(), 1);
    assert!(report.is_success(), "placeholder skips never fail the run");

    let doc = std::fs::read_to_string(dir.path().join("converted/report.md")).unwrap();
    assert!(doc.contains("# Conversion Required: report.pdf"));
    assert!(doc.contains("Delete this notice"));

    let manual = report.manual_conversion_outputs();
    assert_eq!(manual.len(), 1);
    assert!(manual[0].ends_with("converted/report.md"));
}

#[tokio::test]
async fn failing_extractor_also_degrades_to_placeholder() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "report.pdf", b"%PDF-fake");

    let caps = Capabilities {
        pdf: Some(Arc::new(BrokenPdf)),
        docx: None,
    };
    let report = process(&config(&dir, caps)).await.unwrap();

    assert_eq!(report.skipped_count(), 1);
    assert!(report.is_success());
    let skip = &report.skipped[0];
    match &skip.reason {
        SkipReason::ManualConversion { detail } => {
            assert!(detail.contains("simulated extraction failure"))
        }
        other => panic!("expected manual conversion, got {other:?}"),
    }
}

// ── Up-to-date shortcut ──────────────────────────────────────────────────────

#[tokio::test]
async fn rerun_skips_up_to_date_outputs_byte_identically() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.txt", b"stable content\n");

    let cfg = config(&dir, Capabilities::none());
    let first = process(&cfg).await.unwrap();
    assert_eq!(first.converted_count(), 1);

    let out_path = dir.path().join("converted/notes.md");
    let before = std::fs::read(&out_path).unwrap();

    // mtime comparison needs the output to be strictly newer.
    std::thread::sleep(std::time::Duration::from_millis(20));

    let second = process(&cfg).await.unwrap();
    assert_eq!(second.converted_count(), 0);
    assert_eq!(second.skipped_count(), 1);
    assert_eq!(second.skipped[0].reason, SkipReason::UpToDate);
    assert_eq!(std::fs::read(&out_path).unwrap(), before);
}

#[tokio::test]
async fn force_disables_the_shortcut() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "notes.txt", b"content\n");

    let cfg = ConvertConfig::builder(dir.path())
        .incremental(false)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();

    process(&cfg).await.unwrap();
    std::thread::sleep(std::time::Duration::from_millis(20));
    let second = process(&cfg).await.unwrap();
    assert_eq!(second.converted_count(), 1, "reconverted despite fresh output");
    assert_eq!(second.skipped_count(), 0);
}

// ── Per-type output shape ────────────────────────────────────────────────────

#[tokio::test]
async fn pdf_document_has_page_sections() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "paper.pdf", b"%PDF-fake");

    let report = process(&config(&dir, caps_with_pdf(vec!["alpha", "beta"])))
        .await
        .unwrap();
    assert_eq!(report.converted_count(), 1);

    let doc = std::fs::read_to_string(dir.path().join("converted/paper.md")).unwrap();
    assert!(doc.contains("source: \"paper.pdf\""));
    assert!(doc.contains("## Page 1\n\nalpha"));
    assert!(doc.contains("## Page 2\n\nbeta"));
}

#[tokio::test]
async fn docx_headings_and_tables_reconstructed() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "spec.docx", b"fake");

    let caps = Capabilities {
        pdf: None,
        docx: Some(Arc::new(StaticDocx(vec![
            DocxBlock::Paragraph {
                style: Some("Heading2".into()),
                text: "Scope".into(),
            },
            DocxBlock::Paragraph {
                style: None,
                text: "All of it.".into(),
            },
            DocxBlock::Table {
                rows: vec![
                    vec!["K".into(), "V".into()],
                    vec!["a".into(), "1".into()],
                ],
            },
        ]))),
    };
    let report = process(&config(&dir, caps)).await.unwrap();
    assert_eq!(report.converted_count(), 1);

    let doc = std::fs::read_to_string(dir.path().join("converted/spec.md")).unwrap();
    assert!(doc.contains("## Scope\n"));
    assert!(doc.contains("All of it.\n"));
    assert!(doc.contains("| K | V |\n| --- | --- |\n| a | 1 |"));
}

#[tokio::test]
async fn fenced_csv_mode_emits_markdown_document() {
    let dir = TempDir::new().unwrap();
    let content = "id,name\n1,ada\n";
    write(dir.path(), "data.csv", content.as_bytes());

    let cfg = ConvertConfig::builder(dir.path())
        .csv_mode(CsvMode::Fenced)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();
    let report = process(&cfg).await.unwrap();
    assert_eq!(report.converted_count(), 1);

    let out = dir.path().join("converted/data.md");
    assert!(out.exists());
    assert!(!dir.path().join("converted/data.csv").exists());
    let doc = std::fs::read_to_string(&out).unwrap();
    assert!(doc.contains(&format!("```csv\n{content}```")));
}

#[tokio::test]
async fn image_reference_and_binary_copy() {
    let dir = TempDir::new().unwrap();
    let bytes = [0x89, b'P', b'N', b'G', 0x0D, 0x0A];
    write(dir.path(), "diagram.png", &bytes);

    let report = process(&config(&dir, Capabilities::none())).await.unwrap();
    assert_eq!(report.converted_count(), 1, "image stubs count as converted");

    let doc = std::fs::read_to_string(dir.path().join("converted/diagram.md")).unwrap();
    assert!(doc.contains("images/diagram.png)"), "got:\n{doc}");
    assert_eq!(
        std::fs::read(dir.path().join("images/diagram.png")).unwrap(),
        bytes
    );
}

// ── Recursive mode ───────────────────────────────────────────────────────────

#[tokio::test]
async fn recursive_mode_mirrors_subdirectories() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("chapter1")).unwrap();
    write(dir.path(), "intro.txt", b"top\n");
    write(&dir.path().join("chapter1"), "body.txt", b"nested\n");

    let cfg = ConvertConfig::builder(dir.path())
        .recursive(true)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();
    let report = process(&cfg).await.unwrap();

    assert_eq!(report.converted_count(), 2);
    assert!(dir.path().join("converted/intro.md").exists());
    assert!(dir.path().join("converted/chapter1/body.md").exists());
}

#[tokio::test]
async fn recursive_same_named_images_keep_distinct_binaries() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("sub1")).unwrap();
    std::fs::create_dir_all(dir.path().join("sub2")).unwrap();
    write(&dir.path().join("sub1"), "logo.png", b"FIRST-BINARY");
    write(&dir.path().join("sub2"), "logo.png", b"SECOND-BINARY");

    let cfg = ConvertConfig::builder(dir.path())
        .recursive(true)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();
    let report = process(&cfg).await.unwrap();

    assert_eq!(report.converted_count(), 2);
    assert_eq!(report.error_count(), 0);

    // Both binaries survive, byte-identical, under mirrored subpaths.
    assert_eq!(
        std::fs::read(dir.path().join("images/sub1/logo.png")).unwrap(),
        b"FIRST-BINARY"
    );
    assert_eq!(
        std::fs::read(dir.path().join("images/sub2/logo.png")).unwrap(),
        b"SECOND-BINARY"
    );

    // Each stub points at its own copy.
    let doc1 = std::fs::read_to_string(dir.path().join("converted/sub1/logo.md")).unwrap();
    let doc2 = std::fs::read_to_string(dir.path().join("converted/sub2/logo.md")).unwrap();
    assert!(doc1.contains("images/sub1/logo.png)"), "got:\n{doc1}");
    assert!(doc2.contains("images/sub2/logo.png)"), "got:\n{doc2}");
}

#[tokio::test]
async fn recursive_rerun_does_not_consume_its_own_outputs() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", b"one\n");

    let cfg = ConvertConfig::builder(dir.path())
        .recursive(true)
        .incremental(false)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();

    process(&cfg).await.unwrap();
    let second = process(&cfg).await.unwrap();
    // Only the original input, never converted/a.md from the first run.
    assert_eq!(second.converted_count(), 1);
}

// ── Error accounting ─────────────────────────────────────────────────────────

#[tokio::test]
async fn pptx_with_missing_tool_lands_in_errors() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.pptx", b"fake");
    write(dir.path(), "notes.txt", b"still processed\n");

    let cfg = ConvertConfig::builder(dir.path())
        .tool_program("no-such-conversion-tool-on-any-path")
        .capabilities(Capabilities::none())
        .build()
        .unwrap();
    let report = process(&cfg).await.unwrap();

    assert_eq!(report.error_count(), 1);
    assert!(!report.is_success());
    // The failure did not abort the batch.
    assert_eq!(report.converted_count(), 1);
    assert!(dir.path().join("converted/notes.md").exists());
}

#[cfg(unix)]
#[tokio::test]
async fn pptx_tool_timeout_is_a_recorded_error_and_batch_continues() {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().unwrap();
    write(dir.path(), "deck.pptx", b"fake");
    write(dir.path(), "notes.txt", b"still processed\n");

    // A stand-in tool that never finishes within the timeout.
    let tool = dir.path().join("slow-tool.sh");
    std::fs::write(&tool, "#!/bin/sh\nsleep 30\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let cfg = ConvertConfig::builder(dir.path())
        .tool_program(tool.to_str().unwrap())
        .tool_timeout_secs(1)
        .capabilities(Capabilities::none())
        .build()
        .unwrap();
    let report = process(&cfg).await.unwrap();

    assert_eq!(report.error_count(), 1);
    match &report.errors[0] {
        FileError::ToolTimeout { secs, path } => {
            assert_eq!(*secs, 1);
            assert!(path.ends_with("deck.pptx"));
        }
        other => panic!("expected ToolTimeout, got {other:?}"),
    }
    // Timed out, not crashed: the rest of the batch still ran.
    assert_eq!(report.converted_count(), 1);
    assert!(dir.path().join("converted/notes.md").exists());
    assert!(!dir.path().join("converted/deck.md").exists());
}
