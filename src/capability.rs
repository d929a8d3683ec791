//! Optional parsing capabilities, injected at construction time.
//!
//! ## Why traits instead of direct calls?
//!
//! PDF text extraction and DOCX structure parsing are *optional*: when a
//! capability is absent (compiled out, or deliberately withheld in tests)
//! the converter emits the manual-conversion placeholder instead of
//! failing. Modelling each capability as a present-or-absent trait object
//! makes the fallback a first-class branch rather than an exception-driven
//! accident, and lets tests inject deterministic stand-ins without real
//! documents on disk.
//!
//! The built-in implementations are backed by `pdf-extract` and `docx-rs`,
//! each behind an on-by-default cargo feature (`pdf`, `docx`).

use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A capability implementation failed on a specific document.
///
/// Never fatal: the caller degrades to the placeholder path.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct CapabilityError(pub String);

/// "Can extract PDF text, page by page."
pub trait PdfText: Send + Sync {
    /// Extract the text of every page, in page order.
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, CapabilityError>;
}

/// "Can parse DOCX structure into a flat block sequence."
pub trait DocxStructure: Send + Sync {
    /// Parse paragraphs and tables in document order.
    fn parse(&self, path: &Path) -> Result<Vec<DocxBlock>, CapabilityError>;
}

/// A neutral block model decoupling Markdown rendering from the parser.
///
/// The renderer in [`crate::pipeline::docx`] consumes these, so heading and
/// table reconstruction stay testable without a real `.docx` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocxBlock {
    /// One paragraph with its style identifier (e.g. `Heading2`), if any.
    Paragraph {
        style: Option<String>,
        text: String,
    },
    /// One table as rows of plain-text cells; the first row is the header.
    Table { rows: Vec<Vec<String>> },
}

/// The set of capabilities available to a converter run.
///
/// Held in [`crate::config::ConvertConfig`]; either field may be `None`.
#[derive(Clone, Default)]
pub struct Capabilities {
    pub pdf: Option<Arc<dyn PdfText>>,
    pub docx: Option<Arc<dyn DocxStructure>>,
}

impl Capabilities {
    /// The capabilities compiled into this build.
    pub fn detect() -> Self {
        Self {
            #[cfg(feature = "pdf")]
            pdf: Some(Arc::new(PdfExtractText)),
            #[cfg(not(feature = "pdf"))]
            pdf: None,
            #[cfg(feature = "docx")]
            docx: Some(Arc::new(DocxRsStructure)),
            #[cfg(not(feature = "docx"))]
            docx: None,
        }
    }

    /// No capabilities at all — every PDF/DOCX degrades to the placeholder.
    pub fn none() -> Self {
        Self { pdf: None, docx: None }
    }
}

impl std::fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capabilities")
            .field("pdf", &self.pdf.as_ref().map(|_| "<dyn PdfText>"))
            .field("docx", &self.docx.as_ref().map(|_| "<dyn DocxStructure>"))
            .finish()
    }
}

// ── Built-in: pdf-extract ────────────────────────────────────────────────

/// Page-by-page text extraction via the `pdf-extract` crate.
#[cfg(feature = "pdf")]
pub struct PdfExtractText;

#[cfg(feature = "pdf")]
impl PdfText for PdfExtractText {
    fn extract_pages(&self, path: &Path) -> Result<Vec<String>, CapabilityError> {
        pdf_extract::extract_text_by_pages(path)
            .map_err(|e| CapabilityError(format!("pdf-extract: {e}")))
    }
}

// ── Built-in: docx-rs ────────────────────────────────────────────────────

/// DOCX parsing via the `docx-rs` crate, flattened into [`DocxBlock`]s.
#[cfg(feature = "docx")]
pub struct DocxRsStructure;

#[cfg(feature = "docx")]
impl DocxStructure for DocxRsStructure {
    fn parse(&self, path: &Path) -> Result<Vec<DocxBlock>, CapabilityError> {
        let bytes =
            std::fs::read(path).map_err(|e| CapabilityError(format!("read: {e}")))?;
        let docx = docx_rs::read_docx(&bytes)
            .map_err(|e| CapabilityError(format!("docx-rs: {e:?}")))?;

        let mut blocks = Vec::new();
        for child in &docx.document.children {
            match child {
                docx_rs::DocumentChild::Paragraph(p) => {
                    blocks.push(DocxBlock::Paragraph {
                        style: p.property.style.as_ref().map(|s| s.val.clone()),
                        text: paragraph_text(p),
                    });
                }
                docx_rs::DocumentChild::Table(t) => {
                    let rows = table_rows(t);
                    if !rows.is_empty() {
                        blocks.push(DocxBlock::Table { rows });
                    }
                }
                _ => {}
            }
        }
        Ok(blocks)
    }
}

/// Concatenate the plain text of a paragraph's runs.
#[cfg(feature = "docx")]
fn paragraph_text(p: &docx_rs::Paragraph) -> String {
    let mut out = String::new();
    for child in &p.children {
        match child {
            docx_rs::ParagraphChild::Run(run) => push_run_text(run, &mut out),
            docx_rs::ParagraphChild::Hyperlink(link) => {
                for inner in &link.children {
                    if let docx_rs::ParagraphChild::Run(run) = inner {
                        push_run_text(run, &mut out);
                    }
                }
            }
            _ => {}
        }
    }
    out
}

#[cfg(feature = "docx")]
fn push_run_text(run: &docx_rs::Run, out: &mut String) {
    for child in &run.children {
        match child {
            docx_rs::RunChild::Text(t) => out.push_str(&t.text),
            docx_rs::RunChild::Tab(_) => out.push('\t'),
            docx_rs::RunChild::Break(_) => out.push(' '),
            _ => {}
        }
    }
}

/// Flatten a table into rows of joined cell text.
#[cfg(feature = "docx")]
fn table_rows(table: &docx_rs::Table) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for row in &table.rows {
        let docx_rs::TableChild::TableRow(tr) = row;
        let mut cells = Vec::new();
        for cell in &tr.cells {
            let docx_rs::TableRowChild::TableCell(tc) = cell;
            let text: Vec<String> = tc
                .children
                .iter()
                .filter_map(|c| match c {
                    docx_rs::TableCellContent::Paragraph(p) => Some(paragraph_text(p)),
                    _ => None,
                })
                .collect();
            cells.push(text.join(" ").trim().to_string());
        }
        rows.push(cells);
    }
    rows
}
