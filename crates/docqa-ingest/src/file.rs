//! File text extraction for the supported document formats.

use std::path::Path;

use docqa_core::{Error, Result};
use tracing::{debug, warn};

/// Plain-text files above this size trigger an advisory log event.
pub const LARGE_FILE_THRESHOLD_BYTES: u64 = 1_000_000;

/// Separator placed between extracted PDF pages.
pub const PAGE_SEPARATOR: &str = "\n\n---\n\n";

/// Supported file types for text extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Csv,
    /// Anything else is read verbatim as UTF-8.
    PlainText,
}

impl FileType {
    /// Detect file type from extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "csv" => Self::Csv,
            _ => Self::PlainText,
        }
    }

    /// Detect file type from a path.
    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(path.extension().and_then(|e| e.to_str()).unwrap_or(""))
    }
}

/// Lowercased extension including the leading dot, or empty when absent.
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default()
}

/// Loads documents from disk into plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLoader;

impl DocumentLoader {
    pub fn new() -> Self {
        Self
    }

    /// Extract the text content of `path`.
    ///
    /// Any failure is reported as [`Error::Load`] naming the path and extension.
    pub fn load(&self, path: &Path) -> Result<String> {
        let extension = dotted_extension(path);
        let file_type = FileType::from_path(path);
        debug!("Loading {} as {:?}", path.display(), file_type);

        let extracted = match file_type {
            FileType::Pdf => extract_pdf(path),
            FileType::Docx => extract_docx(path),
            FileType::Csv => extract_csv(path),
            FileType::PlainText => extract_plain_text(path),
        };

        extracted.map_err(|source| Error::load(path, extension, source))
    }
}

type Extracted = std::result::Result<String, docqa_core::BoxError>;

fn extract_pdf(path: &Path) -> Extracted {
    let doc = lopdf::Document::load(path)?;
    let mut pages = Vec::new();
    for page_number in doc.get_pages().keys() {
        pages.push(doc.extract_text(&[*page_number])?);
    }
    debug!("Extracted {} PDF pages from {}", pages.len(), path.display());
    Ok(join_pdf_pages(&pages))
}

/// Prefix each page with a `[Page N]` marker and join with [`PAGE_SEPARATOR`].
pub fn join_pdf_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .enumerate()
        .map(|(i, page)| format!("[Page {}]\n{}", i + 1, page.as_ref().trim()))
        .collect::<Vec<_>>()
        .join(PAGE_SEPARATOR)
}

/// Trim each section, drop empty ones, and join with blank lines.
pub fn join_sections<I, S>(sections: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sections
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn extract_docx(path: &Path) -> Extracted {
    let bytes = std::fs::read(path)?;
    let docx = docx_rs::read_docx(&bytes)?;

    let paragraphs = docx.document.children.iter().filter_map(|child| match child {
        docx_rs::DocumentChild::Paragraph(p) => Some(paragraph_text(p)),
        _ => None,
    });

    Ok(join_sections(paragraphs))
}

fn paragraph_text(paragraph: &docx_rs::Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                if let docx_rs::RunChild::Text(t) = run_child {
                    text.push_str(&t.text);
                }
            }
        }
    }
    text
}

fn extract_csv(path: &Path) -> Extracted {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // Rows made only of blank cells carry nothing.
        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::trim).collect::<Vec<_>>().join(","));
    }

    Ok(join_sections(rows))
}

fn extract_plain_text(path: &Path) -> Extracted {
    let size = std::fs::metadata(path)?.len();
    let raw = std::fs::read(path)?;

    if size > LARGE_FILE_THRESHOLD_BYTES {
        warn!(
            "Large file loaded: {} ({:.2}MB)",
            path.display(),
            size as f64 / 1_000_000.0
        );
    }

    Ok(String::from_utf8_lossy(&raw).trim().to_string())
}
