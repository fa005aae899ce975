//! DocQA Ingest: turns a document on disk into plain text.
//!
//! PDF pages are extracted with `lopdf`, Word documents with `docx-rs` and
//! CSV files with `csv`. Every other extension is read as UTF-8 text.

pub mod file;

pub use file::{DocumentLoader, FileType, LARGE_FILE_THRESHOLD_BYTES, PAGE_SEPARATOR};
