// file: src/source/mod.rs
// description: text sources that turn uploaded documents into raw text
// reference: internal module structure

pub mod pdf;
pub mod plain;

pub use pdf::PdfTextSource;
pub use plain::PlainTextSource;

use crate::error::Result;
use std::path::Path;

/// Produces the plain text of an uploaded document.
pub trait TextSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn extract_text(&self, bytes: &[u8]) -> Result<String>;
}

/// Picks a text source from the file extension; anything that is not plain
/// text is treated as a PDF.
pub fn source_for_path(path: &Path) -> Box<dyn TextSource> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("txt") | Some("text") => Box::new(PlainTextSource),
        _ => Box::new(PdfTextSource),
    }
}
