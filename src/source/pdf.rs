// file: src/source/pdf.rs
// description: PDF text layer extraction backed by pdf-extract
// reference: https://docs.rs/pdf-extract

use crate::error::{PaperError, Result};
use crate::source::TextSource;
use tracing::debug;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Reads the embedded text layer of a digital PDF. Scanned papers without a
/// text layer decode to empty text rather than an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextSource;

impl PdfTextSource {
    pub fn looks_like_pdf(bytes: &[u8]) -> bool {
        // the header may be preceded by a little junk
        bytes
            .windows(PDF_MAGIC.len())
            .take(1024)
            .any(|w| w == PDF_MAGIC)
    }
}

impl TextSource for PdfTextSource {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(PaperError::Decode("document is empty".to_string()));
        }

        if !Self::looks_like_pdf(bytes) {
            return Err(PaperError::Decode(
                "document does not have a PDF header".to_string(),
            ));
        }

        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| PaperError::Decode(e.to_string()))?;

        debug!("Extracted {} chars from {} byte PDF", text.len(), bytes.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a one-page PDF whose content stream draws each line of `lines`.
    fn make_test_pdf(lines: &[&str]) -> Vec<u8> {
        use lopdf::dictionary;
        use lopdf::{Document, Object, Stream};

        let mut doc = Document::with_version("1.4");

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let mut content = String::from("BT /F1 12 Tf 72 720 Td 14 TL ");
        for line in lines {
            content.push_str(&format!("({}) Tj T* ", line));
        }
        content.push_str("ET");

        let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));

        let resources = dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        };

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Contents" => content_id,
            "Resources" => resources,
        });

        let pages_id = doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        });

        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(page_id) {
            dict.set("Parent", pages_id);
        }

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_extracts_text_layer() {
        let pdf = make_test_pdf(&["1. Explain inflation", "2. Define GDP"]);
        let text = PdfTextSource.extract_text(&pdf).unwrap();

        assert!(
            text.contains("Explain") || text.contains("inflation"),
            "unexpected text layer: {text}"
        );
    }

    #[test]
    fn test_empty_bytes_are_decode_failure() {
        let err = PdfTextSource.extract_text(&[]).unwrap_err();
        assert!(matches!(err, PaperError::Decode(_)));
    }

    #[test]
    fn test_non_pdf_bytes_are_decode_failure() {
        let err = PdfTextSource.extract_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, PaperError::Decode(_)));
    }

    #[test]
    fn test_pdf_header_detection() {
        assert!(PdfTextSource::looks_like_pdf(b"%PDF-1.7\n..."));
        assert!(PdfTextSource::looks_like_pdf(b"\r\n%PDF-1.4"));
        assert!(!PdfTextSource::looks_like_pdf(b"PK\x03\x04"));
    }
}
