// file: src/utils/validation.rs
// description: input validation for uploads, endpoints and server settings
// reference: input validation patterns

use crate::error::{PaperError, Result};

pub struct Validator;

impl Validator {
    /// Uploads are accepted by file name; the check is case-insensitive.
    pub fn validate_pdf_filename(name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PaperError::Validation("No file provided".to_string()));
        }

        if !name.to_ascii_lowercase().ends_with(".pdf") {
            return Err(PaperError::Validation(format!(
                "File must be a PDF: {}",
                name
            )));
        }

        Ok(())
    }

    pub fn validate_upload_size(size: usize, max_bytes: usize) -> Result<()> {
        if size == 0 {
            return Err(PaperError::Validation("Uploaded file is empty".to_string()));
        }

        if size > max_bytes {
            return Err(PaperError::TooLarge(format!(
                "Uploaded file is {} bytes (max {})",
                size, max_bytes
            )));
        }

        Ok(())
    }

    pub fn validate_content_not_empty(content: &str) -> Result<()> {
        if content.trim().is_empty() {
            return Err(PaperError::Validation("Content is empty".to_string()));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(PaperError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(PaperError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    /// Truncates on a char boundary so multi-byte text never splits.
    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }
}
