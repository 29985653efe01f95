// file: src/source/plain.rs
// description: pass-through text source for documents that are already text

use crate::error::Result;
use crate::source::TextSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextSource;

impl TextSource for PlainTextSource {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}
