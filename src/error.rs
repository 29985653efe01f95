// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaperError>;

#[derive(Error, Debug)]
pub enum PaperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The upload is over the configured size limit.
    #[error("Upload too large: {0}")]
    TooLarge(String),

    /// The text source could not turn the uploaded bytes into text.
    #[error("Could not decode document: {0}")]
    Decode(String),

    #[error("Paper {0} not found")]
    NotFound(String),

    /// A write or read against the paper store failed.
    #[error("Paper store error: {0}")]
    Persistence(String),

    /// The viewer was handed an incomplete or inconsistent paper tree.
    #[error("Cannot render paper: {0}")]
    Presentation(String),

    #[error("File operation failed for {path}: {source}")]
    FileOperation {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PaperError {
    /// Short machine-readable label, used in logs and API error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            PaperError::Config(_) => "config",
            PaperError::Validation(_) => "validation",
            PaperError::TooLarge(_) => "too_large",
            PaperError::Decode(_) => "decode_failure",
            PaperError::NotFound(_) => "not_found",
            PaperError::Persistence(_) => "persistence_failure",
            PaperError::Presentation(_) => "presentation_failure",
            PaperError::FileOperation { .. } | PaperError::Io(_) => "io",
            PaperError::Serialization(_) => "serialization",
        }
    }
}
