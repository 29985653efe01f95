// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod api;
pub mod config;
pub mod database;
pub mod error;
pub mod exporter;
pub mod extractor;
pub mod models;
pub mod pipeline;
pub mod source;
pub mod utils;
pub mod viewer;

pub use api::{AppState, build_router};
pub use config::{Config, ServerConfig, StoreConfig, UploadConfig, ViewerConfig};
pub use database::{MemoryStore, PaperRepository, PaperStore, SupabaseStore};
pub use error::{PaperError, Result};
pub use exporter::JsonExporter;
pub use extractor::{QuestionExtractor, extract_questions};
pub use models::{
    ContentRecord, ContentType, ExtractedQuestion, PaperMetadata, PaperRecord, PaperTree,
    ParseResponse, QuestionRecord,
};
pub use pipeline::UploadPipeline;
pub use source::{PdfTextSource, PlainTextSource, TextSource, source_for_path};
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, Validator};
pub use viewer::{HtmlViewer, TextViewer};
