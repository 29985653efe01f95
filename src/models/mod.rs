// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod content;
pub mod paper;
pub mod question;
pub mod response;

pub use content::{ContentRecord, ContentType};
pub use paper::{PaperMetadata, PaperRecord, PaperTree, QuestionTree};
pub use question::{ExtractedQuestion, QuestionNumber, QuestionRecord};
pub use response::{HealthResponse, ParseResponse};
