// file: src/database/mod.rs
// description: paper store abstraction and backends
// reference: internal module structure

pub mod client;
pub mod memory;
pub mod repository;

pub use client::SupabaseStore;
pub use memory::MemoryStore;
pub use repository::PaperRepository;

use crate::error::Result;
use crate::models::{ContentRecord, PaperRecord, QuestionRecord};
use async_trait::async_trait;

/// Row-level access to the `Paper`, `Question` and `QuestionContent` tables.
///
/// Fetches of questions and content come back ordered by `sequence_order`.
#[async_trait]
pub trait PaperStore: Send + Sync {
    fn backend(&self) -> &'static str;

    async fn ping(&self) -> Result<()>;

    async fn insert_paper(&self, paper: &PaperRecord) -> Result<PaperRecord>;

    async fn insert_question(&self, question: &QuestionRecord) -> Result<()>;

    async fn insert_content(&self, content: &ContentRecord) -> Result<()>;

    async fn fetch_paper(&self, paper_id: &str) -> Result<Option<PaperRecord>>;

    async fn fetch_questions(&self, paper_id: &str) -> Result<Vec<QuestionRecord>>;

    async fn fetch_content(&self, question_id: &str) -> Result<Vec<ContentRecord>>;
}
