// file: src/database/memory.rs
// description: in-process paper store for offline runs and tests

use crate::database::PaperStore;
use crate::error::{PaperError, Result};
use crate::models::{ContentRecord, PaperRecord, QuestionRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    papers: HashMap<String, PaperRecord>,
    questions: Vec<QuestionRecord>,
    content: Vec<ContentRecord>,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaperStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_paper(&self, paper: &PaperRecord) -> Result<PaperRecord> {
        let mut tables = self.tables.write().await;
        if tables.papers.contains_key(&paper.id) {
            return Err(PaperError::Persistence(format!(
                "duplicate key: paper {} already exists",
                paper.id
            )));
        }

        debug!("memory store: insert paper {}", paper.id);
        tables.papers.insert(paper.id.clone(), paper.clone());
        Ok(paper.clone())
    }

    async fn insert_question(&self, question: &QuestionRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.papers.contains_key(&question.paper_id) {
            return Err(PaperError::Persistence(format!(
                "foreign key violation: paper {} does not exist",
                question.paper_id
            )));
        }

        tables.questions.push(question.clone());
        Ok(())
    }

    async fn insert_content(&self, content: &ContentRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        if !tables.questions.iter().any(|q| q.id == content.question_id) {
            return Err(PaperError::Persistence(format!(
                "foreign key violation: question {} does not exist",
                content.question_id
            )));
        }

        tables.content.push(content.clone());
        Ok(())
    }

    async fn fetch_paper(&self, paper_id: &str) -> Result<Option<PaperRecord>> {
        Ok(self.tables.read().await.papers.get(paper_id).cloned())
    }

    async fn fetch_questions(&self, paper_id: &str) -> Result<Vec<QuestionRecord>> {
        let tables = self.tables.read().await;
        let mut questions: Vec<QuestionRecord> = tables
            .questions
            .iter()
            .filter(|q| q.paper_id == paper_id)
            .cloned()
            .collect();
        questions.sort_by_key(|q| q.sequence_order);
        Ok(questions)
    }

    async fn fetch_content(&self, question_id: &str) -> Result<Vec<ContentRecord>> {
        let tables = self.tables.read().await;
        let mut content: Vec<ContentRecord> = tables
            .content
            .iter()
            .filter(|c| c.question_id == question_id)
            .cloned()
            .collect();
        content.sort_by_key(|c| c.sequence_order);
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paper(id: &str) -> PaperRecord {
        PaperRecord {
            id: id.to_string(),
            title: "Test".to_string(),
            exam_board: "AQA".to_string(),
            subject: "Economics".to_string(),
            level: "A-Level".to_string(),
            year: 2023,
            session: "June".to_string(),
            paper_number: 1,
            total_marks: None,
            uploaded_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    fn question(id: &str, paper_id: &str, order: u32) -> QuestionRecord {
        QuestionRecord {
            id: id.to_string(),
            paper_id: paper_id.to_string(),
            question_number: (order + 1).to_string(),
            sequence_order: order,
            marks: None,
        }
    }

    #[tokio::test]
    async fn test_questions_come_back_ordered() {
        let store = MemoryStore::new();
        store.insert_paper(&paper("p1")).await.unwrap();
        store.insert_question(&question("q2", "p1", 1)).await.unwrap();
        store.insert_question(&question("q1", "p1", 0)).await.unwrap();

        let questions = store.fetch_questions("p1").await.unwrap();
        let ids: Vec<&str> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q2"]);
    }

    #[tokio::test]
    async fn test_referential_checks() {
        let store = MemoryStore::new();
        assert!(store.insert_question(&question("q1", "missing", 0)).await.is_err());

        let content = ContentRecord::plain_text("c1".into(), "missing".into(), 0, "x");
        assert!(store.insert_content(&content).await.is_err());

        store.insert_paper(&paper("p1")).await.unwrap();
        assert!(store.insert_paper(&paper("p1")).await.is_err());
        assert!(store.fetch_paper("p1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_missing_paper_is_none() {
        let store = MemoryStore::new();
        assert!(store.fetch_paper("nope").await.unwrap().is_none());
        assert!(store.fetch_questions("nope").await.unwrap().is_empty());
    }
}
