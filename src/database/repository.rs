// file: src/database/repository.rs
// description: writes extracted papers to a store and reads them back as trees
// reference: Paper -> Question -> QuestionContent row layout

use crate::database::PaperStore;
use crate::error::{PaperError, Result};
use crate::models::{
    ContentRecord, ExtractedQuestion, PaperMetadata, PaperRecord, PaperTree, QuestionRecord,
    QuestionTree,
};
use crate::utils::OperationTimer;
use chrono::Utc;
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Cheap to clone; every clone shares the same store handle.
#[derive(Clone)]
pub struct PaperRepository {
    store: Arc<dyn PaperStore>,
}

impl PaperRepository {
    pub fn new(store: Arc<dyn PaperStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn PaperStore> {
        &self.store
    }

    /// Persists the paper row, then one question row and one text content
    /// item per extracted question, in extraction order.
    pub async fn store_parsed_paper(
        &self,
        metadata: &PaperMetadata,
        questions: &[ExtractedQuestion],
    ) -> Result<PaperRecord> {
        let paper = PaperRecord::new(
            Uuid::new_v4().to_string(),
            metadata,
            Utc::now().to_rfc3339(),
        );

        let stored = self.store.insert_paper(&paper).await?;
        debug!("Stored paper row {}", stored.id);

        for question in questions {
            let question_id = Uuid::new_v4().to_string();
            let record = QuestionRecord::from_extracted(question_id.clone(), stored.id.clone(), question);
            self.store.insert_question(&record).await?;

            let content = ContentRecord::plain_text(
                Uuid::new_v4().to_string(),
                question_id,
                0,
                question.content.clone(),
            );
            self.store.insert_content(&content).await?;
        }

        info!(
            "Stored paper {} ({}) with {} questions in {} store",
            stored.id,
            stored.title,
            questions.len(),
            self.store.backend()
        );

        Ok(stored)
    }

    pub async fn get_paper(&self, paper_id: &str) -> Result<PaperTree> {
        let timer = OperationTimer::new("load paper");
        let paper = self
            .store
            .fetch_paper(paper_id)
            .await?
            .ok_or_else(|| PaperError::NotFound(paper_id.to_string()))?;

        let questions = self.store.fetch_questions(paper_id).await?;
        let contents = try_join_all(
            questions
                .iter()
                .map(|question| self.store.fetch_content(&question.id)),
        )
        .await?;

        let questions = questions
            .into_iter()
            .zip(contents)
            .map(|(question, content)| QuestionTree { question, content })
            .collect();

        timer.finish();
        Ok(PaperTree { paper, questions })
    }
}
