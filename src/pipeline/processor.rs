// file: src/pipeline/processor.rs
// description: turns an uploaded document into stored questions
// reference: decode -> extract -> persist, each upload independent

use crate::database::PaperRepository;
use crate::error::{PaperError, Result};
use crate::extractor::QuestionExtractor;
use crate::models::{ExtractedQuestion, PaperMetadata, PaperRecord, ParseResponse};
use crate::source::TextSource;
use crate::utils::{OperationTimer, Validator};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

const SLOW_UPLOAD: Duration = Duration::from_secs(10);

pub struct ProcessedUpload {
    pub paper: PaperRecord,
    pub questions: Vec<ExtractedQuestion>,
    pub response: ParseResponse,
}

#[derive(Clone)]
pub struct UploadPipeline {
    source: Arc<dyn TextSource>,
    extractor: QuestionExtractor,
    repository: PaperRepository,
}

impl UploadPipeline {
    pub fn new(source: Arc<dyn TextSource>, repository: PaperRepository) -> Self {
        Self {
            source,
            extractor: QuestionExtractor::new(),
            repository,
        }
    }

    pub fn repository(&self) -> &PaperRepository {
        &self.repository
    }

    /// Decodes the document and splits it into questions without storing
    /// anything.
    pub async fn extract(&self, bytes: Vec<u8>) -> Result<Vec<ExtractedQuestion>> {
        let text = self.decode(bytes).await?;
        if Validator::validate_content_not_empty(&text).is_err() {
            warn!("{} source produced no text; the document may be scanned", self.source.name());
            return Ok(Vec::new());
        }

        let questions = self.extractor.extract(&text);
        if questions.is_empty() {
            warn!(
                "No questions recognised in {} chars of text: {:?}",
                text.len(),
                Validator::truncate_text(text.trim(), 80)
            );
        } else {
            debug!("Extracted {} questions", questions.len());
        }

        Ok(questions)
    }

    pub async fn process(&self, bytes: Vec<u8>, metadata: &PaperMetadata) -> Result<ProcessedUpload> {
        metadata.validate()?;

        let timer = OperationTimer::new("upload");
        let questions = self.extract(bytes).await?;
        timer.checkpoint("text extracted");

        let paper = self
            .repository
            .store_parsed_paper(metadata, &questions)
            .await?;
        timer.warn_if_slow(SLOW_UPLOAD, "extract and store");

        let elapsed = timer.finish_with_count(questions.len());
        let response = ParseResponse::success(paper.id.clone(), questions.len(), elapsed.as_secs_f64());

        info!(
            "Upload {} stored as paper {} ({} questions)",
            metadata.display_title(),
            paper.id,
            questions.len()
        );

        Ok(ProcessedUpload {
            paper,
            questions,
            response,
        })
    }

    // Runs on the blocking pool; a decoder panic comes back as a JoinError.
    async fn decode(&self, bytes: Vec<u8>) -> Result<String> {
        let source = Arc::clone(&self.source);
        let name = source.name();

        tokio::task::spawn_blocking(move || source.extract_text(&bytes))
            .await
            .map_err(|e| PaperError::Decode(format!("{} decoder aborted: {}", name, e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::source::PlainTextSource;

    struct PanickingSource;

    impl TextSource for PanickingSource {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn extract_text(&self, _bytes: &[u8]) -> Result<String> {
            panic!("decoder blew up")
        }
    }

    fn metadata() -> PaperMetadata {
        PaperMetadata::from_json(r#"{"examBoard":"AQA","year":2024,"session":"June","paperNumber":1}"#)
            .unwrap()
    }

    fn pipeline(source: Arc<dyn TextSource>) -> UploadPipeline {
        UploadPipeline::new(source, PaperRepository::new(Arc::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_process_stores_questions() {
        let pipeline = pipeline(Arc::new(PlainTextSource));
        let text = b"Section A\n1. Define inflation. [2 marks]\n2) Explain deflation. (4 marks)\n".to_vec();

        let upload = pipeline.process(text, &metadata()).await.unwrap();
        assert_eq!(upload.response.questions_count, 2);
        assert_eq!(upload.response.status, "success");
        assert_eq!(upload.response.paper_id, upload.paper.id);
        assert!(upload.response.processing_time >= 0.0);

        let tree = pipeline.repository().get_paper(&upload.paper.id).await.unwrap();
        assert_eq!(tree.questions[1].question.marks, Some(4));
    }

    #[tokio::test]
    async fn test_text_without_markers_stores_empty_paper() {
        let pipeline = pipeline(Arc::new(PlainTextSource));
        let upload = pipeline
            .process(b"Cover page only".to_vec(), &metadata())
            .await
            .unwrap();

        assert_eq!(upload.response.questions_count, 0);
        assert_eq!(
            upload.response.message.as_deref(),
            Some("Successfully parsed 0 questions")
        );
    }

    #[tokio::test]
    async fn test_invalid_metadata_rejected_before_decoding() {
        let pipeline = pipeline(Arc::new(PanickingSource));
        let mut meta = metadata();
        meta.paper_number = 9;

        let err = pipeline.process(Vec::new(), &meta).await.err().unwrap();
        assert!(matches!(err, PaperError::Validation(_)));
    }

    #[tokio::test]
    async fn test_decoder_panic_becomes_decode_failure() {
        let pipeline = pipeline(Arc::new(PanickingSource));
        let err = pipeline.extract(b"%PDF-".to_vec()).await.unwrap_err();
        assert!(matches!(err, PaperError::Decode(_)));
    }
}
