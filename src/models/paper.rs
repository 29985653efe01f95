// file: src/models/paper.rs
// description: paper metadata, stored paper rows, and the hydrated paper tree
// reference: internal data structures

use crate::error::{PaperError, Result};
use crate::models::content::ContentRecord;
use crate::models::question::QuestionRecord;
use serde::{Deserialize, Serialize};

const MIN_YEAR: i32 = 2000;
const MAX_YEAR: i32 = 2030;
const MAX_PAPER_NUMBER: u8 = 3;

fn default_subject() -> String {
    "Economics".to_string()
}

fn default_level() -> String {
    "A-Level".to_string()
}

/// Descriptive fields supplied alongside an uploaded paper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperMetadata {
    #[serde(alias = "exam_board")]
    pub exam_board: String,
    #[serde(default = "default_subject")]
    pub subject: String,
    #[serde(default = "default_level")]
    pub level: String,
    pub year: i32,
    pub session: String,
    #[serde(alias = "paper_number")]
    pub paper_number: u8,
    #[serde(default, alias = "total_marks")]
    pub total_marks: Option<u32>,
    #[serde(default)]
    pub title: Option<String>,
}

impl PaperMetadata {
    pub fn from_json(raw: &str) -> Result<Self> {
        let metadata: PaperMetadata = serde_json::from_str(raw)
            .map_err(|e| PaperError::Validation(format!("Invalid metadata: {}", e)))?;
        metadata.validate()?;
        Ok(metadata)
    }

    /// Like [`PaperMetadata::from_json`], but a missing, null or blank
    /// `subject` or `level` takes the supplied value.
    pub fn from_json_with_defaults(raw: &str, subject: &str, level: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(raw)
            .map_err(|e| PaperError::Validation(format!("Invalid metadata: {}", e)))?;

        let fields = value.as_object_mut().ok_or_else(|| {
            PaperError::Validation("Invalid metadata: expected a JSON object".to_string())
        })?;
        for (key, fallback) in [("subject", subject), ("level", level)] {
            let blank = fields
                .get(key)
                .is_none_or(|v| v.is_null() || v.as_str().is_some_and(|s| s.trim().is_empty()));
            if blank {
                fields.insert(key.to_string(), serde_json::Value::from(fallback));
            }
        }

        let metadata: PaperMetadata = serde_json::from_value(value)
            .map_err(|e| PaperError::Validation(format!("Invalid metadata: {}", e)))?;
        metadata.validate()?;
        Ok(metadata)
    }

    pub fn validate(&self) -> Result<()> {
        if self.exam_board.trim().is_empty() {
            return Err(PaperError::Validation(
                "exam_board must not be empty".to_string(),
            ));
        }

        if self.session.trim().is_empty() {
            return Err(PaperError::Validation(
                "session must not be empty".to_string(),
            ));
        }

        if !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(PaperError::Validation(format!(
                "year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, self.year
            )));
        }

        if !(1..=MAX_PAPER_NUMBER).contains(&self.paper_number) {
            return Err(PaperError::Validation(format!(
                "paper_number must be between 1 and {}, got {}",
                MAX_PAPER_NUMBER, self.paper_number
            )));
        }

        Ok(())
    }

    /// The explicit title, or one composed from the other fields.
    pub fn display_title(&self) -> String {
        match self.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => format!(
                "{} {} {} Paper {} - {} {}",
                self.exam_board,
                self.subject,
                self.level,
                self.paper_number,
                self.session,
                self.year
            ),
        }
    }
}

/// Row in the `Paper` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub id: String,
    pub title: String,
    pub exam_board: String,
    pub subject: String,
    pub level: String,
    pub year: i32,
    pub session: String,
    pub paper_number: u8,
    #[serde(default)]
    pub total_marks: Option<u32>,
    pub uploaded_at: String,
}

impl PaperRecord {
    pub fn new(id: String, metadata: &PaperMetadata, uploaded_at: String) -> Self {
        Self {
            id,
            title: metadata.display_title(),
            exam_board: metadata.exam_board.clone(),
            subject: metadata.subject.clone(),
            level: metadata.level.clone(),
            year: metadata.year,
            session: metadata.session.clone(),
            paper_number: metadata.paper_number,
            total_marks: metadata.total_marks,
            uploaded_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTree {
    #[serde(flatten)]
    pub question: QuestionRecord,
    pub content: Vec<ContentRecord>,
}

/// A paper with its questions and their content, as handed to the viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperTree {
    #[serde(flatten)]
    pub paper: PaperRecord,
    pub questions: Vec<QuestionTree>,
}

impl PaperTree {
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Sum of the marks printed on each question, if any carried marks.
    pub fn marks_found(&self) -> Option<u64> {
        self.questions
            .iter()
            .filter_map(|q| q.question.marks)
            .fold(None, |acc, m| Some(acc.unwrap_or(0).saturating_add(m)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata() -> PaperMetadata {
        PaperMetadata {
            exam_board: "AQA".to_string(),
            subject: default_subject(),
            level: default_level(),
            year: 2023,
            session: "June".to_string(),
            paper_number: 1,
            total_marks: Some(80),
            title: None,
        }
    }

    #[test]
    fn test_generated_title() {
        assert_eq!(
            metadata().display_title(),
            "AQA Economics A-Level Paper 1 - June 2023"
        );
    }

    #[test]
    fn test_explicit_title_wins() {
        let mut meta = metadata();
        meta.title = Some("Mock exam".to_string());
        assert_eq!(meta.display_title(), "Mock exam");

        meta.title = Some("   ".to_string());
        assert!(meta.display_title().starts_with("AQA"));
    }

    #[test]
    fn test_from_json_camel_case_with_defaults() {
        let meta = PaperMetadata::from_json(
            r#"{"examBoard":"Edexcel","year":2022,"session":"November","paperNumber":2}"#,
        )
        .unwrap();

        assert_eq!(meta.exam_board, "Edexcel");
        assert_eq!(meta.subject, "Economics");
        assert_eq!(meta.level, "A-Level");
        assert_eq!(meta.total_marks, None);
    }

    #[test]
    fn test_from_json_snake_case_aliases() {
        let meta = PaperMetadata::from_json(
            r#"{"exam_board":"OCR","year":2021,"session":"June","paper_number":3,"total_marks":60}"#,
        )
        .unwrap();

        assert_eq!(meta.paper_number, 3);
        assert_eq!(meta.total_marks, Some(60));
    }

    #[test]
    fn test_validation_ranges() {
        let mut meta = metadata();
        meta.year = 1999;
        assert!(meta.validate().is_err());

        let mut meta = metadata();
        meta.paper_number = 4;
        assert!(meta.validate().is_err());

        let mut meta = metadata();
        meta.exam_board = " ".to_string();
        assert!(meta.validate().is_err());

        assert!(PaperMetadata::from_json("not json").is_err());
    }

    #[test]
    fn test_configured_defaults_fill_blank_fields() {
        let meta = PaperMetadata::from_json_with_defaults(
            r#"{"examBoard":"OCR","year":2022,"session":"November","paperNumber":3,"level":""}"#,
            "Business",
            "AS-Level",
        )
        .unwrap();
        assert_eq!(meta.subject, "Business");
        assert_eq!(meta.level, "AS-Level");
        assert_eq!(meta.display_title(), "OCR Business AS-Level Paper 3 - November 2022");

        let meta = PaperMetadata::from_json_with_defaults(
            r#"{"examBoard":"OCR","subject":"Economics","year":2022,"session":"June","paperNumber":1}"#,
            "Business",
            "AS-Level",
        )
        .unwrap();
        assert_eq!(meta.subject, "Economics");

        assert!(PaperMetadata::from_json_with_defaults("[1,2]", "Business", "AS-Level").is_err());
    }

    #[test]
    fn test_tree_serializes_flat() {
        let paper = PaperRecord::new("p1".into(), &metadata(), "2024-01-01T00:00:00Z".into());
        let tree = PaperTree {
            paper,
            questions: vec![],
        };

        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["id"], "p1");
        assert_eq!(json["title"], "AQA Economics A-Level Paper 1 - June 2023");
        assert!(json["questions"].as_array().unwrap().is_empty());
        assert_eq!(tree.marks_found(), None);
    }
}
