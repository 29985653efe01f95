// file: src/models/question.rs
// description: extracted question values and their stored row form
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Question label exactly as printed in the paper ("1", "07", "12").
///
/// Never normalized to an integer, so "07" and "7" stay distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionNumber(String);

impl QuestionNumber {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionNumber {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// One question segment found by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedQuestion {
    pub question_number: QuestionNumber,
    pub sequence_order: u32,
    pub content: String,
    pub marks: Option<u64>,
}

/// Row in the `Question` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub id: String,
    pub paper_id: String,
    pub question_number: String,
    pub sequence_order: u32,
    pub marks: Option<u64>,
}

impl QuestionRecord {
    pub fn from_extracted(id: String, paper_id: String, question: &ExtractedQuestion) -> Self {
        Self {
            id,
            paper_id,
            question_number: question.question_number.to_string(),
            sequence_order: question.sequence_order,
            marks: question.marks,
        }
    }
}
