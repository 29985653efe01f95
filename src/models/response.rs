// file: src/models/response.rs
// description: response bodies returned by the upload pipeline and the api
// reference: internal data structures

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseResponse {
    pub paper_id: String,
    pub status: String,
    pub questions_count: usize,
    /// Seconds, rounded to two decimals.
    pub processing_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ParseResponse {
    pub fn success(paper_id: String, questions_count: usize, elapsed_secs: f64) -> Self {
        Self {
            paper_id,
            status: "success".to_string(),
            questions_count,
            processing_time: (elapsed_secs * 100.0).round() / 100.0,
            message: Some(format!(
                "Successfully parsed {} questions",
                questions_count
            )),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            service: "PDF Parsing API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
