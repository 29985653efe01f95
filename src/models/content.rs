// file: src/models/content.rs
// description: per-question content items (text, images, diagrams)
// reference: internal data structures

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    Text,
    Image,
    Table,
    Diagram,
    Equation,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Text => "TEXT",
            ContentType::Image => "IMAGE",
            ContentType::Table => "TABLE",
            ContentType::Diagram => "DIAGRAM",
            ContentType::Equation => "EQUATION",
        }
    }
}

/// Row in the `QuestionContent` table.
///
/// Text uploads only ever fill `text`; the layout and image columns exist so
/// rows written by richer parsers deserialize without loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub question_id: String,
    pub sequence_order: u32,
    pub content_type: ContentType,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_bold: bool,
    #[serde(default, deserialize_with = "null_as_false")]
    pub is_italic: bool,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_width: Option<u32>,
    #[serde(default)]
    pub image_height: Option<u32>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

impl ContentRecord {
    pub fn plain_text(
        id: String,
        question_id: String,
        sequence_order: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            question_id,
            sequence_order,
            content_type: ContentType::Text,
            text: Some(text.into()),
            font_size: None,
            font_family: None,
            is_bold: false,
            is_italic: false,
            x: None,
            y: None,
            width: None,
            height: None,
            image_url: None,
            image_width: None,
            image_height: None,
            alt_text: None,
        }
    }
}

// Store rows may carry an explicit null in boolean columns.
fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_wire_names() {
        assert_eq!(
            serde_json::to_string(&ContentType::Diagram).unwrap(),
            "\"DIAGRAM\""
        );
        let parsed: ContentType = serde_json::from_str("\"TEXT\"").unwrap();
        assert_eq!(parsed, ContentType::Text);
    }

    #[test]
    fn test_sparse_row_deserializes() {
        let row = r#"{
            "id": "c1",
            "question_id": "q1",
            "sequence_order": 0,
            "content_type": "IMAGE",
            "image_url": "https://cdn.example/img_0.png",
            "x": null,
            "is_bold": null
        }"#;

        let record: ContentRecord = serde_json::from_str(row).unwrap();
        assert_eq!(record.content_type, ContentType::Image);
        assert!(record.text.is_none());
        assert!(record.x.is_none());
        assert!(!record.is_bold);
    }

    #[test]
    fn test_plain_text_constructor() {
        let record = ContentRecord::plain_text("c1".into(), "q1".into(), 0, "Explain.");
        assert_eq!(record.content_type.as_str(), "TEXT");
        assert_eq!(record.text.as_deref(), Some("Explain."));
    }
}
