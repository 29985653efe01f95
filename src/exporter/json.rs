// file: src/exporter/json.rs
// description: writes stored papers and ad hoc extractions to json files

use crate::error::{PaperError, Result};
use crate::models::{ExtractedQuestion, PaperTree};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

/// Envelope for questions that were extracted but never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionExport<'a> {
    pub source: &'a str,
    pub exported_at: String,
    pub questions_count: usize,
    pub questions: &'a [ExtractedQuestion],
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| PaperError::FileOperation {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes `{paper_id}.json` holding the paper with its questions and content.
    pub fn export_paper(&self, tree: &PaperTree, pretty: bool) -> Result<PathBuf> {
        let path = self.output_dir.join(format!("{}.json", file_stem(&tree.paper.id)));
        self.write(&path, tree, pretty)?;

        info!(
            "Exported paper {} ({} questions) to {}",
            tree.paper.id,
            tree.question_count(),
            path.display()
        );
        Ok(path)
    }

    pub fn export_extraction(
        &self,
        name: &str,
        questions: &[ExtractedQuestion],
        pretty: bool,
    ) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(format!("{}.questions.json", file_stem(name)));
        let export = ExtractionExport {
            source: name,
            exported_at: Utc::now().to_rfc3339(),
            questions_count: questions.len(),
            questions,
        };
        self.write(&path, &export, pretty)?;

        info!("Exported {} extracted questions to {}", questions.len(), path.display());
        Ok(path)
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T, pretty: bool) -> Result<()> {
        let body = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        fs::write(path, body).map_err(|source| PaperError::FileOperation {
            path: path.to_path_buf(),
            source,
        })
    }
}

// Keeps ids and file names from escaping the output directory.
fn file_stem(raw: &str) -> String {
    let stem: String = Path::new(raw)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(raw)
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();

    if stem.is_empty() { "export".to_string() } else { stem }
}
