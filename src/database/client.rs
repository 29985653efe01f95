// file: src/database/client.rs
// description: hosted paper store client speaking PostgREST over reqwest
// reference: https://postgrest.org/en/stable/references/api/tables_views.html

use crate::config::StoreConfig;
use crate::database::PaperStore;
use crate::error::{PaperError, Result};
use crate::models::{ContentRecord, PaperRecord, QuestionRecord};
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    config: StoreConfig,
    rest_url: String,
}

impl SupabaseStore {
    pub fn new(config: StoreConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(key) = config.service_key.as_deref() {
            let api_key = HeaderValue::from_str(key)
                .map_err(|e| PaperError::Config(format!("Invalid service key: {}", e)))?;
            let bearer = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|e| PaperError::Config(format!("Invalid service key: {}", e)))?;
            headers.insert("apikey", api_key);
            headers.insert(AUTHORIZATION, bearer);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| PaperError::Config(format!("Failed to build HTTP client: {}", e)))?;

        let rest_url = format!("{}/rest/v1", config.url.trim_end_matches('/'));
        info!("Paper store endpoint: {}", rest_url);

        Ok(Self {
            client,
            config,
            rest_url,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    async fn insert_rows<T: Serialize + ?Sized>(&self, table: &str, row: &T) -> Result<Response> {
        debug!("Inserting into {}", table);

        let response = self
            .client
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| {
                PaperError::Persistence(format!("Failed to insert into {}: {}", table, e))
            })?;

        Self::check_status(table, response).await
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        debug!("Selecting from {} with {:?}", table, query);

        let response = self
            .client
            .get(self.table_url(table))
            .query(query)
            .send()
            .await
            .map_err(|e| {
                PaperError::Persistence(format!("Failed to query {}: {}", table, e))
            })?;

        let response = Self::check_status(table, response).await?;

        response.json::<Vec<T>>().await.map_err(|e| {
            PaperError::Persistence(format!("Failed to parse rows from {}: {}", table, e))
        })
    }

    async fn check_status(table: &str, response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        Err(PaperError::Persistence(format!(
            "Request on {} failed with status {}: {}",
            table, status, error_text
        )))
    }
}

#[async_trait]
impl PaperStore for SupabaseStore {
    fn backend(&self) -> &'static str {
        "supabase"
    }

    async fn ping(&self) -> Result<()> {
        let _: Vec<serde_json::Value> = self
            .select_rows(
                &self.config.paper_table,
                &[("select", "id".to_string()), ("limit", "1".to_string())],
            )
            .await?;
        Ok(())
    }

    async fn insert_paper(&self, paper: &PaperRecord) -> Result<PaperRecord> {
        let response = self.insert_rows(&self.config.paper_table, paper).await?;

        // Prefer: return=representation echoes the stored rows; fall back to
        // our own record if the body is empty or not parseable.
        let stored: Vec<PaperRecord> = response.json().await.unwrap_or_default();
        Ok(stored.into_iter().next().unwrap_or_else(|| paper.clone()))
    }

    async fn insert_question(&self, question: &QuestionRecord) -> Result<()> {
        self.insert_rows(&self.config.question_table, question)
            .await?;
        Ok(())
    }

    async fn insert_content(&self, content: &ContentRecord) -> Result<()> {
        self.insert_rows(&self.config.content_table, content)
            .await?;
        Ok(())
    }

    async fn fetch_paper(&self, paper_id: &str) -> Result<Option<PaperRecord>> {
        let rows: Vec<PaperRecord> = self
            .select_rows(
                &self.config.paper_table,
                &[
                    ("select", "*".to_string()),
                    ("id", format!("eq.{}", paper_id)),
                ],
            )
            .await?;

        Ok(rows.into_iter().next())
    }

    async fn fetch_questions(&self, paper_id: &str) -> Result<Vec<QuestionRecord>> {
        self.select_rows(
            &self.config.question_table,
            &[
                ("select", "*".to_string()),
                ("paper_id", format!("eq.{}", paper_id)),
                ("order", "sequence_order.asc".to_string()),
            ],
        )
        .await
    }

    async fn fetch_content(&self, question_id: &str) -> Result<Vec<ContentRecord>> {
        self.select_rows(
            &self.config.content_table,
            &[
                ("select", "*".to_string()),
                ("question_id", format!("eq.{}", question_id)),
                ("order", "sequence_order.asc".to_string()),
            ],
        )
        .await
    }
}
