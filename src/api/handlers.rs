// file: src/api/handlers.rs
// description: axum handlers for upload, paper retrieval, viewing and health
// reference: https://docs.rs/axum

use crate::api::error::{ApiError, ErrorBody, status_for};
use crate::api::pages::{UPLOAD_PAGE_HTML, error_page};
use crate::api::router::AppState;
use crate::error::PaperError;
use crate::models::{HealthResponse, PaperMetadata, PaperTree, ParseResponse};
use crate::utils::{HealthCheck, Validator, check_store};
use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

const STORE_SLOW_AFTER: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
pub struct HealthBody {
    #[serde(flatten)]
    pub service: HealthResponse,
    pub store: HealthCheck,
}

pub async fn upload_page() -> Html<&'static str> {
    Html(UPLOAD_PAGE_HTML)
}

pub async fn health(State(state): State<AppState>) -> Json<HealthBody> {
    let store = check_store(state.pipeline.repository().store().as_ref(), STORE_SLOW_AFTER).await;
    Json(HealthBody {
        service: HealthResponse::healthy(),
        store,
    })
}

/// `POST /api/upload`: multipart with a `file` part and a `metadata` JSON part.
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ParseResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    let mut metadata_raw: Option<String> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(multipart_error(&state, "Invalid multipart body", e)),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(&state, "Failed to read file data", e))?;
                file = Some((filename, bytes.to_vec()));
            }
            "metadata" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(&state, "Failed to read metadata", e))?;
                metadata_raw = Some(text);
            }
            other => debug!("Ignoring multipart field {:?}", other),
        }
    }

    let (filename, bytes) = file.ok_or_else(|| ApiError::bad_request("No file provided"))?;
    Validator::validate_pdf_filename(&filename)?;
    Validator::validate_upload_size(bytes.len(), state.config.max_upload_bytes())?;

    let metadata_raw = metadata_raw.ok_or_else(|| ApiError::bad_request("No metadata provided"))?;
    let metadata = PaperMetadata::from_json_with_defaults(
        &metadata_raw,
        &state.config.upload.default_subject,
        &state.config.upload.default_level,
    )?;

    info!(
        "Received {} ({} bytes) for {}",
        Validator::truncate_text(&filename, 60),
        bytes.len(),
        metadata.display_title()
    );

    let upload = state.pipeline.process(bytes, &metadata).await?;
    Ok(Json(upload.response))
}

// The body limit surfaces as a multipart read error carrying 413.
fn multipart_error(state: &AppState, context: &str, e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError(PaperError::TooLarge(format!(
            "request body exceeds the {} MB upload limit",
            state.config.upload.max_file_size_mb
        )));
    }
    ApiError::bad_request(format!("{}: {}", context, e.body_text()))
}

pub async fn get_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<String>,
) -> Result<Json<PaperTree>, ApiError> {
    let tree = state.pipeline.repository().get_paper(&paper_id).await?;
    Ok(Json(tree))
}

/// `GET /papers/:paper_id`: the stored paper as an HTML page. Failures render
/// an HTML error page instead of JSON.
pub async fn view_paper(State(state): State<AppState>, Path(paper_id): Path<String>) -> Response {
    let rendered = match state.pipeline.repository().get_paper(&paper_id).await {
        Ok(tree) => state.viewer.render(&tree),
        Err(e) => Err(e),
    };

    match rendered {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            let status = status_for(&e);
            tracing::warn!(kind = e.kind(), "Cannot show paper {}: {}", paper_id, e);
            (status, Html(error_page(status, &e.to_string()))).into_response()
        }
    }
}

pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            detail: "Not Found".to_string(),
        }),
    )
}
