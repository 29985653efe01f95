// file: src/api/error.rs
// description: maps paper errors onto http responses with a `detail` body

use crate::error::PaperError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError(pub PaperError);

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self(PaperError::Validation(detail.into()))
    }

    pub fn status(&self) -> StatusCode {
        status_for(&self.0)
    }
}

pub fn status_for(err: &PaperError) -> StatusCode {
    match err {
        PaperError::Validation(_) => StatusCode::BAD_REQUEST,
        PaperError::TooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        PaperError::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PaperError::NotFound(_) => StatusCode::NOT_FOUND,
        PaperError::Config(_)
        | PaperError::Persistence(_)
        | PaperError::Presentation(_)
        | PaperError::FileOperation { .. }
        | PaperError::Io(_)
        | PaperError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<PaperError> for ApiError {
    fn from(err: PaperError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.0.kind(), "Request failed: {}", self.0);
        } else {
            tracing::warn!(kind = self.0.kind(), "Request rejected: {}", self.0);
        }

        let detail = match self.0 {
            PaperError::Validation(msg) => msg,
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (PaperError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (PaperError::TooLarge("x".into()), StatusCode::PAYLOAD_TOO_LARGE),
            (PaperError::Decode("x".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (PaperError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (PaperError::Persistence("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (PaperError::Presentation("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_validation_detail_is_bare_message() {
        use http_body_util::BodyExt;

        let response = ApiError::bad_request("No file provided").into_response();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorBody = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.detail, "No file provided");
    }
}
