// file: src/api/router.rs
// description: router construction and the http server loop
// reference: https://docs.rs/axum

use crate::api::handlers;
use crate::config::Config;
use crate::error::{PaperError, Result};
use crate::pipeline::UploadPipeline;
use crate::utils::Validator;
use crate::viewer::HtmlViewer;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

// Headroom for the metadata part and multipart framing.
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: UploadPipeline,
    pub viewer: HtmlViewer,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pipeline: UploadPipeline, config: Config) -> Self {
        Self {
            pipeline,
            viewer: HtmlViewer::new().with_layout(config.viewer.preserve_layout),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes() + MULTIPART_OVERHEAD;

    Router::new()
        .route("/", get(handlers::upload_page))
        .route("/papers/:paper_id", get(handlers::view_paper))
        .route("/api/health", get(handlers::health))
        .route("/api/upload", post(handlers::upload))
        .route("/api/papers/:paper_id", get(handlers::get_paper))
        .fallback(handlers::not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `host:port` and serves until Ctrl-C.
pub async fn serve(state: AppState, host: &str, port: u16) -> Result<()> {
    Validator::validate_port(port)?;

    let addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| PaperError::Config(format!("Cannot bind {}: {}", addr, e)))?;

    info!(
        "Serving paper api on http://{} ({} store)",
        addr,
        state.pipeline.repository().store().backend()
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}
