/// API request handlers
use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::types::HealthResponse;
use crate::rag::RagService;

pub mod documents;
pub mod rag;

pub use documents::*;
pub use rag::*;

const INDEX_HTML: &str = include_str!("../static/index.html");
const APP_JS: &str = include_str!("../static/app.js");

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub rag: Arc<RagService>,
    /// Upload size limit, reported when a body is rejected for size
    pub max_upload_bytes: usize,
}

/// Upload and question page
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Script behind the home page
pub async fn app_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        APP_JS,
    )
}

/// Health check handler
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        indexed_chunks: state.rag.indexed_chunks().await,
    })
}
