/// Question answering handler
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use super::AppState;
use crate::api::error::ApiError;
use crate::api::types::QueryRequest;
use crate::api::types::QueryResponse;

/// Answer a question from the indexed PDFs (POST /query)
pub async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryRequest>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(req) = body.map_err(|e| ApiError {
        status: e.status(),
        message: e.body_text(),
    })?;

    let question = req.question.unwrap_or_default();
    if question.trim().is_empty() {
        return Err(ApiError::bad_request("Question is required"));
    }

    info!("POST /query: {}", question);
    let response = state.rag.query(&question).await?;
    Ok(Json(response.into()))
}
