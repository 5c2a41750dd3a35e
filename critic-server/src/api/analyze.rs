//! Submit-for-review endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use critic_db::NewReview;
use tracing::info;

use super::types::{AnalyzeRequest, AnalyzeResponse};
use crate::error::ApiResult;
use crate::state::AppState;

/// Review the submitted code, store the result, and return the feedback.
///
/// Nothing is stored when the model call fails.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> ApiResult<Json<AnalyzeResponse>> {
    let response = state.reviewer.review(&request.code).await?;

    let record = state
        .db
        .reviews()
        .create(NewReview::new(request.code, response))
        .await?;

    info!(id = record.id, code_len = record.code.len(), "Stored review");

    Ok(Json(AnalyzeResponse {
        response: record.response,
    }))
}
