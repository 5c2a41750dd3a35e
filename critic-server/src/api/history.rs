//! Review history endpoints.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use critic_core::view;
use critic_db::{parse_review_id, ReviewRecord, HISTORY_LIMIT};
use tracing::info;

use super::types::{DeleteQuery, DeleteResponse, HistoryQuery};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// List the most recent reviews, newest first.
///
/// With `q` or `sort` the listing is filtered and re-sorted the same way the
/// history page does it.
pub async fn list_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<ReviewRecord>>> {
    let Query(query) = query?;
    let records = state.db.reviews().list_recent(HISTORY_LIMIT).await?;

    if query.q.is_none() && query.sort.is_none() {
        return Ok(Json(records));
    }

    let needle = query.q.unwrap_or_default();
    let order = query.sort.unwrap_or_default();
    let filtered = view::filter_and_sort(&records, &needle, order)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(filtered))
}

/// Delete a review by `id`.
///
/// Unknown identifiers succeed; a missing `id` is a 400.
pub async fn delete_history(
    State(state): State<Arc<AppState>>,
    query: Result<Query<DeleteQuery>, QueryRejection>,
) -> ApiResult<Json<DeleteResponse>> {
    let Query(query) = query?;
    let raw_id = query
        .id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing id".to_string()))?;

    let id = parse_review_id(&raw_id).ok_or_else(|| ApiError::BadRequest("Invalid id".to_string()))?;

    let removed = state.db.reviews().delete(id).await?;
    info!(id, removed, "Deleted review");

    Ok(Json(DeleteResponse { success: true }))
}
