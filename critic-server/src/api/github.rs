//! GitHub source fetch endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use super::types::{GitHubRequest, GitHubResponse};
use crate::state::AppState;

/// Return the raw contents behind a GitHub URL, or `""` if it cannot be fetched.
pub async fn fetch_github(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GitHubRequest>,
) -> Json<GitHubResponse> {
    let code = state.fetcher.fetch(&request.url).await;
    Json(GitHubResponse { code })
}
