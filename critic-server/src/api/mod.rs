//! HTTP routes and handlers.

mod analyze;
mod github;
mod health;
mod history;
mod ui;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub use types::{
    AnalyzeRequest, AnalyzeResponse, DeleteResponse, GitHubRequest, GitHubResponse,
    HealthResponse, HistoryQuery,
};

/// Create the application routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        // Web UI
        .route("/", get(ui::index))
        .route("/history", get(ui::index))
        .route("/health", get(health::health_check))
        // JSON API
        .route("/api/analyze", post(analyze::analyze))
        .route("/api/github", post(github::fetch_github))
        .route(
            "/api/history",
            get(history::list_history).delete(history::delete_history),
        )
}
