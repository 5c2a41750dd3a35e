//! Request and response bodies of the JSON API.

use serde::{Deserialize, Serialize};

use critic_core::SortOrder;

/// `POST /api/analyze` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub code: String,
}

/// `POST /api/analyze` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub response: String,
}

/// `POST /api/github` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubRequest {
    pub url: String,
}

/// `POST /api/github` response; `code` is empty when the fetch failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubResponse {
    pub code: String,
}

/// `GET /api/history` query.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// Case-insensitive search over code and response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Creation-time order, newest first by default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortOrder>,
}

/// `DELETE /api/history` query.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteQuery {
    pub id: Option<String>,
}

/// `DELETE /api/history` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
