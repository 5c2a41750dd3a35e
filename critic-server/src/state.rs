//! Shared server state.

use std::sync::Arc;

use critic_core::ReviewModel;
use critic_db::Database;
use critic_github::GitHubFetcher;

/// Backing services injected into every handler.
#[derive(Clone)]
pub struct AppState {
    /// AI review client.
    pub reviewer: Arc<dyn ReviewModel>,
    /// GitHub raw-content fetcher.
    pub fetcher: GitHubFetcher,
    /// Review store, one pool for the whole process.
    pub db: Database,
}

impl AppState {
    pub fn new(reviewer: Arc<dyn ReviewModel>, fetcher: GitHubFetcher, db: Database) -> Self {
        Self {
            reviewer,
            fetcher,
            db,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("fetcher", &self.fetcher)
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}
