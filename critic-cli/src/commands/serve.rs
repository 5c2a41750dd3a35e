//! Serve command - run the HTTP API and web UI

use std::sync::Arc;

use clap::Args;
use critic_core::{Config, GeminiClient, Secrets};
use critic_db::Database;
use critic_github::GitHubFetcher;
use critic_server::AppState;
use tracing::info;

/// Run the HTTP API and web UI
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Open the store and check the API key, then exit without serving
    #[arg(long)]
    check: bool,
}

impl ServeArgs {
    /// Execute the serve command
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let secrets = Secrets::load()?;
        let api_key = secrets.require_gemini_api_key()?;

        let reviewer = GeminiClient::from_config(&config.ai, api_key)?;
        let fetcher = GitHubFetcher::from_config(&config.github)?;
        let db = Database::connect(&config.database).await?;
        info!(
            model = %reviewer.model(),
            database = %config.database.url,
            "Services ready"
        );

        if self.check {
            println!("Configuration OK");
            db.close().await;
            return Ok(());
        }

        let state = AppState::new(Arc::new(reviewer), fetcher, db.clone());
        critic_server::serve(&config.server.bind, state).await?;

        db.close().await;
        Ok(())
    }
}
