//! Raw-content fetching with a fail-soft front door

use critic_core::GitHubConfig;
use tracing::{debug, info, warn};

use crate::url::{resolve_raw_url, GitHubSource};
use crate::{Error, Result};

/// Downloads file contents for GitHub web URLs
///
/// Cloning is cheap; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct GitHubFetcher {
    http: reqwest::Client,
    raw_base_url: String,
}

impl GitHubFetcher {
    /// Create a fetcher against raw.githubusercontent.com
    pub fn new() -> Result<Self> {
        Self::from_config(&GitHubConfig::default())
    }

    /// Create a fetcher from GitHub configuration
    pub fn from_config(config: &GitHubConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("critic/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            raw_base_url: config.raw_base_url.clone(),
        })
    }

    /// Resolve `url` to the raw download location
    pub fn resolve(&self, url: &str) -> Result<GitHubSource> {
        resolve_raw_url(url, &self.raw_base_url)
    }

    /// Fetch the text behind `url`, reporting why it failed
    pub async fn try_fetch(&self, url: &str) -> Result<String> {
        let source = self.resolve(url)?;
        let raw_url = source.raw_url();
        debug!(url = %url, raw_url = %raw_url, "Resolved GitHub URL");

        let response = self.http.get(raw_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: raw_url.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await?;
        info!(raw_url = %raw_url, bytes = text.len(), "Fetched GitHub content");
        Ok(text)
    }

    /// Fetch the text behind `url`, or an empty string on any failure
    ///
    /// An empty result cannot be told apart from an empty file; use
    /// [`GitHubFetcher::try_fetch`] when the difference matters.
    pub async fn fetch(&self, url: &str) -> String {
        match self.try_fetch(url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(url = %url, error = %e, "GitHub fetch failed");
                String::new()
            }
        }
    }
}
