//! Review command - submit a file, stdin or GitHub URL for review

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::Args;
use critic_github::looks_like_github_url;
use tracing::info;

use super::CriticClient;

pub(crate) const INVALID_GITHUB_URL: &str = "Please enter a valid GitHub file or repository URL.";
pub(crate) const GITHUB_FETCH_FAILED: &str = "Could not fetch code from GitHub.";

/// Review a file, stdin or GitHub URL
#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// File to review; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Review a GitHub file or repository instead
    #[arg(short, long, conflicts_with = "file")]
    github: Option<String>,
}

impl ReviewArgs {
    /// Execute the review command
    pub async fn execute(&self, client: &CriticClient) -> anyhow::Result<()> {
        let code = match &self.github {
            Some(url) => fetch_github_code(client, url).await?,
            None => read_source(self.file.as_deref(), std::io::stdin().lock())?,
        };

        if code.trim().is_empty() {
            bail!("Nothing to review");
        }

        eprintln!("Analyzing...");
        let response = client.analyze(&code).await?;
        info!(bytes = code.len(), "Review complete");

        println!("{}", response);
        Ok(())
    }
}

/// Fetch source through the server, applying the same checks as the web form
pub(crate) async fn fetch_github_code(client: &CriticClient, url: &str) -> anyhow::Result<String> {
    let url = url.trim();
    if !looks_like_github_url(url) {
        bail!(INVALID_GITHUB_URL);
    }

    let code = client.fetch_github(url).await?;
    if code.is_empty() {
        bail!(GITHUB_FETCH_FAILED);
    }
    Ok(code)
}

fn read_source(file: Option<&Path>, mut stdin: impl Read) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut code = String::new();
            stdin
                .read_to_string(&mut code)
                .context("Failed to read stdin")?;
            Ok(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_read_source_from_stdin() {
        let code = read_source(None, "x=1\n".as_bytes()).unwrap();
        assert_eq!(code, "x=1\n");

        let code = read_source(Some(Path::new("-")), "y=2".as_bytes()).unwrap();
        assert_eq!(code, "y=2");
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Some(Path::new("/definitely/not/here.rs")), "".as_bytes())
            .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.rs"));
    }

    #[tokio::test]
    async fn test_invalid_github_url_is_rejected_locally() {
        let server = MockServer::start().await;
        let client = CriticClient::new(&server.uri()).unwrap();

        let err = fetch_github_code(&client, "https://gitlab.com/owner/repo")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), INVALID_GITHUB_URL);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_fetch_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/github"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "code": "" })))
            .mount(&server)
            .await;

        let client = CriticClient::new(&server.uri()).unwrap();
        let err = fetch_github_code(&client, "https://github.com/owner/repo")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), GITHUB_FETCH_FAILED);
    }
}
