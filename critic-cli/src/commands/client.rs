//! HTTP client for a running Critic server

use anyhow::{bail, Context};
use critic_db::ReviewRecord;
use critic_server::api::{
    AnalyzeRequest, AnalyzeResponse, DeleteResponse, GitHubRequest, GitHubResponse,
};
use critic_server::ErrorBody;
use reqwest::Response;
use tracing::debug;
use url::Url;

/// Thin wrapper over the JSON API
#[derive(Debug, Clone)]
pub struct CriticClient {
    http: reqwest::Client,
    base: Url,
}

impl CriticClient {
    /// Create a client for the server at `base`
    ///
    /// A base with a path prefix (`http://host/critic`) is kept as a prefix.
    pub fn new(base: &str) -> anyhow::Result<Self> {
        let mut base = Url::parse(base).with_context(|| format!("Invalid server URL: {}", base))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn endpoint(&self, path: &str) -> anyhow::Result<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    /// Submit code for review and return the feedback
    pub async fn analyze(&self, code: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.endpoint("api/analyze")?)
            .json(&AnalyzeRequest {
                code: code.to_string(),
            })
            .send()
            .await
            .context("Failed to reach the Critic server")?;

        let body: AnalyzeResponse = check(response).await?.json().await?;
        Ok(body.response)
    }

    /// Fetch source from a GitHub URL; empty when the server could not fetch it
    pub async fn fetch_github(&self, url: &str) -> anyhow::Result<String> {
        let response = self
            .http
            .post(self.endpoint("api/github")?)
            .json(&GitHubRequest {
                url: url.to_string(),
            })
            .send()
            .await
            .context("Failed to reach the Critic server")?;

        let body: GitHubResponse = check(response).await?.json().await?;
        Ok(body.code)
    }

    /// The most recent reviews, newest first
    pub async fn history(&self) -> anyhow::Result<Vec<ReviewRecord>> {
        let response = self
            .http
            .get(self.endpoint("api/history")?)
            .send()
            .await
            .context("Failed to reach the Critic server")?;

        Ok(check(response).await?.json().await?)
    }

    /// Delete a review by its wire identifier
    pub async fn delete(&self, id: &str) -> anyhow::Result<()> {
        let mut url = self.endpoint("api/history")?;
        url.query_pairs_mut().append_pair("id", id);

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .context("Failed to reach the Critic server")?;

        let body: DeleteResponse = check(response).await?.json().await?;
        if !body.success {
            bail!("Server did not confirm deletion of review {}", id);
        }
        Ok(())
    }
}

/// Turn non-success responses into errors carrying the server's message
async fn check(response: Response) -> anyhow::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    debug!(status = %status, body = %text, "Server returned an error");

    let message = error_message(&text).unwrap_or(text);
    bail!("Server returned {}: {}", status, message)
}

fn error_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text).ok().map(|b| b.error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_endpoint_joining() {
        let client = CriticClient::new("http://127.0.0.1:3000").unwrap();
        assert_eq!(
            client.endpoint("api/history").unwrap().as_str(),
            "http://127.0.0.1:3000/api/history"
        );

        let client = CriticClient::new("http://review.local/critic").unwrap();
        assert_eq!(
            client.endpoint("/api/analyze").unwrap().as_str(),
            "http://review.local/critic/api/analyze"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(CriticClient::new("not a url").is_err());
    }

    #[tokio::test]
    async fn test_analyze() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/analyze"))
            .and(body_json(serde_json::json!({ "code": "x=1" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "response": "Looks fine." })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = CriticClient::new(&server.uri()).unwrap();
        assert_eq!(client.analyze("x=1").await.unwrap(), "Looks fine.");
    }

    #[tokio::test]
    async fn test_history_parses_wire_records() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "_id": "7",
                    "code": "fn main() {}",
                    "response": "ok",
                    "createdAt": "2024-04-01T12:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let client = CriticClient::new(&server.uri()).unwrap();
        let records = client.history().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 7);
        assert_eq!(records[0].code, "fn main() {}");
    }

    #[tokio::test]
    async fn test_delete_surfaces_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/history"))
            .and(query_param("id", "abc"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({ "error": "Invalid id" })),
            )
            .mount(&server)
            .await;

        let client = CriticClient::new(&server.uri()).unwrap();
        let err = client.delete("abc").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Invalid id"));
    }

    #[tokio::test]
    async fn test_delete_success() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/history"))
            .and(query_param("id", "3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "success": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CriticClient::new(&server.uri()).unwrap();
        client.delete("3").await.unwrap();
    }
}
