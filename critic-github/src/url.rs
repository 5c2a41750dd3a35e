//! GitHub URL classification and raw-content rewriting

use critic_core::config::DEFAULT_RAW_BASE_URL;

use crate::{Error, Result};

const GITHUB_PREFIX: &str = "https://github.com/";

/// What a GitHub URL points at, with the raw URL to download
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitHubSource {
    /// A single file (`.../blob/<ref>/<path>`)
    File { raw_url: String },
    /// A repository root; its README on `main` is fetched
    Readme {
        owner: String,
        repo: String,
        raw_url: String,
    },
}

impl GitHubSource {
    pub fn raw_url(&self) -> &str {
        match self {
            GitHubSource::File { raw_url } | GitHubSource::Readme { raw_url, .. } => raw_url,
        }
    }
}

/// Resolve a GitHub web URL to the raw URL to download
///
/// - Any URL containing `/blob/` is rewritten in place: `github.com` becomes
///   `raw.githubusercontent.com` and `/blob/` becomes `/`.
/// - `https://github.com/<owner>/<repo>[/...]` resolves to
///   `<raw_base>/<owner>/<repo>/main/README.md`.
///
/// `raw_base` replaces the default raw host in either result.
pub fn resolve_raw_url(url: &str, raw_base: &str) -> Result<GitHubSource> {
    let raw_base = raw_base.trim_end_matches('/');

    if url.contains("/blob/") {
        let rewritten = url
            .replacen("github.com", "raw.githubusercontent.com", 1)
            .replacen("/blob/", "/", 1);
        let raw_url = match rewritten.strip_prefix(DEFAULT_RAW_BASE_URL) {
            Some(rest) => format!("{}{}", raw_base, rest),
            None => rewritten,
        };
        return Ok(GitHubSource::File { raw_url });
    }

    let (owner, repo) = parse_repository(url).ok_or_else(|| Error::InvalidUrl(url.to_string()))?;
    let raw_url = format!("{}/{}/{}/main/README.md", raw_base, owner, repo);
    Ok(GitHubSource::Readme {
        owner: owner.to_string(),
        repo: repo.to_string(),
        raw_url,
    })
}

fn parse_repository(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix(GITHUB_PREFIX)?;
    let mut segments = rest.split('/');
    let owner = segments.next().filter(|s| !s.is_empty())?;
    let repo = segments.next().filter(|s| !s.is_empty())?;
    Some((owner, repo))
}

/// Quick client-side check that input looks like a GitHub file or repo URL
///
/// Accepts `https://github.com/<something>/<something>` on a single line.
/// This is only an input hint for front ends, not a validation boundary.
pub fn looks_like_github_url(url: &str) -> bool {
    let Some(rest) = url.strip_prefix(GITHUB_PREFIX) else {
        return false;
    };
    if rest.contains(['\n', '\r']) {
        return false;
    }
    rest.char_indices()
        .any(|(i, c)| c == '/' && i > 0 && i + 1 < rest.len())
}
