//! Critic GitHub - fetch source code from GitHub web URLs
//!
//! Converts a GitHub file or repository URL into its raw-content URL and
//! downloads the text.

mod error;
mod fetcher;
mod url;

pub use error::{Error, Result};
pub use fetcher::GitHubFetcher;
pub use url::{looks_like_github_url, resolve_raw_url, GitHubSource};
