//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while fetching source from GitHub
#[derive(Error, Debug)]
pub enum Error {
    /// URL is neither a file (blob) URL nor a repository URL
    #[error("Invalid GitHub URL: {0}")]
    InvalidUrl(String),

    /// Transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Raw content host answered with a non-success status
    #[error("Fetching {url} failed with status {status}")]
    Status { url: String, status: u16 },
}
