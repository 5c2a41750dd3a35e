//! Error types for Critic

use thiserror::Error;

/// Result type alias for Critic operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Critic operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP transport error talking to an upstream service
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The AI model rejected the request or returned nothing usable
    #[error("AI review failed: {0}")]
    Ai(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Chat session is not in a state that accepts the requested transition
    #[error("Session error: {0}")]
    Session(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
