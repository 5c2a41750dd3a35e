//! Error types for database operations

use thiserror::Error;

/// Database error types
#[derive(Error, Debug)]
pub enum Error {
    /// SQLx database error
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),

    /// Review record not found
    #[error("Review {0} not found")]
    ReviewNotFound(i64),
}

/// Result type alias for database operations
pub type Result<T> = std::result::Result<T, Error>;
