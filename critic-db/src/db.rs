//! Database connection and configuration

use crate::error::{Error, Result};
use crate::repos::ReviewRepository;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::ConnectOptions;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite:///var/lib/critic/critic.db`
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        let db_path = Database::default_path().unwrap_or_else(|_| PathBuf::from("critic.db"));

        Self {
            url: format!("sqlite://{}", db_path.display()),
            max_connections: 5,
        }
    }
}

impl DatabaseConfig {
    /// Create a new database config with the given connection string
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 5,
        }
    }

    /// Create a config pointing at a database file
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self::new(format!("sqlite://{}", path.as_ref().display()))
    }

    /// Set the maximum number of connections
    pub fn with_max_connections(mut self, max_connections: u32) -> Self {
        self.max_connections = max_connections;
        self
    }
}

/// Database connection pool
///
/// Constructed once at startup and handed to whoever needs it. Cloning is
/// cheap and every clone shares the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database with the given configuration and run migrations
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .disable_statement_logging();

        // Ensure parent directory exists
        let filename = options.get_filename();
        if let Some(parent) = filename.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Io(format!("Failed to create database directory: {}", e))
                })?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        info!(url = %config.url, "Connected to database");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Open or create a database file at a specific path
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::connect(&DatabaseConfig::from_path(path)).await
    }

    /// Create an in-memory database for testing
    ///
    /// The pool holds exactly one connection that never expires, otherwise
    /// every new connection would see its own empty database.
    pub async fn in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Get the default database path
    ///
    /// Returns `~/.cache/critic/critic.db`
    pub fn default_path() -> Result<PathBuf> {
        dirs::cache_dir()
            .map(|p| p.join("critic").join("critic.db"))
            .ok_or_else(|| Error::Io("Could not determine cache directory".to_string()))
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Migration(e.to_string()))?;

        debug!("Database migrations applied");
        Ok(())
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the review repository
    pub fn reviews(&self) -> ReviewRepository<'_> {
        ReviewRepository::new(&self.pool)
    }

    /// Close the database connection
    pub async fn close(self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_database_connection() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("nested").join("test.db");

        let db = Database::open(&db_path).await.unwrap();

        assert!(db_path.exists());
        db.close().await;
    }

    #[tokio::test]
    async fn test_database_migrations() {
        let db = Database::in_memory().await.unwrap();

        let result: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='reviews'",
        )
        .fetch_one(db.pool())
        .await
        .unwrap();
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open(&db_path).await.unwrap();
        db.migrate().await.unwrap();
        db.close().await;

        // Reopening runs the migrator again against an up-to-date schema
        let db = Database::open(&db_path).await.unwrap();
        db.close().await;
    }

    #[test]
    fn test_config_builder() {
        let config = DatabaseConfig::new("sqlite://x.db").with_max_connections(2);
        assert_eq!(config.url, "sqlite://x.db");
        assert_eq!(config.max_connections, 2);

        let config = DatabaseConfig::from_path("/tmp/critic/test.db");
        assert_eq!(config.url, "sqlite:///tmp/critic/test.db");
    }
}
