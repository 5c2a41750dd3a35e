//! Configuration management for Critic
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (CRITIC_*, DATABASE_URL)
//! 3. Config file (~/.config/critic/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};
use std::time::Duration;

use critic_db::DatabaseConfig;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default Gemini model used for reviews
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro-latest";

/// Default Gemini API host
pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default host serving raw GitHub file contents
pub const DEFAULT_RAW_BASE_URL: &str = "https://raw.githubusercontent.com";

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the HTTP server listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Generative-AI client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AiConfig {
    /// Gemini model name
    pub model: String,

    /// API host, overridable for testing
    pub base_url: String,

    /// Per-request timeout; no timeout when unset
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_AI_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// GitHub fetcher configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// Host serving raw file contents
    pub raw_base_url: String,

    /// Per-request timeout; no timeout when unset
    #[serde(with = "humantime_serde")]
    pub timeout: Option<Duration>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            raw_base_url: DEFAULT_RAW_BASE_URL.to_string(),
            timeout: None,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// AI client configuration
    pub ai: AiConfig,

    /// GitHub fetcher configuration
    pub github: GitHubConfig,

    /// Review store configuration
    pub database: DatabaseConfig,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub bind: Option<String>,
    pub model: Option<String>,
    pub database_url: Option<String>,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/critic/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("critic").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - CRITIC_BIND: Server listen address
    /// - CRITIC_MODEL: Gemini model
    /// - DATABASE_URL: Review store connection string
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(bind) = lookup("CRITIC_BIND") {
            self.server.bind = bind;
        }

        if let Some(model) = lookup("CRITIC_MODEL") {
            self.ai.model = model;
        }

        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = url;
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, overrides: CliOverrides) -> Self {
        if let Some(bind) = overrides.bind {
            self.server.bind = bind;
        }

        if let Some(model) = overrides.model {
            self.ai.model = model;
        }

        if let Some(url) = overrides.database_url {
            self.database.url = url;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(overrides: CliOverrides) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(overrides))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert!(config.ai.timeout.is_none());
        assert_eq!(config.github.raw_base_url, DEFAULT_RAW_BASE_URL);
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(CliOverrides {
            bind: Some("0.0.0.0:8080".to_string()),
            model: Some("gemini-2.0-flash".to_string()),
            database_url: None,
        });

        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.ai.model, "gemini-2.0-flash");
        assert!(config.database.url.starts_with("sqlite://"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("CRITIC_MODEL", "gemini-1.5-flash"),
            ("DATABASE_URL", "sqlite:///tmp/reviews.db"),
        ]);

        let config =
            Config::default().with_overrides_from(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.database.url, "sqlite:///tmp/reviews.db");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[server]
bind = "0.0.0.0:3000"

[ai]
model = "gemini-1.5-flash"
timeout = "90s"

[github]
raw_base_url = "http://localhost:9999"

[database]
url = "sqlite:///srv/critic.db"
max_connections = 2
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.ai.timeout, Some(Duration::from_secs(90)));
        assert_eq!(config.ai.base_url, DEFAULT_AI_BASE_URL);
        assert_eq!(config.github.raw_base_url, "http://localhost:9999");
        assert_eq!(config.database.url, "sqlite:///srv/critic.db");
        assert_eq!(config.database.max_connections, 2);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[ai]
model = "gemini-1.5-flash"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // everything else should use defaults
        assert_eq!(config.ai.model, "gemini-1.5-flash");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
        assert_eq!(config.database.max_connections, 5);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbind = \"127.0.0.1:4000\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.server.bind, "127.0.0.1:4000");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nbind = ").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
