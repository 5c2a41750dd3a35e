//! Gemini API key storage
//!
//! The key never lives in `config.toml`. It comes from the `GEMINI_API_KEY`
//! environment variable or, failing that, from `~/.config/critic/secrets.toml`,
//! which must not be readable by group or others on Unix.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable holding the Gemini API key
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

const SECRETS_TEMPLATE: &str = r#"# Critic secrets - keep this file private (chmod 600)

[gemini]
# Google AI Studio key: https://aistudio.google.com/app/apikey
api_key = ""
"#;

/// Contents of `secrets.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub gemini: GeminiSecrets,
}

/// The `[gemini]` table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GeminiSecrets {
    pub api_key: Option<String>,
}

impl Secrets {
    /// Read the secrets file if there is one
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read and parse `path`, refusing files others can read
    pub fn load_from_file(path: &Path) -> Result<Self> {
        check_permissions(path)?;

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Invalid secrets file {}: {}", path.display(), e)))?;

        secrets.gemini.api_key = secrets.gemini.api_key.map(|key| key.trim().to_string());
        Ok(secrets)
    }

    /// `~/.config/critic/secrets.toml`
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("critic").join("secrets.toml"))
    }

    /// The API key, preferring the environment over the file
    pub fn gemini_api_key(&self) -> Option<String> {
        self.resolve_api_key(std::env::var(GEMINI_API_KEY_ENV).ok())
    }

    /// The API key, or an error naming both places it can be set
    pub fn require_gemini_api_key(&self) -> Result<String> {
        self.gemini_api_key().ok_or_else(|| {
            Error::Config(format!(
                "No Gemini API key: set {} or run `critic config --init-secrets` \
                 and fill in api_key",
                GEMINI_API_KEY_ENV
            ))
        })
    }

    fn resolve_api_key(&self, from_env: Option<String>) -> Option<String> {
        let env_key = from_env
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if env_key.is_some() {
            debug!(source = GEMINI_API_KEY_ENV, "Using Gemini API key");
            return env_key;
        }

        let file_key = self.gemini.api_key.clone().filter(|key| !key.is_empty());
        if file_key.is_some() {
            debug!(source = "secrets.toml", "Using Gemini API key");
        }
        file_key
    }

    /// Write an empty secrets file at the default location with mode 0600
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    /// Write an empty secrets file at `path`; an existing file is left alone
    pub fn create_template_at(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        std::fs::write(path, SECRETS_TEMPLATE).map_err(Error::Io)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
                .map_err(Error::Io)?;
        }

        warn!(path = %path.display(), "Created secrets file; add your Gemini API key to it");
        Ok(())
    }
}

#[cfg(unix)]
fn check_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "Secrets file {} has insecure permissions {:o}; run: chmod 600 {}",
            path.display(),
            mode,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
