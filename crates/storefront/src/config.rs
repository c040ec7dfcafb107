//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MYSHOP_API_BASE_URL` - Base URL of the shop backend, including the
//!   `/api` prefix (e.g., `http://localhost:8080/api`)
//!
//! ## Optional
//! - `MYSHOP_STATE_DIR` - Directory for persisted session state
//!   (default: `.myshop`)
//! - `MYSHOP_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_STATE_DIR: &str = ".myshop";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    /// Base URL of the shop backend, including the `/api` prefix.
    pub api_base_url: Url,
    /// Directory for persisted session state.
    pub state_dir: PathBuf,
    /// HTTP request timeout.
    pub http_timeout: Duration,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base_url = parse_base_url(&get_required_env("MYSHOP_API_BASE_URL")?)?;
        let state_dir = PathBuf::from(get_env_or_default("MYSHOP_STATE_DIR", DEFAULT_STATE_DIR));
        let timeout_secs = get_env_or_default(
            "MYSHOP_HTTP_TIMEOUT_SECS",
            &DEFAULT_HTTP_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("MYSHOP_HTTP_TIMEOUT_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_base_url,
            state_dir,
            http_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration directly, for tests and embedding.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `api_base_url` is not a valid URL.
    pub fn new(api_base_url: &str, state_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            api_base_url: parse_base_url(api_base_url)?,
            state_dir: state_dir.into(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        })
    }

    /// Path of the persisted session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.state_dir.join("session.json")
    }
}

/// Parse and normalize the API base URL (trailing slash trimmed).
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim_end_matches('/');
    Url::parse(trimmed)
        .map_err(|e| ConfigError::InvalidEnvVar("MYSHOP_API_BASE_URL".to_string(), e.to_string()))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_base_url_trims_trailing_slash() {
        let url = parse_base_url("http://localhost:8080/api/").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api");
    }

    #[test]
    fn test_parse_base_url_rejects_garbage() {
        assert!(parse_base_url("not a url").is_err());
    }

    #[test]
    fn test_new_defaults() {
        let config = ShopConfig::new("http://localhost:8080/api", "/tmp/myshop").unwrap();
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(
            config.session_file(),
            PathBuf::from("/tmp/myshop/session.json")
        );
    }
}
