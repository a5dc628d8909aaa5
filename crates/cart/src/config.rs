//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARTKEEPER_API_URL` - Inventory/catalog service base URL (default: `http://localhost:3333`)
//! - `CARTKEEPER_API_TOKEN` - Bearer token sent to the inventory service
//! - `CARTKEEPER_STORAGE_DIR` - Directory holding the persisted cart (default: `.cartkeeper`)
//! - `CARTKEEPER_HTTP_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `CARTKEEPER_PRODUCT_CACHE_TTL_SECS` - Product metadata cache TTL (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_STORAGE_DIR: &str = ".cartkeeper";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PRODUCT_CACHE_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct CartConfig {
    /// Inventory/catalog service base URL
    pub api_url: Url,
    /// Optional bearer token for the inventory service
    pub api_token: Option<SecretString>,
    /// Directory for persisted cart state
    pub storage_dir: PathBuf,
    /// Timeout applied to each inventory request
    pub http_timeout: Duration,
    /// How long product metadata stays cached
    pub product_cache_ttl: Duration,
}

impl std::fmt::Debug for CartConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartConfig")
            .field("api_url", &self.api_url.as_str())
            .field(
                "api_token",
                &self.api_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("storage_dir", &self.storage_dir)
            .field("http_timeout", &self.http_timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .finish()
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("CARTKEEPER_API_URL", DEFAULT_API_URL))
            .map_err(|e| ConfigError::InvalidEnvVar("CARTKEEPER_API_URL".to_string(), e))?;
        let api_token = get_optional_env("CARTKEEPER_API_TOKEN").map(SecretString::from);
        let storage_dir =
            PathBuf::from(get_env_or_default("CARTKEEPER_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let http_timeout = get_secs_or_default(
            "CARTKEEPER_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?;
        let product_cache_ttl = get_secs_or_default(
            "CARTKEEPER_PRODUCT_CACHE_TTL_SECS",
            DEFAULT_PRODUCT_CACHE_TTL_SECS,
        )?;

        Ok(Self {
            api_url,
            api_token,
            storage_dir,
            http_timeout,
            product_cache_ttl,
        })
    }

    /// Configuration pointing at a specific service URL, other fields default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL cannot be parsed.
    pub fn with_api_url(api_url: &str) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(api_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CARTKEEPER_API_URL".to_string(), e))?;
        Ok(Self::with_defaults(api_url))
    }

    fn with_defaults(api_url: Url) -> Self {
        Self {
            api_url,
            api_token: None,
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            product_cache_ttl: Duration::from_secs(DEFAULT_PRODUCT_CACHE_TTL_SECS),
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse a base URL and make sure it ends with `/` so relative joins keep the
/// full path (e.g. `https://host/api` + `stock/1` -> `https://host/api/stock/1`).
fn parse_api_url(raw: &str) -> Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if url.cannot_be_a_base() {
        return Err(format!("'{raw}' cannot be used as a base URL"));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a duration in whole seconds with a default value.
fn get_secs_or_default(key: &str, default: u64) -> Result<Duration, ConfigError> {
    get_optional_env(key)
        .map_or(Ok(default), |value| value.parse::<u64>())
        .map(Duration::from_secs)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_parse_api_url_appends_trailing_slash() {
        let url = parse_api_url("https://shop.example.com/api").unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/api/");
        assert_eq!(
            url.join("stock/1").unwrap().as_str(),
            "https://shop.example.com/api/stock/1"
        );
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
        assert!(parse_api_url("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_default_settings() {
        let config = CartConfig::with_api_url(DEFAULT_API_URL).unwrap();
        assert_eq!(config.api_url.as_str(), "http://localhost:3333/");
        assert_eq!(config.storage_dir, PathBuf::from(".cartkeeper"));
        assert_eq!(config.http_timeout, Duration::from_secs(30));
        assert_eq!(config.product_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_with_api_url() {
        let config = CartConfig::with_api_url("http://127.0.0.1:4000").unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:4000/");
        assert!(CartConfig::with_api_url("::").is_err());
    }

    #[test]
    fn test_config_debug_redacts_token() {
        let config = CartConfig {
            api_token: Some(SecretString::from("super_secret_api_token")),
            ..CartConfig::with_api_url(DEFAULT_API_URL).unwrap()
        };
        assert_eq!(
            config.api_token.as_ref().unwrap().expose_secret(),
            "super_secret_api_token"
        );

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("localhost:3333"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_api_token"));
    }
}
