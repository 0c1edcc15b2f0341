//! Environment-based configuration for the Buffer CLI.
use reqwest::Url;
use thiserror::Error;

/// Environment variable holding the Buffer API token.
pub const API_KEY_ENV: &str = "BUFFER_API_KEY";
/// Optional override of the API endpoint, mainly for tests.
pub const API_URL_ENV: &str = "BUFFER_API_URL";

const DEFAULT_API_URL: &str = "https://api.buffer.com/";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "BUFFER_API_KEY environment variable is not set.\n\
         Get your token at https://publish.buffer.com/settings/api"
    )]
    MissingApiKey,
    #[error("invalid BUFFER_API_URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },
}

/// Resolved configuration: token plus the endpoint to POST against.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_url: Url,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an injected lookup, so tests never
    /// touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let api_key = lookup(API_KEY_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let raw_url = lookup(API_URL_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw_url).map_err(|e| ConfigError::InvalidApiUrl {
            url: raw_url,
            reason: e.to_string(),
        })?;

        Ok(Config { api_key, api_url })
    }
}
