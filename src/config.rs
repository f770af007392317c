use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::error::ConfigError;

pub const SEARCH_API_KEY_VAR: &str = "SERPER_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";
pub const GEMINI_MODEL_VAR: &str = "GEMINI_MODEL";

pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";
pub const DEFAULT_READER_URL: &str = "https://r.jina.ai";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SEARCH_REGION: &str = "us";
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Process configuration, built once at startup and shared as `Arc<Config>`.
///
/// Only the credentials and the preferred model come from the environment.
/// The upstream endpoints are fixed; they are fields so tests can aim them at
/// local fixture servers.
#[derive(Debug, Clone)]
pub struct Config {
    pub search_api_key: String,
    pub gemini_api_key: Option<String>,
    pub default_model: String,
    pub search_url: String,
    pub reader_url: String,
    pub gemini_base_url: String,
    pub search_region: String,
    pub http_timeout: Duration,
}

impl Config {
    /// Load `.env` (if present) and read the process environment.
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let search_api_key =
            get(SEARCH_API_KEY_VAR).ok_or(ConfigError::MissingVar(SEARCH_API_KEY_VAR))?;

        Ok(Config {
            search_api_key,
            gemini_api_key: get(GEMINI_API_KEY_VAR),
            default_model: get(GEMINI_MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ..Config::with_search_key("")
        })
    }

    /// A config with every fixed default and the given search credential.
    pub fn with_search_key(search_api_key: &str) -> Config {
        Config {
            search_api_key: search_api_key.to_string(),
            gemini_api_key: None,
            default_model: DEFAULT_MODEL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            reader_url: DEFAULT_READER_URL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            search_region: DEFAULT_SEARCH_REGION.to_string(),
            http_timeout: HTTP_TIMEOUT,
        }
    }
}
