// ABOUTME: Front end configuration read from the environment
// ABOUTME: Store base URL, transport token and the Telegram API location

use std::env;
use std::fmt;

use taskbot_config::constants::{
    API_BASE_URL, API_TOKEN, DEFAULT_TELEGRAM_API_URL, TELEGRAM_API_URL,
};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid URL in {var}: {source}")]
    InvalidUrl {
        var: &'static str,
        #[source]
        source: url::ParseError,
    },
}

/// Settings the front end and its transport need at startup
#[derive(Clone)]
pub struct BotConfig {
    /// Messaging transport access token
    pub api_token: String,
    /// Collection endpoint of the task store, e.g. `http://localhost:8000/tasks/`
    pub api_base_url: Url,
    pub telegram_api_url: Url,
}

impl BotConfig {
    pub fn new(api_token: impl Into<String>, api_base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_token: api_token.into(),
            api_base_url: parse_url(API_BASE_URL, api_base_url)?,
            telegram_api_url: parse_url(TELEGRAM_API_URL, DEFAULT_TELEGRAM_API_URL)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let api_token = required(API_TOKEN)?;
        let api_base_url = required(API_BASE_URL)?;
        let mut config = Self::new(api_token, &api_base_url)?;

        if let Ok(telegram_api_url) = env::var(TELEGRAM_API_URL) {
            config.telegram_api_url = parse_url(TELEGRAM_API_URL, &telegram_api_url)?;
        }
        Ok(config)
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("api_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url.as_str())
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .finish()
    }
}

fn required(var: &'static str) -> Result<String, ConfigError> {
    env::var(var)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::Missing(var))
}

fn parse_url(var: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|source| ConfigError::InvalidUrl { var, source })
}
