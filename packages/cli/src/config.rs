// ABOUTME: Server configuration from environment variables
// ABOUTME: Bind address, storage location and CORS origin, with command-line overrides

use std::env;
use std::num::ParseIntError;

use taskbot_config::constants::{
    CORS_ORIGIN, DATABASE_URL, DEFAULT_DATABASE_URL, DEFAULT_HOST, DEFAULT_PORT, PORT,
    TASKBOT_HOST,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// SQLite URL, or `memory` for the in-memory store
    pub database_url: String,
    pub cors_origin: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var(TASKBOT_HOST).unwrap_or_else(|_| DEFAULT_HOST.to_string());

        let port = match env::var(PORT) {
            Ok(port_str) => port_str.trim().parse::<u16>()?,
            Err(_) => DEFAULT_PORT,
        };
        validate_port(port)?;

        let database_url =
            env::var(DATABASE_URL).unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

        let cors_origin = env::var(CORS_ORIGIN)
            .ok()
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty());

        Ok(Self {
            host,
            port,
            database_url,
            cors_origin,
        })
    }

    /// Apply command-line flags on top of the environment
    pub fn with_overrides(
        mut self,
        host: Option<String>,
        port: Option<u16>,
        database_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        validate_port(self.port)?;
        Ok(self)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn validate_port(port: u16) -> Result<(), ConfigError> {
    if port == 0 {
        return Err(ConfigError::PortOutOfRange(port));
    }
    Ok(())
}
