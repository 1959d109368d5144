// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Taskbot

// Task store server
pub const TASKBOT_HOST: &str = "TASKBOT_HOST";
pub const PORT: &str = "PORT";
pub const DATABASE_URL: &str = "DATABASE_URL";
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Command front end
pub const API_TOKEN: &str = "API_TOKEN";
pub const API_BASE_URL: &str = "API_BASE_URL";
pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// Defaults
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_DATABASE_URL: &str = "sqlite://tasks.db?mode=rwc";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// `DATABASE_URL` value selecting the non-persistent in-memory store
pub const MEMORY_DATABASE: &str = "memory";
