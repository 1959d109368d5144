// ABOUTME: Library side of the taskbot binary
// ABOUTME: Server assembly, bot startup, configuration and logging setup

pub mod bot;
pub mod config;
pub mod logging;
pub mod server;

pub use config::{ConfigError, ServerConfig};
