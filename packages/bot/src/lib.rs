// ABOUTME: Command front end for the Taskbot task store
// ABOUTME: Parses chat commands, calls the store over HTTP and renders replies; includes the Telegram transport

pub mod client;
pub mod commands;
pub mod config;
pub mod front_end;
pub mod handlers;
pub mod messages;
pub mod render;
pub mod telegram;

pub use client::{ApiResponse, ClientError, NewTask, TaskApi, TaskClient};
pub use config::{BotConfig, ConfigError};
pub use front_end::FrontEnd;
pub use telegram::{TelegramTransport, TransportError, UpdateBatch};
