// ABOUTME: Chat bot startup
// ABOUTME: Builds the front end from its configuration and runs the Telegram transport

use std::sync::Arc;

use anyhow::Context;
use taskbot_bot::{BotConfig, FrontEnd, TelegramTransport};
use tracing::info;

pub async fn run(config: BotConfig) -> anyhow::Result<()> {
    info!("Starting bot against task store at {}", config.api_base_url);

    let front_end = Arc::new(FrontEnd::new(&config));
    let mut commands: Vec<_> = front_end.commands().collect();
    commands.sort_unstable();
    info!("Answering commands: /{}", commands.join(", /"));

    let transport = Arc::new(TelegramTransport::new(
        config.telegram_api_url.clone(),
        config.api_token.clone(),
        front_end,
    ));

    tokio::select! {
        result = transport.run() => result.context("Telegram transport stopped"),
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            Ok(())
        }
    }
}
