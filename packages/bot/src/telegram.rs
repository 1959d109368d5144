// ABOUTME: Telegram Bot API transport for the command front end
// ABOUTME: Long-polls getUpdates, hands each text message to the front end on its own task, replies via sendMessage

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use url::Url;

use crate::front_end::FrontEnd;

/// Seconds the Bot API holds a getUpdates request open
const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// Pause after a failed poll before trying again
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error: {0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
pub struct TelegramResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramUpdate {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<TelegramMessage>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramMessage {
    pub message_id: i64,
    pub chat: TelegramChat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelegramChat {
    pub id: i64,
}

/// One getUpdates answer
#[derive(Debug, Default)]
pub struct UpdateBatch {
    /// Updates that parsed; malformed ones are dropped
    pub updates: Vec<TelegramUpdate>,
    /// Offset just past every update received, parsed or not
    pub next_offset: Option<i64>,
}

impl UpdateBatch {
    fn from_raw(raw: Vec<serde_json::Value>) -> Self {
        let next_offset = raw
            .iter()
            .filter_map(|value| value.get("update_id").and_then(serde_json::Value::as_i64))
            .map(|update_id| update_id + 1)
            .max();

        let updates = raw
            .into_iter()
            .filter_map(|value| match serde_json::from_value::<TelegramUpdate>(value) {
                Ok(update) => Some(update),
                Err(e) => {
                    warn!("Skipping malformed Telegram update: {}", e);
                    None
                }
            })
            .collect();

        Self {
            updates,
            next_offset,
        }
    }
}

#[derive(Debug, Serialize)]
struct GetUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i64>,
    timeout: u64,
    allowed_updates: [&'static str; 1],
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: i64,
    text: &'a str,
    reply_to_message_id: i64,
}

pub struct TelegramTransport {
    http: reqwest::Client,
    api_url: Url,
    token: String,
    front_end: Arc<FrontEnd>,
}

impl TelegramTransport {
    pub fn new(api_url: Url, token: impl Into<String>, front_end: Arc<FrontEnd>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_url,
            token: token.into(),
            front_end,
        }
    }

    async fn call<P: Serialize, R: DeserializeOwned>(
        &self,
        method: &str,
        payload: &P,
    ) -> Result<R, TransportError> {
        let url = format!(
            "{}/bot{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            self.token,
            method
        );

        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await?
            .json::<TelegramResponse<R>>()
            .await?;

        match (response.ok, response.result) {
            (true, Some(result)) => Ok(result),
            _ => {
                let message = response
                    .description
                    .unwrap_or_else(|| "Unknown Telegram API error".to_string());
                error!("Telegram API error on {}: {}", method, message);
                Err(TransportError::Api(message))
            }
        }
    }

    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout: u64,
    ) -> Result<UpdateBatch, TransportError> {
        let raw: Vec<serde_json::Value> = self
            .call(
                "getUpdates",
                &GetUpdates {
                    offset,
                    timeout,
                    allowed_updates: ["message"],
                },
            )
            .await?;
        Ok(UpdateBatch::from_raw(raw))
    }

    pub async fn send_reply(
        &self,
        chat_id: i64,
        reply_to_message_id: i64,
        text: &str,
    ) -> Result<(), TransportError> {
        let _: serde_json::Value = self
            .call(
                "sendMessage",
                &SendMessage {
                    chat_id,
                    text,
                    reply_to_message_id,
                },
            )
            .await?;
        debug!("Reply sent to chat {}", chat_id);
        Ok(())
    }

    /// Acknowledge updates queued before startup without answering them.
    ///
    /// Returns the offset to continue polling from.
    pub async fn skip_pending_updates(&self) -> Result<Option<i64>, TransportError> {
        let pending = self.get_updates(None, 0).await?;
        let next = pending.next_offset;
        if let Some(next) = next {
            info!("Skipped {} pending update(s)", pending.updates.len());
            // Confirm them with the server so they are not redelivered
            self.get_updates(Some(next), 0).await?;
        }
        Ok(next)
    }

    /// Fetch one batch of updates and spawn a handler per text message.
    ///
    /// Returns the next offset and the spawned tasks.
    pub async fn poll_once(
        self: &Arc<Self>,
        offset: Option<i64>,
        timeout: u64,
    ) -> Result<(Option<i64>, Vec<JoinHandle<()>>), TransportError> {
        let batch = self.get_updates(offset, timeout).await?;
        let next = match (offset, batch.next_offset) {
            (Some(current), Some(received)) => Some(current.max(received)),
            (current, received) => received.or(current),
        };

        let handles = batch
            .updates
            .into_iter()
            .filter_map(|update| self.dispatch(update))
            .collect();
        Ok((next, handles))
    }

    fn dispatch(self: &Arc<Self>, update: TelegramUpdate) -> Option<JoinHandle<()>> {
        let message = update.message?;
        let chat_id = message.chat.id;
        let message_id = message.message_id;
        let text = message.text?;
        let transport = Arc::clone(self);

        Some(tokio::spawn(async move {
            let Some(reply) = transport.front_end.handle_message(&text).await else {
                return;
            };
            if let Err(e) = transport.send_reply(chat_id, message_id, &reply).await {
                warn!("Failed to reply in chat {}: {}", chat_id, e);
            }
        }))
    }

    /// Poll forever; failed polls are logged and retried
    pub async fn run(self: Arc<Self>) -> Result<(), TransportError> {
        let mut offset = self.skip_pending_updates().await?;
        info!("Telegram transport polling for updates");

        loop {
            match self.poll_once(offset, LONG_POLL_TIMEOUT_SECS).await {
                Ok((next, _)) => offset = next,
                Err(e) => {
                    warn!("Polling Telegram failed: {}", e);
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                }
            }
        }
    }
}
