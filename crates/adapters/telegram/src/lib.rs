//! # acswitch-adapter-telegram
//!
//! Telegram Bot API transport — long-polls `getUpdates` for commands and
//! answers with `sendMessage`.
//!
//! Only plain text messages are surfaced; every other update kind is
//! acknowledged (the offset moves past it) and dropped.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `acswitch-app` and `acswitch-domain`.

mod api;
mod config;
mod error;

pub use config::TelegramConfig;
pub use error::TelegramError;

use std::fmt;

use acswitch_app::ports::{ChatTransport, IncomingMessage};
use acswitch_domain::error::AcSwitchError;

use api::{ApiResponse, BotUser, GetUpdates, SendMessage, Update};

/// [`ChatTransport`] over the Telegram Bot HTTP API.
pub struct TelegramTransport {
    client: reqwest::Client,
    /// `<api_base>/bot<token>`; never logged.
    endpoint: String,
    poll_timeout_secs: u64,
    offset: i64,
}

impl TelegramTransport {
    /// Build a transport for the bot identified by `token`.
    ///
    /// # Errors
    ///
    /// Returns [`TelegramError::Http`] if the HTTP client cannot be built.
    pub fn new(token: &str, config: &TelegramConfig) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{token}", config.api_base.trim_end_matches('/')),
            poll_timeout_secs: config.poll_timeout_secs,
            offset: 0,
        })
    }

    /// Ask the API for the bot's own `@username`.
    ///
    /// # Errors
    ///
    /// Returns a [`TelegramError`] if the request fails or the token is
    /// rejected.
    pub async fn bot_username(&self) -> Result<Option<String>, TelegramError> {
        let me = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await?
            .json::<ApiResponse<BotUser>>()
            .await?
            .into_result()?;
        Ok(me.username)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.endpoint)
    }

    async fn get_updates(&mut self) -> Result<Vec<IncomingMessage>, TelegramError> {
        let body = GetUpdates {
            offset: self.offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: &["message"],
        };
        let updates = self
            .client
            .post(self.method_url("getUpdates"))
            .json(&body)
            .send()
            .await?
            .json::<ApiResponse<Vec<Update>>>()
            .await?
            .into_result()?;

        let messages = api::into_messages(updates, &mut self.offset);
        if !messages.is_empty() {
            tracing::debug!(count = messages.len(), offset = self.offset, "updates received");
        }
        Ok(messages)
    }

    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        self.client
            .post(self.method_url("sendMessage"))
            .json(&SendMessage { chat_id, text })
            .send()
            .await?
            .json::<ApiResponse<serde_json::Value>>()
            .await?
            .into_result()?;
        Ok(())
    }
}

impl fmt::Debug for TelegramTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramTransport")
            .field("endpoint", &"<redacted>")
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl ChatTransport for TelegramTransport {
    async fn next_messages(&mut self) -> Result<Vec<IncomingMessage>, AcSwitchError> {
        self.get_updates().await.map_err(AcSwitchError::from)
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), AcSwitchError> {
        self.send_message(chat_id, text)
            .await
            .map_err(AcSwitchError::from)
    }
}
