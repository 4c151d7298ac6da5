//! Telegram transport configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Bot API endpoint and polling settings. The bot token lives at the top of
/// the application config and is passed separately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    /// Bot API base URL, without the `/bot<token>` suffix.
    pub api_base: String,
    /// Long-poll timeout passed to `getUpdates`, in seconds.
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// HTTP timeout for a single request: the long poll plus some slack.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs + 10)
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.telegram.org".to_string(),
            poll_timeout_secs: 30,
        }
    }
}
