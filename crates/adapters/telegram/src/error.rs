//! Telegram adapter error types.

use acswitch_domain::error::AcSwitchError;

/// Errors specific to the Telegram adapter.
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    /// The HTTP request failed or the body could not be decoded.
    ///
    /// The URL is stripped from the inner error since it embeds the token.
    #[error("telegram request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// The Bot API answered with `ok: false`.
    #[error("telegram API error: {description}")]
    Api {
        /// Human-readable reason returned by the API.
        description: String,
    },
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

impl From<TelegramError> for AcSwitchError {
    fn from(err: TelegramError) -> Self {
        Self::Transport(Box::new(err))
    }
}
