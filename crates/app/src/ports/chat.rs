//! Chat transport port — where commands come from and replies go to.

use std::future::Future;

use acswitch_domain::error::AcSwitchError;

/// A text message received from a chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    /// Chat to reply into.
    pub chat_id: i64,
    /// Sender, when the transport knows it. Only used for logging.
    pub user_id: Option<i64>,
    pub text: String,
}

/// Receives chat messages and sends text replies.
pub trait ChatTransport {
    /// Wait for the next batch of messages.
    ///
    /// May return an empty batch when a long poll times out.
    fn next_messages(
        &mut self,
    ) -> impl Future<Output = Result<Vec<IncomingMessage>, AcSwitchError>> + Send;

    /// Send `text` to `chat_id`.
    fn reply(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl Future<Output = Result<(), AcSwitchError>> + Send;
}
