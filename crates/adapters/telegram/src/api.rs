//! Bot API wire types and update conversion.

use serde::{Deserialize, Serialize};

use acswitch_app::ports::IncomingMessage;

use crate::error::TelegramError;

/// Envelope returned by every Bot API method.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

impl<T> ApiResponse<T> {
    pub(crate) fn into_result(self) -> Result<T, TelegramError> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            _ => Err(TelegramError::Api {
                description: self
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Update {
    update_id: i64,
    message: Option<Message>,
}

#[derive(Debug, Deserialize)]
struct Message {
    chat: Chat,
    from: Option<User>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Chat {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct User {
    id: i64,
}

/// `getMe` result: the bot's own account.
#[derive(Debug, Deserialize)]
pub(crate) struct BotUser {
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdates<'a> {
    pub offset: i64,
    pub timeout: u64,
    pub allowed_updates: &'a [&'a str],
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessage<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}

/// Keep text messages and advance `offset` past every update seen, so the
/// API does not deliver them again.
pub(crate) fn into_messages(updates: Vec<Update>, offset: &mut i64) -> Vec<IncomingMessage> {
    let mut messages = Vec::with_capacity(updates.len());
    for update in updates {
        *offset = (*offset).max(update.update_id + 1);
        let Some(message) = update.message else {
            continue;
        };
        let Some(text) = message.text else {
            continue;
        };
        messages.push(IncomingMessage {
            chat_id: message.chat.id,
            user_id: message.from.map(|user| user.id),
            text,
        });
    }
    messages
}
