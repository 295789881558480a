/*!
 * Thin Telegram Bot API client.
 *
 * Long-polls `getUpdates`, sends HTML messages with optional inline
 * keyboards, and maps raw updates into the core's `InboundEvent`. This is
 * the only module that knows what a Telegram update looks like; the
 * conversation core never sees one.
 */

use std::time::Duration;
use log::{debug, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::conversation::input::{InboundEvent, Payload};
use crate::conversation::replies::{Markup, Outgoing};
use crate::errors::TelegramError;
use crate::prompts::QUESTION_COUNT;
use crate::session::models::Level;

/// Telegram Bot API envelope
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    /// Whether the call succeeded
    ok: bool,
    /// Payload, present when ok
    result: Option<T>,
    /// Error description, present when not ok
    description: Option<String>,
}

/// One update from getUpdates
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    /// Monotonic update identifier
    pub update_id: i64,
    /// Plain message, if this update carries one
    pub message: Option<Message>,
    /// Button press, if this update carries one
    pub callback_query: Option<CallbackQuery>,
}

/// Incoming chat message
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    /// Chat the message arrived in
    pub chat: Chat,
    /// Message text, if any
    pub text: Option<String>,
}

/// Chat descriptor
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    /// Stable chat identifier, used as the user id
    pub id: i64,
}

/// Inline-button press
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    /// Callback identifier, must be acknowledged
    pub id: String,
    /// Callback payload set when the keyboard was built
    pub data: Option<String>,
    /// Message the pressed keyboard was attached to
    pub message: Option<Message>,
}

/// One inline keyboard button
#[derive(Debug, Serialize)]
struct InlineButton {
    /// Button label
    text: String,
    /// Payload delivered back on press
    callback_data: String,
}

/// An inbound event extracted from an update, plus the callback id to ack
#[derive(Debug)]
pub struct ExtractedEvent {
    /// The event for the conversation core
    pub event: InboundEvent,
    /// Callback query id, present for button presses
    pub callback_id: Option<String>,
}

/// Telegram Bot API client
#[derive(Debug)]
pub struct TelegramClient {
    /// HTTP client for API requests
    client: Client,
    /// Bot token
    token: String,
    /// Long-poll timeout in seconds
    poll_timeout_secs: u64,
    /// Next update offset
    offset: i64,
}

impl TelegramClient {
    /// Create a new client for the given bot token
    pub fn new(token: impl Into<String>, poll_timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                // Long poll plus headroom for the response itself
                .timeout(Duration::from_secs(poll_timeout_secs + 10))
                .build()
                .unwrap_or_default(),
            token: token.into(),
            poll_timeout_secs,
            offset: 0,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("https://api.telegram.org/bot{}/{}", self.token, method)
    }

    /// Fetch the next batch of updates, advancing the internal offset.
    pub async fn get_updates(&mut self) -> Result<Vec<Update>, TelegramError> {
        let body = json!({
            "offset": self.offset,
            "timeout": self.poll_timeout_secs,
            "allowed_updates": ["message", "callback_query"],
        });

        let updates: Vec<Update> = self.call("getUpdates", &body).await?;

        if let Some(last) = updates.last() {
            self.offset = last.update_id + 1;
        }

        Ok(updates)
    }

    /// Send one outbound message to a chat, rendering its markup.
    pub async fn send_message(&self, chat_id: i64, outgoing: &Outgoing) -> Result<(), TelegramError> {
        let mut body = json!({
            "chat_id": chat_id,
            "text": outgoing.text,
            "parse_mode": "HTML",
        });

        if let Some(keyboard) = render_markup(outgoing.markup) {
            body["reply_markup"] = json!({ "inline_keyboard": keyboard });
        }

        let _: serde_json::Value = self.call("sendMessage", &body).await?;
        Ok(())
    }

    /// Acknowledge a button press so the client stops its spinner.
    pub async fn answer_callback_query(&self, callback_id: &str) -> Result<(), TelegramError> {
        let body = json!({ "callback_query_id": callback_id });
        let result: Result<bool, TelegramError> = self.call("answerCallbackQuery", &body).await;
        if let Err(e) = result {
            // A stale callback id is harmless; log and move on
            warn!("Failed to answer callback query: {}", e);
        }
        Ok(())
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &str,
        body: &serde_json::Value,
    ) -> Result<T, TelegramError> {
        let response = self.client.post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::RequestFailed(format!("{}: {}", method, e)))?;

        let envelope: ApiResponse<T> = response.json().await
            .map_err(|e| TelegramError::ParseError(format!("{}: {}", method, e)))?;

        if !envelope.ok {
            return Err(TelegramError::ApiError {
                description: envelope.description.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        envelope.result.ok_or_else(|| TelegramError::ParseError(format!("{}: empty result", method)))
    }
}

/// Map a raw update to an inbound event, if it carries anything usable.
pub fn extract_event(update: &Update) -> Option<ExtractedEvent> {
    if let Some(message) = &update.message {
        let text = message.text.clone()?;
        return Some(ExtractedEvent {
            event: InboundEvent {
                user_id: message.chat.id,
                payload: Payload::Text(text),
            },
            callback_id: None,
        });
    }

    if let Some(callback) = &update.callback_query {
        let data = callback.data.clone()?;
        let chat_id = callback.message.as_ref().map(|m| m.chat.id)?;
        return Some(ExtractedEvent {
            event: InboundEvent {
                user_id: chat_id,
                payload: Payload::Button(data),
            },
            callback_id: Some(callback.id.clone()),
        });
    }

    debug!("Ignoring update {} with no usable content", update.update_id);
    None
}

/// Render a markup descriptor into inline keyboard rows.
fn render_markup(markup: Markup) -> Option<Vec<Vec<InlineButton>>> {
    match markup {
        Markup::None => None,
        Markup::LevelMenu => Some(vec![
            Level::ALL
                .iter()
                .map(|level| InlineButton {
                    text: level.as_str().to_string(),
                    callback_data: format!("level:{}", level.as_str().to_lowercase()),
                })
                .collect(),
        ]),
        Markup::AnswerGrid => Some(
            (1..=QUESTION_COUNT)
                .map(|question| {
                    ('a'..='d')
                        .map(|option| InlineButton {
                            text: format!("{}{}", question, option),
                            callback_data: format!("ans:{}{}", question, option),
                        })
                        .collect()
                })
                .collect(),
        ),
    }
}
