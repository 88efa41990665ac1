//! Minimal Telegram Bot API client: long-poll `getUpdates` plus the
//! handful of outbound methods the bot uses. JSON over reqwest, typed
//! request/response structs, nothing else.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::bot::view::Reply;
use crate::error::BotError;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
    pub callback_query: Option<CallbackQuery>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    pub callback_data: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

pub struct TelegramClient {
    http: Client,
    base: String,
}

impl TelegramClient {
    pub fn new(http: Client, token: &str) -> Self {
        Self {
            http,
            base: format!("{TELEGRAM_API_BASE}/bot{token}"),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        payload: &serde_json::Value,
    ) -> Result<T, BotError> {
        let resp = self
            .http
            .post(format!("{}/{method}", self.base))
            .json(payload)
            .send()
            .await?;
        let body: ApiResponse<T> = resp.json().await?;
        if !body.ok {
            return Err(BotError::TelegramApiError(
                body.description
                    .unwrap_or_else(|| format!("{method} returned ok=false")),
            ));
        }
        body.result
            .ok_or_else(|| BotError::TelegramApiError(format!("{method}: empty result")))
    }

    pub async fn get_updates(
        &self,
        offset: i64,
        timeout_secs: u64,
    ) -> Result<Vec<Update>, BotError> {
        self.call(
            "getUpdates",
            &json!({
                "offset": offset,
                "timeout": timeout_secs,
                "allowed_updates": ["message", "callback_query"],
            }),
        )
        .await
    }

    pub async fn send_message(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError> {
        let mut payload = json!({
            "chat_id": chat_id,
            "text": reply.text,
            "parse_mode": "Markdown",
        });
        if let Some(keyboard) = &reply.keyboard {
            payload["reply_markup"] = serde_json::to_value(keyboard)?;
        }
        let _sent: Message = self.call("sendMessage", &payload).await?;
        Ok(())
    }

    pub async fn answer_callback(&self, callback_id: &str) -> Result<(), BotError> {
        let _ok: bool = self
            .call(
                "answerCallbackQuery",
                &json!({ "callback_query_id": callback_id }),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_message(&self, chat_id: i64, message_id: i64) -> Result<(), BotError> {
        let _ok: bool = self
            .call(
                "deleteMessage",
                &json!({ "chat_id": chat_id, "message_id": message_id }),
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_parsing_message_and_callback() {
        let updates: Vec<Update> = serde_json::from_str(
            r#"[
                {"update_id": 10, "message": {"message_id": 1, "from": {"id": 42}, "chat": {"id": 42}, "text": "/start"}},
                {"update_id": 11, "callback_query": {"id": "cb1", "from": {"id": 42}, "data": "buy",
                    "message": {"message_id": 2, "chat": {"id": 42}}}}
            ]"#,
        )
        .unwrap();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].message.as_ref().unwrap().text.as_deref(), Some("/start"));
        let cb = updates[1].callback_query.as_ref().unwrap();
        assert_eq!(cb.data.as_deref(), Some("buy"));
        assert_eq!(cb.from.id, 42);
    }

    #[test]
    fn test_api_error_envelope() {
        let body: ApiResponse<Vec<Update>> = serde_json::from_str(
            r#"{"ok": false, "description": "Unauthorized"}"#,
        )
        .unwrap();
        assert!(!body.ok);
        assert_eq!(body.description.as_deref(), Some("Unauthorized"));
    }
}
