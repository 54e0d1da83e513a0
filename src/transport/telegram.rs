//! Telegram Bot API transport: long polling in, messages out.
//!
//! Deliberately thin: the Bot API is treated as an external
//! collaborator and only the calls the bot needs are wrapped.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::DeliveryError;
use super::ChatTransport;

const POLL_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub from: Option<User>,
    pub chat: Chat,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
}

pub struct TelegramTransport {
    api_base: String,
    client: Client,
}

impl TelegramTransport {
    pub fn new(bot_token: &str) -> Self {
        Self {
            api_base: format!("https://api.telegram.org/bot{bot_token}"),
            client: Client::new(),
        }
    }

    /// Long-poll for new updates after `offset`.
    pub async fn get_updates(&self, offset: i64) -> anyhow::Result<Vec<Update>> {
        let url = format!("{}/getUpdates", self.api_base);
        let response = self
            .client
            .get(&url)
            .query(&[("offset", offset), ("timeout", POLL_TIMEOUT_SECS as i64)])
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .send()
            .await?;

        let payload: Value = response.json().await?;
        if payload.get("ok").and_then(|v| v.as_bool()) != Some(true) {
            anyhow::bail!(
                "getUpdates failed: {}",
                payload
                    .get("description")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown error")
            );
        }

        let updates = payload
            .get("result")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .unwrap_or_default();
        Ok(updates)
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        formatted: bool,
    ) -> Result<(), DeliveryError> {
        let url = format!("{}/sendMessage", self.api_base);
        let mut body = json!({
            "chat_id": chat_id,
            "text": text,
        });
        if formatted {
            body["parse_mode"] = json!("HTML");
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|err| DeliveryError::Transport(err.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let description = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|v| {
                v.get("description")
                    .and_then(|d| d.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "unknown error".to_string());

        // The Bot API reports markup problems as entity-parse errors.
        if description.contains("parse") || description.contains("entit") {
            Err(DeliveryError::Format(description))
        } else if description.contains("too long") {
            Err(DeliveryError::TooLong {
                len: text.chars().count(),
                max: super::MAX_MESSAGE_LEN,
            })
        } else {
            Err(DeliveryError::Transport(description))
        }
    }
}
