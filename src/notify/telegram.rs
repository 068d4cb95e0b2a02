//! Telegram Bot API sender

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{BotError, Result};
use crate::notify::Notifier;

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(api_url: &str, token: &str, chat_id: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(15))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/bot{}/sendMessage", api_url.trim_end_matches('/'), token),
            chat_id: chat_id.to_string(),
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode: "Markdown",
        };
        let resp = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        let json: Value = resp.json().await.unwrap_or(Value::Null);

        let ok = json.get("ok").and_then(|v| v.as_bool()).unwrap_or(false);
        if !status.is_success() || !ok {
            let description = json
                .get("description")
                .and_then(|v| v.as_str())
                .unwrap_or("no description");
            return Err(BotError::Notify(format!(
                "Telegram rejected message ({}): {}",
                status.as_u16(),
                description
            )));
        }

        log::info!("📨 Telegram message sent to {}", self.chat_id);
        Ok(())
    }

    fn name(&self) -> &str {
        "telegram"
    }
}
