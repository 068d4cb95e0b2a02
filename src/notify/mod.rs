//! Outgoing notifications

pub mod telegram;

use async_trait::async_trait;

use crate::error::Result;
use crate::utils::config::Config;

pub use telegram::TelegramNotifier;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<()>;
    fn name(&self) -> &str;
}

/// Used when no channel is configured; drops every message
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        log::debug!("🔕 Notification skipped ({} chars)", text.len());
        Ok(())
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Telegram when credentials are configured, otherwise a no-op
pub fn from_config(config: &Config) -> Result<Box<dyn Notifier>> {
    if config.telegram_enabled() {
        Ok(Box::new(TelegramNotifier::new(
            &config.telegram_api_url,
            &config.telegram_bot_token,
            &config.telegram_chat_id,
        )?))
    } else {
        log::warn!("⚠️ Telegram credentials not set, notifications disabled");
        Ok(Box::new(NoopNotifier))
    }
}
