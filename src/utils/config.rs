// Configuration utilities
use std::path::PathBuf;

use crate::data::yahoo::DEFAULT_YAHOO_BASE_URL;
use crate::data::NIFTY50_TICKER;
use crate::error::{BotError, Result};
use crate::indicators::rsi::DEFAULT_RSI_PERIOD;
use crate::notify::telegram::DEFAULT_TELEGRAM_API_URL;

pub const TOKEN_PLACEHOLDER: &str = "YOUR_TELEGRAM_BOT_TOKEN";
pub const CHAT_ID_PLACEHOLDER: &str = "YOUR_TELEGRAM_CHAT_ID";

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub debug: bool,
    pub port: u16,
    pub ticker: String,
    pub output_dir: PathBuf,
    pub rsi_period: usize,
    pub yahoo_base_url: String,
    pub telegram_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            telegram_bot_token: TOKEN_PLACEHOLDER.to_string(),
            telegram_chat_id: CHAT_ID_PLACEHOLDER.to_string(),
            debug: false,
            port: 8000,
            ticker: NIFTY50_TICKER.to_string(),
            output_dir: PathBuf::from("output"),
            rsi_period: DEFAULT_RSI_PERIOD,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            telegram_api_url: DEFAULT_TELEGRAM_API_URL.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment, after `.env` if one exists
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(v) = lookup("TELEGRAM_BOT_TOKEN") {
            config.telegram_bot_token = v;
        }
        if let Some(v) = lookup("TELEGRAM_CHAT_ID") {
            config.telegram_chat_id = v;
        }
        if let Some(v) = lookup("DEBUG") {
            config.debug = v.trim().eq_ignore_ascii_case("true");
        }
        if let Some(v) = lookup("PORT") {
            config.port = parse_number("PORT", &v)?;
        }
        if let Some(v) = lookup("NIFTY_TICKER") {
            config.ticker = v;
        }
        if let Some(v) = lookup("OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        if let Some(v) = lookup("RSI_PERIOD") {
            let period: usize = parse_number("RSI_PERIOD", &v)?;
            if period == 0 {
                return Err(BotError::Config("RSI_PERIOD must be positive".to_string()));
            }
            config.rsi_period = period;
        }
        if let Some(v) = lookup("YAHOO_BASE_URL") {
            config.yahoo_base_url = v;
        }
        if let Some(v) = lookup("TELEGRAM_API_URL") {
            config.telegram_api_url = v;
        }

        Ok(config)
    }

    /// Telegram is only used once both credentials are set to real values
    pub fn telegram_enabled(&self) -> bool {
        let token = self.telegram_bot_token.trim();
        let chat = self.telegram_chat_id.trim();
        !token.is_empty() && !chat.is_empty() && token != TOKEN_PLACEHOLDER && chat != CHAT_ID_PLACEHOLDER
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| BotError::Config(format!("{} must be a number, got {:?}", key, value)))
}
