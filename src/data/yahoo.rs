//! Yahoo Finance chart API client
//! OHLCV candles for daily, weekly and monthly intervals

use chrono::{DateTime, Duration, TimeZone, Utc};
use reqwest::Client;
use serde_json::Value;

use crate::data::{Candle, Interval, PriceSeries};
use crate::error::{BotError, Result};

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Days of history requested for daily and weekly candles
const LOOKBACK_DAYS: i64 = 365;
/// Extra history for monthly candles so the RSI window has enough bars
const MONTHLY_EXTRA_DAYS: i64 = 365 * 2;

pub struct YahooClient {
    client: Client,
    base_url: String,
}

impl YahooClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch candles between `start` and `end`
    pub async fn fetch_series(
        &self,
        ticker: &str,
        interval: Interval,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<PriceSeries> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        log::debug!(
            "📥 Fetching {} {} candles {} → {}",
            ticker,
            interval.label(),
            start.date_naive(),
            end.date_naive()
        );

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("period1", start.timestamp().to_string()),
                ("period2", end.timestamp().to_string()),
                ("interval", interval.as_query().to_string()),
                ("includePrePost", "false".to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|json| chart_error(&json))
                .unwrap_or(body);
            return Err(BotError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let json: Value = serde_json::from_str(&body)?;
        parse_chart(ticker, interval, &json)
    }

    /// Fetch the standard look-back window for `interval` ending at `now`.
    /// Monthly candles reach two extra years back.
    pub async fn fetch_window(
        &self,
        ticker: &str,
        interval: Interval,
        now: DateTime<Utc>,
    ) -> Result<PriceSeries> {
        let mut start = now - Duration::days(LOOKBACK_DAYS);
        if interval == Interval::Monthly {
            start -= Duration::days(MONTHLY_EXTRA_DAYS);
        }
        let series = self.fetch_series(ticker, interval, start, now).await?;
        if series.is_empty() {
            return Err(BotError::EmptyData(interval.label().to_string()));
        }
        Ok(series)
    }
}

fn chart_error(json: &Value) -> Option<String> {
    let error = json.get("chart")?.get("error")?;
    if error.is_null() {
        return None;
    }
    let code = error.get("code").and_then(|v| v.as_str()).unwrap_or("error");
    let description = error
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or("");
    Some(format!("{}: {}", code, description))
}

/// Parse a chart API payload into a price series.
/// A payload without a result or timestamps is an empty series.
pub fn parse_chart(ticker: &str, interval: Interval, json: &Value) -> Result<PriceSeries> {
    if let Some(message) = chart_error(json) {
        return Err(BotError::Upstream {
            status: 200,
            message,
        });
    }

    let result = match json
        .get("chart")
        .and_then(|c| c.get("result"))
        .and_then(|r| r.as_array())
        .and_then(|r| r.first())
    {
        Some(result) => result,
        None => return Ok(PriceSeries::new(ticker, interval, Vec::new())),
    };

    let timestamps: Vec<i64> = result
        .get("timestamp")
        .and_then(|t| t.as_array())
        .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
        .unwrap_or_default();

    let quote = result
        .get("indicators")
        .and_then(|i| i.get("quote"))
        .and_then(|q| q.as_array())
        .and_then(|q| q.first());

    let column = |name: &str| -> Vec<Option<f64>> {
        quote
            .and_then(|q| q.get(name))
            .and_then(|c| c.as_array())
            .map(|arr| arr.iter().map(|v| v.as_f64()).collect())
            .unwrap_or_default()
    };
    let open = column("open");
    let high = column("high");
    let low = column("low");
    let close = column("close");
    let volume = column("volume");

    let at = |col: &[Option<f64>], i: usize| col.get(i).copied().flatten();

    let mut candles = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let Some(timestamp) = Utc.timestamp_opt(ts, 0).single() else {
            log::warn!("⚠️ Skipping bar with invalid timestamp {}", ts);
            continue;
        };
        candles.push(Candle {
            timestamp,
            open: at(&open, i),
            high: at(&high, i),
            low: at(&low, i),
            close: at(&close, i),
            volume: at(&volume, i),
        });
    }

    candles.sort_by_key(|c| c.timestamp);
    Ok(PriceSeries::new(ticker, interval, candles))
}
