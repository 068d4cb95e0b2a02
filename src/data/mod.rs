//! Market data model and providers

pub mod yahoo;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators::forward_fill;

pub use yahoo::YahooClient;

/// Yahoo Finance ticker for the Nifty 50 index
pub const NIFTY50_TICKER: &str = "^NSEI";

/// Bar size of a price series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interval {
    Daily,
    Weekly,
    Monthly,
}

impl Interval {
    /// Interval code understood by the chart API
    pub fn as_query(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
            Interval::Monthly => "1mo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
            Interval::Monthly => "monthly",
        }
    }
}

/// OHLCV bar. The chart API returns `null` for bars it has no prints for,
/// so every price is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceSeries {
    pub ticker: String,
    pub interval: Interval,
    pub candles: Vec<Candle>,
}

impl PriceSeries {
    pub fn new(ticker: impl Into<String>, interval: Interval, candles: Vec<Candle>) -> Self {
        Self {
            ticker: ticker.into(),
            interval,
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Closes with gaps forward filled; leading gaps stay NaN
    pub fn closes_filled(&self) -> Vec<f64> {
        let raw: Vec<f64> = self
            .candles
            .iter()
            .map(|c| c.close.unwrap_or(f64::NAN))
            .collect();
        forward_fill(&raw)
    }

    /// Candles with every missing field carried over from the previous bar
    pub fn candles_filled(&self) -> Vec<Candle> {
        let mut prev: Option<Candle> = None;
        self.candles
            .iter()
            .map(|c| {
                let filled = match &prev {
                    Some(p) => Candle {
                        timestamp: c.timestamp,
                        open: c.open.or(p.open),
                        high: c.high.or(p.high),
                        low: c.low.or(p.low),
                        close: c.close.or(p.close),
                        volume: c.volume.or(p.volume),
                    },
                    None => c.clone(),
                };
                prev = Some(filled.clone());
                filled
            })
            .collect()
    }

    pub fn last_timestamp(&self) -> Option<DateTime<Utc>> {
        self.candles.last().map(|c| c.timestamp)
    }
}

/// Value `offset` positions from the end (1 = last). Out of range or NaN
/// readings fall back to `default`.
pub fn safe_last(values: &[f64], offset: usize, default: f64) -> f64 {
    if offset == 0 || offset > values.len() {
        return default;
    }
    let value = values[values.len() - offset];
    if value.is_nan() { default } else { value }
}
