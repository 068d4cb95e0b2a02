//! Multi-timeframe RSI analysis and the snapshot the dashboard shows

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::data::{safe_last, PriceSeries};
use crate::indicators::{IndicatorValue, Rsi, TechnicalIndicator};
use crate::market::to_ist;
use crate::signals::{overall_signal, rsi_signal, Signal, Timeframe, NEUTRAL_RSI};

pub const NOT_UPDATED: &str = "Not updated yet";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeReading {
    pub rsi: f64,
    pub signal: Signal,
}

impl TimeframeReading {
    pub fn from_rsi(rsi: f64) -> Self {
        Self {
            rsi,
            signal: rsi_signal(rsi),
        }
    }
}

impl Default for TimeframeReading {
    fn default() -> Self {
        Self {
            rsi: 0.0,
            signal: Signal::Neutral,
        }
    }
}

/// Latest analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub last_updated: String,
    pub current_price: f64,
    pub price_change: f64,
    pub daily: TimeframeReading,
    pub weekly: TimeframeReading,
    pub monthly: TimeframeReading,
    pub overall_signal: Signal,
    pub recommendation_reason: String,
    /// Date of the last daily bar, if any
    pub as_of: Option<DateTime<Utc>>,
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            last_updated: NOT_UPDATED.to_string(),
            current_price: 0.0,
            price_change: 0.0,
            daily: TimeframeReading::default(),
            weekly: TimeframeReading::default(),
            monthly: TimeframeReading::default(),
            overall_signal: Signal::Neutral,
            recommendation_reason: "Waiting for first analysis".to_string(),
            as_of: None,
        }
    }
}

impl MarketSnapshot {
    pub fn is_updated(&self) -> bool {
        self.last_updated != NOT_UPDATED
    }

    pub fn reading(&self, timeframe: Timeframe) -> &TimeframeReading {
        match timeframe {
            Timeframe::Daily => &self.daily,
            Timeframe::Weekly => &self.weekly,
            Timeframe::Monthly => &self.monthly,
        }
    }

    /// Placeholder values for the HTML template, numbers with two decimals
    pub fn template_values(&self) -> HashMap<&'static str, String> {
        let mut values = HashMap::new();
        values.insert("last_updated", self.last_updated.clone());
        values.insert("current_price", format!("{:.2}", self.current_price));
        values.insert("price_change", format!("{:.2}", self.price_change));
        for (tf, key_rsi, key_signal, key_class) in [
            (Timeframe::Daily, "daily_rsi", "daily_signal", "daily_signal_class"),
            (Timeframe::Weekly, "weekly_rsi", "weekly_signal", "weekly_signal_class"),
            (Timeframe::Monthly, "monthly_rsi", "monthly_signal", "monthly_signal_class"),
        ] {
            let reading = self.reading(tf);
            values.insert(key_rsi, format!("{:.2}", reading.rsi));
            values.insert(key_signal, reading.signal.label().to_string());
            values.insert(key_class, reading.signal.css_class().to_string());
        }
        values.insert("overall_signal", self.overall_signal.label().to_string());
        values.insert("overall_signal_class", self.overall_signal.css_class().to_string());
        values.insert("recommendation_reason", self.recommendation_reason.clone());
        values
    }
}

/// Full RSI series for every bar of `series`, empty when there are no bars
pub fn rsi_series(series: &PriceSeries, period: usize) -> Vec<f64> {
    let rsi = Rsi::new(period);
    match rsi.calculate(&series.closes_filled()) {
        Ok(IndicatorValue::Vector(values)) => values,
        Err(e) => {
            log::debug!("{} skipped for {} {}: {}", rsi.name(), series.ticker, series.interval.label(), e);
            Vec::new()
        }
    }
}

/// Latest RSI of a series, neutral when there is nothing to read
pub fn latest_rsi(series: &PriceSeries, period: usize) -> f64 {
    safe_last(&rsi_series(series, period), 1, NEUTRAL_RSI)
}

/// Last close and its percentage change against the previous close
pub fn price_change(daily: &PriceSeries) -> (f64, f64) {
    let closes = daily.closes_filled();
    let current = safe_last(&closes, 1, 0.0);
    let previous = safe_last(&closes, 2, 0.0);
    let change = if previous != 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    };
    (current, change)
}

/// Analyse the three timeframes and build a fresh snapshot stamped `now`.
pub fn analyze(
    daily: &PriceSeries,
    weekly: &PriceSeries,
    monthly: &PriceSeries,
    period: usize,
    now: DateTime<Utc>,
) -> MarketSnapshot {
    let daily_rsi = latest_rsi(daily, period);
    let weekly_rsi = latest_rsi(weekly, period);
    let monthly_rsi = latest_rsi(monthly, period);

    let overall = overall_signal(daily_rsi, weekly_rsi, monthly_rsi);
    let (current_price, price_change) = price_change(daily);

    MarketSnapshot {
        last_updated: to_ist(now).format("%Y-%m-%d %H:%M:%S").to_string(),
        current_price,
        price_change,
        daily: TimeframeReading::from_rsi(daily_rsi),
        weekly: TimeframeReading::from_rsi(weekly_rsi),
        monthly: TimeframeReading::from_rsi(monthly_rsi),
        overall_signal: overall.signal,
        recommendation_reason: overall.reason,
        as_of: daily.last_timestamp(),
    }
}
