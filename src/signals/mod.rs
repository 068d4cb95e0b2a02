//! RSI signals: per-timeframe readings and a weighted overall recommendation

use serde::{Deserialize, Serialize};
use std::fmt;

pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

/// Reading used in place of a missing RSI value
pub const NEUTRAL_RSI: f64 = 50.0;

const STRONG_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    Daily,
    Weekly,
    Monthly,
}

impl Timeframe {
    pub const ALL: [Timeframe; 3] = [Timeframe::Daily, Timeframe::Weekly, Timeframe::Monthly];

    /// Daily carries the most weight, monthly the least
    pub fn weight(&self) -> f64 {
        match self {
            Timeframe::Daily => 0.5,
            Timeframe::Weekly => 0.3,
            Timeframe::Monthly => 0.2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Timeframe::Daily => "Daily",
            Timeframe::Weekly => "Weekly",
            Timeframe::Monthly => "Monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Signal {
    pub fn label(&self) -> &'static str {
        match self {
            Signal::StrongBuy => "Strong Buy",
            Signal::Buy => "Buy",
            Signal::Neutral => "Neutral",
            Signal::Sell => "Sell",
            Signal::StrongSell => "Strong Sell",
        }
    }

    /// CSS class used by the dashboard
    pub fn css_class(&self) -> &'static str {
        match self {
            Signal::StrongBuy | Signal::Buy => "buy",
            Signal::Neutral => "neutral",
            Signal::Sell | Signal::StrongSell => "sell",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Buy below 30, sell above 70, neutral otherwise or when the reading is missing.
pub fn rsi_signal(rsi: f64) -> Signal {
    if rsi.is_nan() {
        Signal::Neutral
    } else if rsi < OVERSOLD {
        Signal::Buy
    } else if rsi > OVERBOUGHT {
        Signal::Sell
    } else {
        Signal::Neutral
    }
}

/// +1 oversold, -1 overbought, 0 otherwise
fn score(rsi: f64) -> i8 {
    let rsi = if rsi.is_nan() { NEUTRAL_RSI } else { rsi };
    if rsi > OVERBOUGHT {
        -1
    } else if rsi < OVERSOLD {
        1
    } else {
        0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallSignal {
    pub signal: Signal,
    pub score: f64,
    pub reason: String,
}

/// Weighted recommendation across the three timeframes.
pub fn overall_signal(daily: f64, weekly: f64, monthly: f64) -> OverallSignal {
    let scores = [
        (Timeframe::Daily, score(daily)),
        (Timeframe::Weekly, score(weekly)),
        (Timeframe::Monthly, score(monthly)),
    ];
    let total: f64 = scores
        .iter()
        .map(|(tf, s)| f64::from(*s) * tf.weight())
        .sum();

    let (signal, mut reason) = if total > STRONG_THRESHOLD {
        (Signal::StrongBuy, "Most timeframes show oversold conditions.".to_string())
    } else if total > 0.0 {
        (Signal::Buy, "RSI suggests bullish momentum building.".to_string())
    } else if total < -STRONG_THRESHOLD {
        (Signal::StrongSell, "Most timeframes show overbought conditions.".to_string())
    } else if total < 0.0 {
        (Signal::Sell, "RSI suggests bearish momentum building.".to_string())
    } else {
        (
            Signal::Neutral,
            "Conflicting signals across timeframes. Consider waiting.".to_string(),
        )
    };

    let details: Vec<String> = scores
        .iter()
        .filter_map(|(tf, s)| match s {
            1 => Some(format!("{} RSI indicates oversold conditions", tf.name())),
            -1 => Some(format!("{} RSI indicates overbought conditions", tf.name())),
            _ => None,
        })
        .collect();

    if !details.is_empty() {
        reason.push(' ');
        reason.push_str(&details.join(", "));
        reason.push('.');
    }

    OverallSignal {
        signal,
        score: total,
        reason,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_signal_thresholds() {
        assert_eq!(rsi_signal(29.99), Signal::Buy);
        assert_eq!(rsi_signal(30.0), Signal::Neutral);
        assert_eq!(rsi_signal(70.0), Signal::Neutral);
        assert_eq!(rsi_signal(70.01), Signal::Sell);
        assert_eq!(rsi_signal(f64::NAN), Signal::Neutral);
    }

    #[test]
    fn test_overall_all_neutral() {
        let overall = overall_signal(50.0, 45.0, 60.0);
        assert_eq!(overall.signal, Signal::Neutral);
        assert_eq!(
            overall.reason,
            "Conflicting signals across timeframes. Consider waiting."
        );
    }

    #[test]
    fn test_overall_daily_oversold_is_strong_buy() {
        let overall = overall_signal(20.0, 50.0, 50.0);
        assert_eq!(overall.signal, Signal::StrongBuy);
        assert_eq!(
            overall.reason,
            "Most timeframes show oversold conditions. Daily RSI indicates oversold conditions."
        );
    }

    #[test]
    fn test_overall_weekly_only_is_plain_sell() {
        // -0.3 is not strictly below the strong threshold
        let overall = overall_signal(50.0, 80.0, 50.0);
        assert_eq!(overall.signal, Signal::Sell);
        assert!(overall.reason.starts_with("RSI suggests bearish momentum building."));
        assert!(overall.reason.ends_with("Weekly RSI indicates overbought conditions."));
    }

    #[test]
    fn test_overall_conflicting_timeframes() {
        // 0.5 - 0.3 = 0.2 → Buy
        let overall = overall_signal(25.0, 75.0, 50.0);
        assert_eq!(overall.signal, Signal::Buy);
        assert_eq!(
            overall.reason,
            "RSI suggests bullish momentum building. Daily RSI indicates oversold conditions, \
             Weekly RSI indicates overbought conditions."
        );
    }

    #[test]
    fn test_overall_monthly_only() {
        let overall = overall_signal(50.0, 50.0, 85.0);
        assert_eq!(overall.signal, Signal::Sell);
        assert!((overall.score + 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_overall_nan_is_neutral() {
        let overall = overall_signal(f64::NAN, f64::NAN, f64::NAN);
        assert_eq!(overall.signal, Signal::Neutral);
    }

    #[test]
    fn test_signal_labels_and_classes() {
        assert_eq!(Signal::StrongSell.to_string(), "Strong Sell");
        assert_eq!(Signal::StrongBuy.css_class(), "buy");
        assert_eq!(Signal::Neutral.css_class(), "neutral");
        assert_eq!(
            serde_json::to_string(&Signal::StrongBuy).unwrap(),
            "\"Strong Buy\""
        );
    }
}
