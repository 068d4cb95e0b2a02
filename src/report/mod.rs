//! Telegram Markdown messages built from a snapshot

use chrono::{DateTime, Utc};

use crate::analysis::MarketSnapshot;
use crate::market::to_ist;
use crate::signals::Timeframe;

/// Intraday update sent while the market is open
pub fn update_message(snapshot: &MarketSnapshot) -> String {
    let mut msg = String::new();
    msg.push_str(&format!("*Nifty50 Update: {}*\n\n", snapshot.last_updated));
    msg.push_str(&format!(
        "*Current Price:* {:.2} ({:.2}%)\n\n",
        snapshot.current_price, snapshot.price_change
    ));
    msg.push_str("*RSI Analysis:*\n");
    for tf in Timeframe::ALL {
        let reading = snapshot.reading(tf);
        msg.push_str(&format!(
            "• {}: {:.2} - {}\n",
            tf.name(),
            reading.rsi,
            reading.signal
        ));
    }
    msg.push_str(&format!("\n*Recommendation: {}*\n", snapshot.overall_signal));
    msg.push_str(&snapshot.recommendation_reason);
    msg.push('\n');
    msg
}

/// End-of-day summary. Dated by the last daily bar, or `now` without one.
pub fn daily_summary(snapshot: &MarketSnapshot, now: DateTime<Utc>) -> String {
    let date = to_ist(snapshot.as_of.unwrap_or(now))
        .format("%d %b %Y")
        .to_string();

    let mut msg = String::new();
    msg.push_str(&format!("*Nifty50 Daily Summary: {}*\n\n", date));
    msg.push_str(&format!(
        "*Closing Price:* {:.2} ({:.2}%)\n\n",
        snapshot.current_price, snapshot.price_change
    ));
    msg.push_str("*RSI Analysis:*\n");
    for tf in Timeframe::ALL {
        let reading = snapshot.reading(tf);
        msg.push_str(&format!(
            "• {} RSI: {:.2} - {}\n",
            tf.name(),
            reading.rsi,
            reading.signal
        ));
    }
    msg.push_str(&format!(
        "\n*Overall Recommendation: {}*\n",
        snapshot.overall_signal
    ));
    msg.push_str(&snapshot.recommendation_reason);
    msg.push_str("\n\nNext update will be available after market open tomorrow.\n");
    msg
}
