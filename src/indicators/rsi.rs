// RSI indicator implementation
use crate::indicators::sma::rolling_mean;
use crate::indicators::{forward_fill, IndicatorValue, TechnicalIndicator};

pub const DEFAULT_RSI_PERIOD: usize = 14;

pub struct Rsi {
    period: usize,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Rsi { period }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Rsi::new(DEFAULT_RSI_PERIOD)
    }
}

/// RSI over simple rolling means of gains and losses.
///
/// Output is aligned with the input: one value per price. Missing prices are
/// forward filled first, an undefined change (first point, leading gaps)
/// counts as neither gain nor loss, and the rolling means warm up with
/// whatever data exists. A window without any loss reads 100.
pub fn calculate_rsi(prices: &[f64], period: usize) -> Vec<f64> {
    if prices.is_empty() {
        return Vec::new();
    }
    let filled = forward_fill(prices);

    let mut gains = Vec::with_capacity(filled.len());
    let mut losses = Vec::with_capacity(filled.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in filled.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(if delta > 0.0 { delta } else { 0.0 });
        losses.push(if delta < 0.0 { -delta } else { 0.0 });
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    avg_gain
        .iter()
        .zip(avg_loss.iter())
        .map(|(&up, &down)| {
            // only an exactly zero loss is special; tiny losses divide as they are
            if down == 0.0 {
                return 100.0;
            }
            let rs = up / down;
            let rsi = 100.0 - 100.0 / (1.0 + rs);
            if rsi.is_nan() { 50.0 } else { rsi }
        })
        .collect()
}

impl TechnicalIndicator for Rsi {
    fn calculate(&self, prices: &[f64]) -> Result<IndicatorValue, String> {
        if prices.is_empty() {
            return Err("Not enough data for RSI".to_string());
        }
        Ok(IndicatorValue::Vector(calculate_rsi(prices, self.period)))
    }

    fn name(&self) -> &str {
        "RSI"
    }
}
