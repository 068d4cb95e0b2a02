//! PNG charts: daily candlesticks and multi-timeframe RSI

pub mod canvas;

use chrono::{DateTime, Duration, Utc};
use image::RgbImage;
use std::path::Path;

use crate::analysis::rsi_series;
use crate::data::PriceSeries;
use crate::error::{BotError, Result};
use crate::signals::{OVERBOUGHT, OVERSOLD};
use canvas::{Canvas, PlotArea, Scale, Stroke, BLUE, GREEN, ORANGE, PURPLE, RED};

pub const PRICE_CHART_FILE: &str = "price_chart.png";
pub const RSI_CHART_FILE: &str = "rsi_chart.png";

const PRICE_CHART_SIZE: (u32, u32) = (1200, 600);
const RSI_CHART_SIZE: (u32, u32) = (1200, 500);
const MARGIN: u32 = 50;

/// Daily candles shown on the price chart
const PRICE_WINDOW: usize = 90;
/// Daily RSI points, and the cap for the expanded weekly/monthly lines
const RSI_WINDOW: usize = 30;
const WEEKLY_POINTS: usize = 10;
const MONTHLY_POINTS: usize = 5;

/// Candlestick chart of the last 90 daily bars
pub fn render_price_chart(daily: &PriceSeries) -> Result<RgbImage> {
    let filled = daily.candles_filled();
    let bars: Vec<(f64, f64, f64, f64)> = filled
        .iter()
        .skip(filled.len().saturating_sub(PRICE_WINDOW))
        .filter_map(|c| Some((c.open?, c.high?, c.low?, c.close?)))
        .collect();
    if bars.len() < 2 {
        return Err(BotError::Chart(format!(
            "price chart needs at least 2 bars, got {}",
            bars.len()
        )));
    }

    let (width, height) = PRICE_CHART_SIZE;
    let area = PlotArea::with_margin(width, height, MARGIN);
    let low = bars.iter().map(|b| b.2).fold(f64::INFINITY, f64::min);
    let high = bars.iter().map(|b| b.1).fold(f64::NEG_INFINITY, f64::max);
    let pad = (high - low) * 0.05;
    let y = Scale::new(low - pad, high + pad, area.bottom, area.top);

    let mut canvas = Canvas::new(width, height);
    canvas.grid(&area, 6);

    let slot = area.width() / bars.len() as f64;
    let body_half = (slot * 0.35).max(1.0);
    for (i, &(open, high, low, close)) in bars.iter().enumerate() {
        let x = area.left + slot * (i as f64 + 0.5);
        let color = if close >= open { GREEN } else { RED };
        canvas.line((x, y.map(high)), (x, y.map(low)), color, Stroke::Solid, 1);
        canvas.fill_rect(x - body_half, y.map(open), x + body_half, y.map(close), color);
    }

    Ok(canvas.into_image())
}

/// Repeat each reading `repeat` times, `step` apart, up to `cap` points.
/// Lets the coarse timeframes share an axis with the daily line.
fn expand_points(
    points: &[(DateTime<Utc>, f64)],
    repeat: usize,
    step: Duration,
    cap: usize,
) -> Vec<(DateTime<Utc>, f64)> {
    let mut out = Vec::with_capacity(cap);
    for &(date, rsi) in points {
        if rsi.is_nan() {
            continue;
        }
        for i in 0..repeat {
            if out.len() < cap {
                out.push((date + step * i as i32, rsi));
            }
        }
    }
    out
}

fn tail<T: Clone>(items: &[T], n: usize) -> Vec<T> {
    items[items.len().saturating_sub(n)..].to_vec()
}

fn timeline(series: &PriceSeries, period: usize) -> Vec<(DateTime<Utc>, f64)> {
    series
        .candles
        .iter()
        .map(|c| c.timestamp)
        .zip(rsi_series(series, period))
        .collect()
}

/// RSI lines for all three timeframes with the 30/70 bands
pub fn render_rsi_chart(
    daily: &PriceSeries,
    weekly: &PriceSeries,
    monthly: &PriceSeries,
    period: usize,
) -> Result<RgbImage> {
    let daily_points = tail(&timeline(daily, period), RSI_WINDOW);
    if daily_points.len() < 2 {
        return Err(BotError::Chart(format!(
            "RSI chart needs at least 2 daily points, got {}",
            daily_points.len()
        )));
    }
    let weekly_points = expand_points(
        &tail(&timeline(weekly, period), WEEKLY_POINTS),
        5,
        Duration::days(1),
        RSI_WINDOW,
    );
    let monthly_points = expand_points(
        &tail(&timeline(monthly, period), MONTHLY_POINTS),
        6,
        Duration::days(5),
        RSI_WINDOW,
    );

    let all_dates = daily_points
        .iter()
        .chain(weekly_points.iter())
        .chain(monthly_points.iter())
        .map(|(d, _)| d.timestamp() as f64);
    let (x_min, x_max) = all_dates.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
        (lo.min(t), hi.max(t))
    });

    let (width, height) = RSI_CHART_SIZE;
    let area = PlotArea::with_margin(width, height, MARGIN);
    let x = Scale::new(x_min, x_max, area.left, area.right);
    let y = Scale::new(0.0, 100.0, area.bottom, area.top);

    let mut canvas = Canvas::new(width, height);
    canvas.grid(&area, 10);

    let to_px = |points: &[(DateTime<Utc>, f64)]| -> Vec<(f64, f64)> {
        points
            .iter()
            .filter(|(_, rsi)| !rsi.is_nan())
            .map(|(d, rsi)| (x.map(d.timestamp() as f64), y.map(*rsi)))
            .collect()
    };

    // bands span the daily window
    let band_from = x.map(daily_points[0].0.timestamp() as f64);
    let band_to = x.map(daily_points[daily_points.len() - 1].0.timestamp() as f64);
    canvas.line((band_from, y.map(OVERBOUGHT)), (band_to, y.map(OVERBOUGHT)), RED, Stroke::Dash, 1);
    canvas.line((band_from, y.map(OVERSOLD)), (band_to, y.map(OVERSOLD)), GREEN, Stroke::Dash, 1);

    canvas.polyline(&to_px(&daily_points), BLUE, Stroke::Solid);
    canvas.polyline(&to_px(&weekly_points), ORANGE, Stroke::Dash);
    canvas.polyline(&to_px(&monthly_points), PURPLE, Stroke::Dot);

    Ok(canvas.into_image())
}

/// Render both charts into `dir`, returning the written paths
pub fn generate_charts(
    dir: &Path,
    daily: &PriceSeries,
    weekly: &PriceSeries,
    monthly: &PriceSeries,
    period: usize,
) -> Result<Vec<std::path::PathBuf>> {
    std::fs::create_dir_all(dir)?;

    let price_path = dir.join(PRICE_CHART_FILE);
    render_price_chart(daily)?.save(&price_path)?;

    let rsi_path = dir.join(RSI_CHART_FILE);
    render_rsi_chart(daily, weekly, monthly, period)?.save(&rsi_path)?;

    log::info!("📈 Charts written to {}", dir.display());
    Ok(vec![price_path, rsi_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::tests::series_from;
    use crate::data::Interval;
    use chrono::TimeZone;

    fn wave(n: usize) -> Vec<f64> {
        (0..n).map(|i| 22000.0 + (i as f64 / 3.0).sin() * 300.0).collect()
    }

    #[test]
    fn test_expand_points_caps_and_skips_nan() {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).unwrap();
        let points: Vec<_> = (0..10)
            .map(|i| {
                let rsi = if i == 1 { f64::NAN } else { 40.0 + i as f64 };
                (start + Duration::weeks(i), rsi)
            })
            .collect();
        let expanded = expand_points(&points, 5, Duration::days(1), 30);
        assert_eq!(expanded.len(), 30);
        assert_eq!(expanded[4].0, start + Duration::days(4));
        // week 1 is skipped, week 2 follows week 0
        assert_eq!(expanded[5].1, 42.0);
    }

    #[test]
    fn test_render_price_chart_dimensions() {
        let daily = series_from(Interval::Daily, &wave(120));
        let img = render_price_chart(&daily).unwrap();
        assert_eq!(img.dimensions(), (1200, 600));
    }

    #[test]
    fn test_render_price_chart_needs_two_bars() {
        let daily = series_from(Interval::Daily, &[100.0]);
        assert!(matches!(render_price_chart(&daily), Err(BotError::Chart(_))));
    }

    #[test]
    fn test_render_rsi_chart_dimensions() {
        let daily = series_from(Interval::Daily, &wave(60));
        let weekly = series_from(Interval::Weekly, &wave(52));
        let monthly = series_from(Interval::Monthly, &wave(36));
        let img = render_rsi_chart(&daily, &weekly, &monthly, 14).unwrap();
        assert_eq!(img.dimensions(), (1200, 500));
    }

    #[test]
    fn test_generate_charts_writes_files() {
        let dir = std::env::temp_dir().join(format!("nifty_rsi_charts_{}", std::process::id()));
        let daily = series_from(Interval::Daily, &wave(40));
        let weekly = series_from(Interval::Weekly, &wave(20));
        let monthly = series_from(Interval::Monthly, &wave(12));
        let paths = generate_charts(&dir, &daily, &weekly, &monthly, 14).unwrap();
        assert_eq!(paths.len(), 2);
        assert!(paths.iter().all(|p| p.exists()));
        let _ = std::fs::remove_dir_all(&dir);
    }
}
