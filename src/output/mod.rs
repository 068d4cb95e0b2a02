//! Published artifact set: per-timeframe CSV, analysis JSON and chart PNGs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::{rsi_series, MarketSnapshot};
use crate::charts::generate_charts;
use crate::data::PriceSeries;
use crate::error::Result;
use crate::market::to_ist;

pub const ANALYSIS_FILE: &str = "analysis.json";
pub const CSV_HEADER: &str = "date,open,high,low,close,volume,rsi";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub generated_at: DateTime<Utc>,
    pub rsi_period: usize,
    pub snapshot: MarketSnapshot,
}

/// Files produced by one run
#[derive(Debug, Default)]
pub struct OutputFiles {
    pub csv: Vec<PathBuf>,
    pub json: Option<PathBuf>,
    pub charts: Vec<PathBuf>,
}

impl OutputFiles {
    pub fn all(&self) -> Vec<&PathBuf> {
        self.csv
            .iter()
            .chain(self.json.iter())
            .chain(self.charts.iter())
            .collect()
    }
}

fn cell(value: Option<f64>) -> String {
    match value {
        Some(v) if !v.is_nan() => format!("{:.2}", v),
        _ => String::new(),
    }
}

/// CSV rendering of a series with its RSI column. Dates are exchange-local
/// (IST): Yahoo stamps NSE bars at local midnight, the previous day in UTC.
pub fn series_csv(series: &PriceSeries, period: usize) -> String {
    let rsi = rsi_series(series, period);
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for (candle, rsi) in series.candles.iter().zip(rsi) {
        out.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            to_ist(candle.timestamp).format("%Y-%m-%d"),
            cell(candle.open),
            cell(candle.high),
            cell(candle.low),
            cell(candle.close),
            cell(candle.volume),
            cell(Some(rsi)),
        ));
    }
    out
}

/// File stem used for a series, e.g. `nifty50_daily`
pub fn csv_file_name(series: &PriceSeries) -> String {
    format!("nifty50_{}.csv", series.interval.label())
}

pub fn write_csv(dir: &Path, series: &PriceSeries, period: usize) -> Result<PathBuf> {
    let path = dir.join(csv_file_name(series));
    fs::write(&path, series_csv(series, period))?;
    Ok(path)
}

pub fn write_report(dir: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    let path = dir.join(ANALYSIS_FILE);
    fs::write(&path, serde_json::to_string_pretty(report)?)?;
    Ok(path)
}

/// Write the whole artifact set into `dir`. A chart failure is logged and
/// leaves the data files in place.
pub fn write_outputs(
    dir: &Path,
    series: [&PriceSeries; 3],
    snapshot: &MarketSnapshot,
    period: usize,
    now: DateTime<Utc>,
) -> Result<OutputFiles> {
    fs::create_dir_all(dir)?;
    let [daily, weekly, monthly] = series;

    let mut files = OutputFiles::default();
    for s in series {
        files.csv.push(write_csv(dir, s, period)?);
    }

    let report = AnalysisReport {
        ticker: daily.ticker.clone(),
        generated_at: now,
        rsi_period: period,
        snapshot: snapshot.clone(),
    };
    files.json = Some(write_report(dir, &report)?);

    match generate_charts(dir, daily, weekly, monthly, period) {
        Ok(paths) => files.charts = paths,
        Err(e) => log::error!("❌ Error generating charts: {}", e),
    }

    log::info!("💾 {} files written to {}", files.all().len(), dir.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::analysis::tests::series_from;
    use crate::data::Interval;

    fn temp_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nifty_rsi_{}_{}", name, std::process::id()))
    }

    #[test]
    fn test_series_csv_layout() {
        let mut series = series_from(Interval::Daily, &[100.0, 101.5]);
        series.candles[1].volume = None;
        let csv = series_csv(&series, 14);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "2025-01-01,100.00,101.00,99.00,100.00,1000.00,100.00");
        assert_eq!(lines[2], "2025-01-02,101.50,102.50,100.50,101.50,,100.00");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_series_csv_dates_are_ist() {
        use crate::data::{Candle, PriceSeries};
        use chrono::TimeZone;

        // 2024-01-01 00:00 IST
        let candle = Candle {
            timestamp: Utc.with_ymd_and_hms(2023, 12, 31, 18, 30, 0).unwrap(),
            open: Some(1.0),
            high: Some(1.0),
            low: Some(1.0),
            close: Some(1.0),
            volume: None,
        };
        let series = PriceSeries::new("^NSEI", Interval::Monthly, vec![candle]);
        let csv = series_csv(&series, 14);
        assert_eq!(
            csv.lines().nth(1),
            Some("2024-01-01,1.00,1.00,1.00,1.00,,100.00")
        );
    }

    #[test]
    fn test_write_outputs_produces_artifact_set() {
        let dir = temp_dir("outputs");
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i % 7) as f64).collect();
        let daily = series_from(Interval::Daily, &closes);
        let weekly = series_from(Interval::Weekly, &closes[..30]);
        let monthly = series_from(Interval::Monthly, &closes[..20]);
        let now = Utc::now();
        let snapshot = analyze(&daily, &weekly, &monthly, 14, now);

        let files = write_outputs(&dir, [&daily, &weekly, &monthly], &snapshot, 14, now).unwrap();

        let names: Vec<String> = files
            .all()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        for expected in [
            "nifty50_daily.csv",
            "nifty50_weekly.csv",
            "nifty50_monthly.csv",
            "analysis.json",
            "price_chart.png",
            "rsi_chart.png",
        ] {
            assert!(names.contains(&expected.to_string()), "missing {expected}");
            assert!(dir.join(expected).exists());
        }

        let report: AnalysisReport =
            serde_json::from_str(&fs::read_to_string(dir.join(ANALYSIS_FILE)).unwrap()).unwrap();
        assert_eq!(report.ticker, "^NSEI");
        assert_eq!(report.snapshot, snapshot);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_outputs_survives_chart_failure() {
        let dir = temp_dir("single_bar");
        let daily = series_from(Interval::Daily, &[100.0]);
        let snapshot = MarketSnapshot::default();
        let files =
            write_outputs(&dir, [&daily, &daily, &daily], &snapshot, 14, Utc::now()).unwrap();
        assert!(files.charts.is_empty());
        assert!(files.json.is_some());
        let _ = fs::remove_dir_all(&dir);
    }
}
