//! Update cycle: fetch, analyse, render, publish, notify

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::analysis::{analyze, MarketSnapshot};
use crate::data::{Interval, PriceSeries, YahooClient};
use crate::error::Result;
use crate::market::{is_market_open, is_summary_window};
use crate::notify::Notifier;
use crate::output::{write_outputs, OutputFiles};
use crate::report::{daily_summary, update_message};
use crate::utils::config::Config;

/// Daily, weekly and monthly series of one ticker
pub struct MarketData {
    pub daily: PriceSeries,
    pub weekly: PriceSeries,
    pub monthly: PriceSeries,
}

pub struct BotService {
    config: Config,
    client: YahooClient,
    notifier: Box<dyn Notifier>,
    snapshot: Arc<RwLock<MarketSnapshot>>,
    /// Serialises scheduled and on-demand updates
    update_lock: Mutex<()>,
}

impl BotService {
    pub fn new(config: Config, notifier: Box<dyn Notifier>) -> Result<Self> {
        let client = YahooClient::new(&config.yahoo_base_url)?;
        Ok(Self {
            config,
            client,
            notifier,
            snapshot: Arc::new(RwLock::new(MarketSnapshot::default())),
            update_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn snapshot(&self) -> MarketSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Fetch all three timeframes; the first failure aborts
    pub async fn fetch_market_data(&self, now: DateTime<Utc>) -> Result<MarketData> {
        let ticker = &self.config.ticker;
        let daily = self.client.fetch_window(ticker, Interval::Daily, now).await?;
        let weekly = self.client.fetch_window(ticker, Interval::Weekly, now).await?;
        let monthly = self.client.fetch_window(ticker, Interval::Monthly, now).await?;
        log::info!(
            "📊 Loaded {} daily, {} weekly, {} monthly bars for {}",
            daily.len(),
            weekly.len(),
            monthly.len(),
            ticker
        );
        Ok(MarketData {
            daily,
            weekly,
            monthly,
        })
    }

    /// Analyse fresh data, store the snapshot and write the artifact set
    pub async fn apply(&self, data: &MarketData, now: DateTime<Utc>) -> Result<(MarketSnapshot, OutputFiles)> {
        let period = self.config.rsi_period;
        let snapshot = analyze(&data.daily, &data.weekly, &data.monthly, period, now);
        let files = write_outputs(
            &self.config.output_dir,
            [&data.daily, &data.weekly, &data.monthly],
            &snapshot,
            period,
            now,
        )?;
        *self.snapshot.write().await = snapshot.clone();
        log::info!(
            "✅ Nifty50 {:.2} ({:+.2}%) | RSI D {:.2} W {:.2} M {:.2} | {}",
            snapshot.current_price,
            snapshot.price_change,
            snapshot.daily.rsi,
            snapshot.weekly.rsi,
            snapshot.monthly.rsi,
            snapshot.overall_signal
        );
        Ok((snapshot, files))
    }

    /// Send through the configured notifier; failures are only logged
    pub async fn notify(&self, text: &str) {
        if let Err(e) = self.notifier.send(text).await {
            log::error!("❌ Error sending {} message: {}", self.notifier.name(), e);
        }
    }

    /// One update cycle at `now`.
    ///
    /// Returns `false` only when nothing usable exists: fresh data failed
    /// and no earlier snapshot is cached, or the cycle itself errored.
    pub async fn update_at(&self, now: DateTime<Utc>) -> bool {
        let _guard = self.update_lock.lock().await;

        let data = match self.fetch_market_data(now).await {
            Ok(data) => data,
            Err(e) => {
                log::error!("❌ Error downloading data: {}", e);
                if !self.snapshot.read().await.is_updated() {
                    return false;
                }
                log::warn!("⚠️ Keeping cached analysis");
                return true;
            }
        };

        let snapshot = match self.apply(&data, now).await {
            Ok((snapshot, _)) => snapshot,
            Err(e) => {
                log::error!("❌ Error updating data: {}", e);
                if self.config.debug {
                    log::debug!("{:?}", e);
                }
                return false;
            }
        };

        if is_market_open(now) {
            self.notify(&update_message(&snapshot)).await;
        }
        if is_summary_window(now) {
            self.notify(&daily_summary(&snapshot, now)).await;
        }
        true
    }

    pub async fn update_data(&self) -> bool {
        self.update_at(Utc::now()).await
    }
}
