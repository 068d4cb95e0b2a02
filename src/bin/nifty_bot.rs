//! Dashboard server with scheduled market-hours updates and Telegram alerts

use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;

use nifty_rsi::dashboard;
use nifty_rsi::notify;
use nifty_rsi::scheduler::Scheduler;
use nifty_rsi::service::BotService;
use nifty_rsi::utils::config::Config;
use nifty_rsi::utils::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;
    init_logging(config.debug);

    let port = config.port;
    let notifier = notify::from_config(&config)?;
    let service = Arc::new(BotService::new(config, notifier)?);

    let scheduler = tokio::spawn(Scheduler::new(Utc::now()).run(service.clone()));

    let app = dashboard::router(service);
    let addr = format!("0.0.0.0:{}", port);
    log::info!("🚀 Dashboard starting on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            log::info!("🛑 Shutting down");
        })
        .await?;

    scheduler.abort();
    Ok(())
}
