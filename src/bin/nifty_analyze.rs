//! One-shot analysis run: fetch, analyse and write the output/ artifact set.
//! Exits non-zero when no data could be produced.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;

use nifty_rsi::notify;
use nifty_rsi::report::update_message;
use nifty_rsi::service::BotService;
use nifty_rsi::utils::config::Config;
use nifty_rsi::utils::logging::init_logging;

#[derive(Parser, Debug)]
#[command(name = "nifty_analyze", about = "Nifty50 RSI analysis, writes CSV/JSON/PNG artifacts")]
struct Args {
    /// Directory for the generated files (default: $OUTPUT_DIR or ./output)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Yahoo Finance ticker (default: $NIFTY_TICKER or ^NSEI)
    #[arg(long)]
    ticker: Option<String>,

    /// RSI look-back period, at least 1
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    period: Option<u64>,

    /// Also send the result to Telegram when credentials are configured
    #[arg(long, default_value_t = false)]
    notify: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_must_be_positive() {
        assert!(Args::try_parse_from(["nifty_analyze", "--period", "0"]).is_err());
        let args = Args::try_parse_from(["nifty_analyze", "--period", "21"]).unwrap();
        assert_eq!(args.period, Some(21));
    }

    #[test]
    fn test_no_arguments_needed() {
        let args = Args::try_parse_from(["nifty_analyze"]).unwrap();
        assert!(args.period.is_none());
        assert!(args.output_dir.is_none());
        assert!(!args.notify);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("loading configuration")?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if let Some(ticker) = args.ticker {
        config.ticker = ticker;
    }
    if let Some(period) = args.period {
        config.rsi_period = usize::try_from(period).context("RSI period out of range")?;
    }
    init_logging(config.debug);

    log::info!("🚀 Analysing {} (RSI {})", config.ticker, config.rsi_period);

    let notifier = notify::from_config(&config)?;
    let service = BotService::new(config, notifier)?;

    let now = Utc::now();
    let data = service
        .fetch_market_data(now)
        .await
        .context("downloading market data")?;
    let (snapshot, files) = service
        .apply(&data, now)
        .await
        .context("writing analysis output")?;

    for path in files.all() {
        log::info!("   {}", path.display());
    }

    if args.notify {
        service.notify(&update_message(&snapshot)).await;
    }

    println!(
        "{} | Daily {:.2} ({}) | Weekly {:.2} ({}) | Monthly {:.2} ({})",
        snapshot.overall_signal,
        snapshot.daily.rsi,
        snapshot.daily.signal,
        snapshot.weekly.rsi,
        snapshot.weekly.signal,
        snapshot.monthly.rsi,
        snapshot.monthly.signal
    );
    Ok(())
}
