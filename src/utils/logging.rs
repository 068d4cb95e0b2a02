//! Logging setup on top of env_logger
//!
//! `RUST_LOG` wins when set, for example:
//! ```bash
//! RUST_LOG=nifty_rsi::service=debug cargo run --bin nifty_bot
//! ```
//! Otherwise the level is `info`, or `debug` when `DEBUG=true`.

use std::env;

pub fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .format_module_path(true)
        .format_target(false);
    if let Ok(spec) = env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    } else {
        builder.parse_filters(default_level);
    }
    // tests and repeated calls may have installed a logger already
    if builder.try_init().is_err() {
        return;
    }

    log::info!("✅ Logging initialised");
    log::info!("📝 Log level: {}", get_log_level(debug));
}

/// Effective level spec
pub fn get_log_level(debug: bool) -> String {
    env::var("RUST_LOG").unwrap_or_else(|_| if debug { "debug" } else { "info" }.to_string())
}
