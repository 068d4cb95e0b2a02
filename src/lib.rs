pub mod error;
pub mod utils;

// Market data and indicators
pub mod data;
pub mod indicators;
pub mod signals;
pub mod analysis;
pub mod market;

// Publishing
pub mod charts;
pub mod output;
pub mod report;
pub mod notify;

// Long-running bot
pub mod service;
pub mod scheduler;

#[cfg(feature = "dashboard")]
pub mod dashboard;

pub use error::{BotError, Result};
