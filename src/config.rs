//! # config — read runtime configuration from environment variables

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

/// Everything papertrade needs at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address Axum listens on.
    pub bind_addr: SocketAddr,
    /// Base URL of the upstream ticker API (Binance-compatible).
    pub feed_base_url: String,
    /// Symbols the feed polls, e.g. `["BTCUSDT", "ETHUSDT"]`.
    pub feed_symbols: Vec<String>,
    /// Interval between feed polling cycles.
    pub feed_interval: Duration,
    /// Interval between monitor evaluation ticks.
    pub monitor_interval: Duration,
    /// Per-attempt timeout for one upstream fetch.
    pub feed_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5001".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address like 0.0.0.0:5001")?;

        let feed_symbols: Vec<String> = std::env::var("FEED_SYMBOLS")
            .unwrap_or_else(|_| "BTCUSDT".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let feed_interval_secs: u64 = std::env::var("FEED_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("FEED_INTERVAL_SECS must be a number")?;

        let monitor_interval_secs: u64 = std::env::var("MONITOR_INTERVAL_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("MONITOR_INTERVAL_SECS must be a number")?;

        let feed_timeout_secs: u64 = std::env::var("FEED_TIMEOUT_SECS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("FEED_TIMEOUT_SECS must be a number")?;

        Ok(Self {
            bind_addr,
            feed_base_url: std::env::var("FEED_BASE_URL")
                .unwrap_or_else(|_| "https://api.binance.com".to_string()),
            feed_symbols,
            feed_interval: Duration::from_secs(feed_interval_secs),
            monitor_interval: Duration::from_secs(monitor_interval_secs),
            feed_timeout: Duration::from_secs(feed_timeout_secs),
        })
    }
}
