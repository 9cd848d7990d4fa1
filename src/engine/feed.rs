//! # engine::feed
//!
//! **Price Feed Client** — polls the upstream ticker API on a fixed
//! interval and pushes each observation into the [`PriceCache`].
//!
//! Failure semantics: a fetch failure (transport error, non-2xx status,
//! malformed body, unparseable price string) is logged at warn and the
//! interval is skipped for that symbol. Nothing is ever written to the
//! cache on failure, and the loop itself never exits on error — only
//! cancellation stops it.
//!
//! Each fetch carries a per-attempt timeout, and the symbols of one
//! cycle are fetched concurrently, so a slow upstream never stalls the
//! polling cadence beyond one timeout regardless of how many symbols
//! are subscribed. Fetches happen entirely outside the cache's critical
//! section; only the final `set` is synchronized.

use futures_util::future::join_all;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::state::SharedState;

// ─── Ticker Response ──────────────────────────────────────────────────────────

/// Response format from `GET /api/v3/ticker/price?symbol={S}`
/// (Binance-compatible). The price arrives as a numeric string.
#[derive(Debug, Deserialize)]
struct TickerResponse {
    symbol: String,
    price: String,
}

// ─── PriceFeedClient ──────────────────────────────────────────────────────────

/// Periodic upstream price poller.
pub struct PriceFeedClient {
    base_url: String,
    symbols: Vec<String>,
    interval: std::time::Duration,
    timeout: std::time::Duration,
}

impl PriceFeedClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            base_url: config.feed_base_url.clone(),
            symbols: config.feed_symbols.clone(),
            interval: config.feed_interval,
            timeout: config.feed_timeout,
        }
    }

    /// Run the polling loop until `shutdown` is cancelled.
    pub async fn run(self, state: SharedState, shutdown: CancellationToken) {
        info!(
            symbols = ?self.symbols,
            interval = ?self.interval,
            upstream = %self.base_url,
            "Price feed loop started"
        );

        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.poll_once(&state).await;
                }
                _ = shutdown.cancelled() => {
                    info!("Price feed loop stopped");
                    break;
                }
            }
        }
    }

    /// One polling cycle: fetch every subscribed symbol concurrently,
    /// cache successes.
    pub(crate) async fn poll_once(&self, state: &SharedState) {
        let fetches = self.symbols.iter().map(|symbol| async move {
            (symbol, self.fetch_price(&state.http_client, symbol).await)
        });

        for (symbol, result) in join_all(fetches).await {
            match result {
                Ok(price) => {
                    state.prices.set(symbol, price).await;
                    debug!(%symbol, %price, "Price cached");
                }
                Err(e) => {
                    // Absorbed: skip this interval, retry on the next one.
                    warn!(%symbol, error = %e, "Price fetch failed — interval skipped");
                }
            }
        }
    }

    /// Fetch the current price for one symbol.
    async fn fetch_price(
        &self,
        client: &reqwest::Client,
        symbol: &str,
    ) -> anyhow::Result<Decimal> {
        let url = format!("{}/api/v3/ticker/price?symbol={symbol}", self.base_url);

        let ticker: TickerResponse = client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let price: Decimal = ticker
            .price
            .parse()
            .map_err(|e| anyhow::anyhow!("malformed price {:?} for {}: {e}", ticker.price, ticker.symbol))?;

        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::state::build_state;

    #[test]
    fn ticker_response_parses_price_string() {
        let body = r#"{"symbol":"BTCUSDT","price":"67012.34000000"}"#;
        let ticker: TickerResponse = serde_json::from_str(body).unwrap();
        assert_eq!(ticker.symbol, "BTCUSDT");

        let price: Decimal = ticker.price.parse().unwrap();
        assert_eq!(price, "67012.34".parse::<Decimal>().unwrap());
    }

    #[test]
    fn malformed_price_string_fails_parse() {
        let body = r#"{"symbol":"BTCUSDT","price":"not-a-number"}"#;
        let ticker: TickerResponse = serde_json::from_str(body).unwrap();
        assert!(ticker.price.parse::<Decimal>().is_err());
    }

    #[tokio::test]
    async fn poll_cycle_absorbs_unreachable_upstream() {
        let state = build_state();
        let client = PriceFeedClient {
            base_url: "http://127.0.0.1:9".to_string(),
            symbols: vec![
                "BTCUSDT".to_string(),
                "ETHUSDT".to_string(),
                "SOLUSDT".to_string(),
                "XRPUSDT".to_string(),
            ],
            interval: Duration::from_secs(5),
            timeout: Duration::from_millis(200),
        };

        let started = std::time::Instant::now();
        client.poll_once(&state).await;

        // Symbols are fetched concurrently: one cycle is bounded by a
        // single timeout, not one timeout per symbol.
        assert!(started.elapsed() < Duration::from_millis(600));

        // Nothing was written to the cache on failure.
        assert_eq!(state.prices.len().await, 0);
    }
}
