//! # store::prices
//!
//! [`PriceCache`] — latest known price per symbol, nothing else.
//!
//! ## Design Decisions
//!
//! * `RwLock<HashMap<..>>` from `tokio::sync`: many concurrent readers
//!   (monitor ticks, health endpoint) with exclusive writer access (feed
//!   updates). Readers and the writer yield cooperatively to the runtime.
//! * Reads clone the observation out and release the lock immediately, so
//!   no caller ever iterates or computes while holding it.
//! * `seed_if_absent` is a single conditional insert under one write lock
//!   — not a read-then-write pair — so ingestion seeding can never
//!   interleave with the feed's first observation for the same symbol.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;

// ─── PriceObservation ─────────────────────────────────────────────────────────

/// The most recent price seen for a symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceObservation {
    pub price: Decimal,
    /// When the observation was recorded. Ordering only — the monitor
    /// applies no staleness bound.
    pub observed_at: DateTime<Utc>,
}

// ─── PriceCache ───────────────────────────────────────────────────────────────

/// Concurrency-safe map of symbol → latest observation.
///
/// Last-writer-wins under concurrent `set` to the same symbol; a `get`
/// never observes a partially written value.
#[derive(Debug, Default)]
pub struct PriceCache {
    inner: RwLock<HashMap<String, PriceObservation>>,
}

impl PriceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert the latest price for a symbol.
    pub async fn set(&self, symbol: &str, price: Decimal) {
        let mut map = self.inner.write().await;
        map.insert(
            symbol.to_string(),
            PriceObservation {
                price,
                observed_at: Utc::now(),
            },
        );
    }

    /// Latest observation for a symbol, or `None` if never observed.
    pub async fn get(&self, symbol: &str) -> Option<PriceObservation> {
        let map = self.inner.read().await;
        map.get(symbol).cloned()
    }

    /// Insert only if the symbol has never been observed.
    ///
    /// Returns `true` if this call inserted the baseline. Used by signal
    /// ingestion to seed the entry price before the feed's first tick.
    pub async fn seed_if_absent(&self, symbol: &str, price: Decimal) -> bool {
        let mut map = self.inner.write().await;
        if map.contains_key(symbol) {
            return false;
        }
        map.insert(
            symbol.to_string(),
            PriceObservation {
                price,
                observed_at: Utc::now(),
            },
        );
        true
    }

    /// Number of symbols with a cached price. Used by the health endpoint.
    pub async fn len(&self) -> usize {
        let map = self.inner.read().await;
        map.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn get_unknown_symbol_is_none() {
        let cache = PriceCache::new();
        assert!(cache.get("BTCUSDT").await.is_none());
    }

    #[tokio::test]
    async fn set_then_get_returns_latest() {
        let cache = PriceCache::new();
        cache.set("BTCUSDT", dec!(67000)).await;
        cache.set("BTCUSDT", dec!(67100.25)).await;

        let observation = cache.get("BTCUSDT").await.unwrap();
        assert_eq!(observation.price, dec!(67100.25));
    }

    #[tokio::test]
    async fn seed_if_absent_only_inserts_once() {
        let cache = PriceCache::new();
        assert!(cache.seed_if_absent("BTCUSDT", dec!(100)).await);
        assert!(!cache.seed_if_absent("BTCUSDT", dec!(200)).await);

        let observation = cache.get("BTCUSDT").await.unwrap();
        assert_eq!(observation.price, dec!(100));
    }

    #[tokio::test]
    async fn set_overrides_seeded_baseline() {
        let cache = PriceCache::new();
        cache.seed_if_absent("BTCUSDT", dec!(100)).await;
        cache.set("BTCUSDT", dec!(105)).await;

        let observation = cache.get("BTCUSDT").await.unwrap();
        assert_eq!(observation.price, dec!(105));
    }

    #[tokio::test]
    async fn writes_do_not_disturb_other_symbols() {
        let cache = Arc::new(PriceCache::new());
        cache.set("ETHUSDT", dec!(3500)).await;

        let writer = {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move {
                for i in 0..100 {
                    cache.set("BTCUSDT", Decimal::from(60000 + i)).await;
                }
            })
        };

        for _ in 0..100 {
            let observation = cache.get("ETHUSDT").await.unwrap();
            assert_eq!(observation.price, dec!(3500));
        }

        writer.await.unwrap();
    }
}
