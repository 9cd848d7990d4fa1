//! # ingest
//!
//! **Signal Ingestion Service** — validates inbound signals and admits
//! them into the registry.
//!
//! On admission the entry price seeds the price cache *only if* the
//! symbol has never been observed, so the monitor has a baseline before
//! the feed's first tick. `seed_if_absent` makes that a single
//! conditional insert, not a read-then-write pair.

use tracing::info;

use crate::error::AppError;
use crate::models::{SignalRequest, TradePosition};
use crate::state::SharedState;

/// Validate and admit one signal.
///
/// Errors surfaced to the caller:
/// * [`AppError::InvalidSignal`] — malformed input, correct and resubmit.
/// * [`AppError::DuplicateOpenSymbol`] — an Open position already exists
///   for the symbol; retry once it closes.
pub async fn submit(state: &SharedState, signal: SignalRequest) -> Result<TradePosition, AppError> {
    signal.validate().map_err(AppError::InvalidSignal)?;

    let position = state.registry.try_admit(&signal).await?;

    let seeded = state
        .prices
        .seed_if_absent(&position.symbol, position.entry_price)
        .await;

    info!(
        symbol = %position.symbol,
        side = ?position.side,
        entry = %position.entry_price,
        seeded,
        "Signal admitted"
    );

    Ok(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TradeSide;
    use crate::state::build_state;
    use rust_decimal_macros::dec;

    fn signal(symbol: &str) -> SignalRequest {
        SignalRequest {
            symbol: symbol.to_string(),
            side: TradeSide::Buy,
            entry_price: dec!(100),
            stop_loss: dec!(90),
            target: dec!(120),
        }
    }

    #[tokio::test]
    async fn admission_seeds_unseen_symbol_with_entry_price() {
        let state = build_state();
        submit(&state, signal("BTCUSDT")).await.unwrap();

        let observation = state.prices.get("BTCUSDT").await.unwrap();
        assert_eq!(observation.price, dec!(100));
    }

    #[tokio::test]
    async fn admission_keeps_existing_cached_price() {
        let state = build_state();
        state.prices.set("BTCUSDT", dec!(105)).await;

        submit(&state, signal("BTCUSDT")).await.unwrap();

        let observation = state.prices.get("BTCUSDT").await.unwrap();
        assert_eq!(observation.price, dec!(105));
    }

    #[tokio::test]
    async fn invalid_signal_rejected_before_admission() {
        let state = build_state();
        let mut bad = signal("BTCUSDT");
        bad.entry_price = dec!(0);

        let err = submit(&state, bad).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidSignal(_)));
        assert_eq!(state.registry.snapshot().await.len(), 0);
    }

    #[tokio::test]
    async fn duplicate_open_symbol_surfaced() {
        let state = build_state();
        submit(&state, signal("BTCUSDT")).await.unwrap();

        let err = submit(&state, signal("BTCUSDT")).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateOpenSymbol(_)));
    }
}
