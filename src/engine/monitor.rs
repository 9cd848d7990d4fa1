//! # engine::monitor
//!
//! **Trade Monitor** — the periodic evaluator that advances position state.
//!
//! Each tick iterates a registry snapshot, so the set of positions
//! considered is stable for the duration of the tick; signals admitted
//! mid-tick are picked up on the next one. Transitions are applied via
//! `close_if_open`, which is safe against a concurrent second evaluator.
//!
//! A position whose symbol has no cached price yet is skipped for the
//! tick — no transition, no error.

use std::sync::atomic::Ordering;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::models::{TradeSide, TradeStatus};
use crate::state::SharedState;
use crate::store::CloseOutcome;

// ─── Transition Rule ──────────────────────────────────────────────────────────

/// Decide the terminal transition (if any) for an Open position at the
/// given current price.
///
/// Stop-loss is evaluated first: in the pathological configuration where
/// stop-loss and target bracket incorrectly and both conditions hold,
/// loss protection wins.
pub fn decide_transition(
    side: TradeSide,
    price: Decimal,
    stop_loss: Decimal,
    target: Decimal,
) -> Option<TradeStatus> {
    match side {
        TradeSide::Buy => {
            if price <= stop_loss {
                Some(TradeStatus::StopLossHit)
            } else if price >= target {
                Some(TradeStatus::TargetHit)
            } else {
                None
            }
        }
        TradeSide::Sell => {
            if price >= stop_loss {
                Some(TradeStatus::StopLossHit)
            } else if price <= target {
                Some(TradeStatus::TargetHit)
            } else {
                None
            }
        }
    }
}

// ─── TradeMonitor ─────────────────────────────────────────────────────────────

/// Fixed-interval evaluation loop over all Open positions.
pub struct TradeMonitor {
    interval: Duration,
}

impl TradeMonitor {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Run the evaluation loop until `shutdown` is cancelled.
    pub async fn run(self, state: SharedState, shutdown: CancellationToken) {
        info!(interval = ?self.interval, "Trade monitor loop started");

        let mut ticker = tokio::time::interval(self.interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    evaluate_positions(&state).await;
                }
                _ = shutdown.cancelled() => {
                    info!("Trade monitor loop stopped");
                    break;
                }
            }
        }
    }
}

/// One evaluation tick: check every Open position against the current
/// cached price and apply any terminal transition.
///
/// Returns the number of positions closed this tick.
pub async fn evaluate_positions(state: &SharedState) -> usize {
    state.tick_count.fetch_add(1, Ordering::Relaxed);

    let mut closed = 0;
    for position in state.registry.snapshot().await {
        if !position.is_open() {
            continue;
        }

        // No cached price yet — skipped this tick, retried on the next.
        let Some(observation) = state.prices.get(&position.symbol).await else {
            debug!(symbol = %position.symbol, "No cached price — position skipped");
            continue;
        };

        let Some(status) = decide_transition(
            position.side,
            observation.price,
            position.stop_loss,
            position.target,
        ) else {
            continue;
        };

        let outcome = state
            .registry
            .close_if_open(position.position_id, status, observation.price)
            .await;

        if let CloseOutcome::Closed(closed_position) = outcome {
            closed += 1;
            match status {
                TradeStatus::StopLossHit => info!(
                    symbol = %closed_position.symbol,
                    price = %observation.price,
                    "SL Hit — position closed"
                ),
                TradeStatus::TargetHit => info!(
                    symbol = %closed_position.symbol,
                    price = %observation.price,
                    "Target Hit — position closed"
                ),
                TradeStatus::Open => unreachable!(),
            }
        }
    }

    closed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn buy_stop_loss_at_or_below_level() {
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(89), dec!(90), dec!(120)),
            Some(TradeStatus::StopLossHit)
        );
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(90), dec!(90), dec!(120)),
            Some(TradeStatus::StopLossHit)
        );
    }

    #[test]
    fn buy_target_at_or_above_level() {
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(121), dec!(90), dec!(120)),
            Some(TradeStatus::TargetHit)
        );
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(120), dec!(90), dec!(120)),
            Some(TradeStatus::TargetHit)
        );
    }

    #[test]
    fn buy_between_levels_holds() {
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(100), dec!(90), dec!(120)),
            None
        );
    }

    #[test]
    fn sell_stop_loss_at_or_above_level() {
        assert_eq!(
            decide_transition(TradeSide::Sell, dec!(111), dec!(110), dec!(80)),
            Some(TradeStatus::StopLossHit)
        );
    }

    #[test]
    fn sell_target_at_or_below_level() {
        assert_eq!(
            decide_transition(TradeSide::Sell, dec!(79), dec!(110), dec!(80)),
            Some(TradeStatus::TargetHit)
        );
    }

    #[test]
    fn sell_between_levels_holds() {
        assert_eq!(
            decide_transition(TradeSide::Sell, dec!(95), dec!(110), dec!(80)),
            None
        );
    }

    #[test]
    fn pathological_bracket_prefers_stop_loss() {
        // stop_loss above target for a Buy: both conditions can hold at
        // once; loss protection wins.
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(100), dec!(110), dec!(90)),
            Some(TradeStatus::StopLossHit)
        );
        assert_eq!(
            decide_transition(TradeSide::Sell, dec!(100), dec!(90), dec!(110)),
            Some(TradeStatus::StopLossHit)
        );
    }

    #[test]
    fn fractional_prices_compare_exactly() {
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(89.999999), dec!(90), dec!(120)),
            Some(TradeStatus::StopLossHit)
        );
        assert_eq!(
            decide_transition(TradeSide::Buy, dec!(90.000001), dec!(90), dec!(120)),
            None
        );
    }
}
