//! # models::position
//!
//! Defines [`TradePosition`], the tracked paper trade, plus its side and
//! lifecycle status enums.
//!
//! A position is created by signal admission (status `Open`) and mutated
//! exactly once — by the monitor, when a stop-loss or target is crossed.
//! Closed positions are never removed; the `/api/trades` endpoint renders
//! the full history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::SignalRequest;

// ─── TradeSide ────────────────────────────────────────────────────────────────

/// Direction of the trade, as submitted on the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSide {
    Buy,
    Sell,
}

// ─── TradeStatus ──────────────────────────────────────────────────────────────

/// Lifecycle status of a position.
///
/// Transitions are monotonic: `Open` may move to either terminal state,
/// and a terminal state never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    /// Still tracked against the price feed.
    Open,
    /// Price crossed the stop-loss level.
    StopLossHit,
    /// Price reached the target level.
    TargetHit,
}

impl TradeStatus {
    /// `true` for the two closed states.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, TradeStatus::Open)
    }
}

// ─── TradePosition ────────────────────────────────────────────────────────────

/// An admitted, tracked paper trade.
///
/// `symbol`, `side` and the three price levels are immutable after
/// admission; only `status` (and the close_* fields stamped alongside it)
/// ever change, and only through `TradeRegistry::close_if_open`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradePosition {
    /// Internal identity used for mutation requests. The *business*
    /// identity while Open is the symbol (one Open position per symbol).
    pub position_id: Uuid,
    pub symbol: String,
    pub side: TradeSide,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub target: Decimal,
    pub status: TradeStatus,
    pub opened_at: DateTime<Utc>,
    /// Price of the tick that triggered the terminal transition.
    pub close_price: Option<Decimal>,
    pub closed_at: Option<DateTime<Utc>>,
}

impl TradePosition {
    /// Build a fresh `Open` position from a validated signal.
    pub fn from_signal(signal: &SignalRequest) -> Self {
        Self {
            position_id: Uuid::new_v4(),
            symbol: signal.symbol.trim().to_string(),
            side: signal.side,
            entry_price: signal.entry_price,
            stop_loss: signal.stop_loss,
            target: signal.target,
            status: TradeStatus::Open,
            opened_at: Utc::now(),
            close_price: None,
            closed_at: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_signal() -> SignalRequest {
        SignalRequest {
            symbol: "BTCUSDT".to_string(),
            side: TradeSide::Buy,
            entry_price: dec!(100),
            stop_loss: dec!(90),
            target: dec!(120),
        }
    }

    #[test]
    fn from_signal_starts_open() {
        let position = TradePosition::from_signal(&sample_signal());
        assert_eq!(position.status, TradeStatus::Open);
        assert!(position.is_open());
        assert!(position.close_price.is_none());
        assert!(position.closed_at.is_none());
    }

    #[test]
    fn from_signal_trims_symbol() {
        let mut signal = sample_signal();
        signal.symbol = "  ETHUSDT ".to_string();
        let position = TradePosition::from_signal(&signal);
        assert_eq!(position.symbol, "ETHUSDT");
    }

    #[test]
    fn status_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&TradeStatus::StopLossHit).unwrap();
        assert_eq!(json, "\"STOP_LOSS_HIT\"");
        let json = serde_json::to_string(&TradeStatus::TargetHit).unwrap();
        assert_eq!(json, "\"TARGET_HIT\"");
        let json = serde_json::to_string(&TradeStatus::Open).unwrap();
        assert_eq!(json, "\"OPEN\"");
    }

    #[test]
    fn terminal_statuses() {
        assert!(!TradeStatus::Open.is_terminal());
        assert!(TradeStatus::StopLossHit.is_terminal());
        assert!(TradeStatus::TargetHit.is_terminal());
    }
}
