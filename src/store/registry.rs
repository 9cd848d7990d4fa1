//! # store::registry
//!
//! [`TradeRegistry`] — the ordered collection of every position ever
//! admitted, open or closed.
//!
//! The registry is the only component allowed to create or mutate
//! positions. Its two mutating operations are each a single atomic
//! check-then-act under the write lock:
//!
//! * `try_admit` — the duplicate-Open scan and the insert happen under
//!   one lock acquisition, so two concurrent admissions for the same
//!   symbol can never both succeed.
//! * `close_if_open` — the status check and the transition happen under
//!   one lock acquisition, so a position closes at most once even with
//!   concurrent evaluators.
//!
//! Readers get cloned snapshots; nobody iterates live entries.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{SignalRequest, TradePosition, TradeStatus};

// ─── AdmitError ───────────────────────────────────────────────────────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdmitError {
    /// An Open position already exists for this symbol.
    #[error("trade already open for symbol {0}")]
    DuplicateOpenSymbol(String),
}

// ─── CloseOutcome ─────────────────────────────────────────────────────────────

/// Result of a `close_if_open` request.
#[derive(Debug, Clone, PartialEq)]
pub enum CloseOutcome {
    /// The position was Open and has now transitioned.
    Closed(TradePosition),
    /// The position was unknown or already closed; nothing changed.
    NoOp,
}

// ─── TradeRegistry ────────────────────────────────────────────────────────────

/// Insertion-ordered registry of all tracked positions.
///
/// Closed positions are retained forever for the query endpoint.
#[derive(Debug, Default)]
pub struct TradeRegistry {
    positions: RwLock<Vec<TradePosition>>,
}

impl TradeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically check the one-Open-position-per-symbol invariant and,
    /// if it holds, create and store a new Open position.
    pub async fn try_admit(&self, signal: &SignalRequest) -> Result<TradePosition, AdmitError> {
        let symbol = signal.symbol.trim();
        let mut positions = self.positions.write().await;

        if positions.iter().any(|p| p.symbol == symbol && p.is_open()) {
            return Err(AdmitError::DuplicateOpenSymbol(symbol.to_string()));
        }

        let position = TradePosition::from_signal(signal);
        positions.push(position.clone());
        Ok(position)
    }

    /// Point-in-time copy of every position, in admission order.
    ///
    /// Safe to iterate without holding any lock; concurrent admissions or
    /// closures never mutate an already-taken snapshot.
    pub async fn snapshot(&self) -> Vec<TradePosition> {
        let positions = self.positions.read().await;
        positions.clone()
    }

    /// Transition a position to a terminal status, only if it is still
    /// Open at the time of the call.
    ///
    /// Requests carrying `TradeStatus::Open` are a `NoOp` by construction.
    /// Idempotent under concurrent callers: the second closer sees a
    /// non-Open status and gets `NoOp`.
    pub async fn close_if_open(
        &self,
        position_id: Uuid,
        status: TradeStatus,
        close_price: Decimal,
    ) -> CloseOutcome {
        if !status.is_terminal() {
            return CloseOutcome::NoOp;
        }

        let mut positions = self.positions.write().await;
        match positions
            .iter_mut()
            .find(|p| p.position_id == position_id && p.is_open())
        {
            Some(position) => {
                position.status = status;
                position.close_price = Some(close_price);
                position.closed_at = Some(Utc::now());
                CloseOutcome::Closed(position.clone())
            }
            None => CloseOutcome::NoOp,
        }
    }

    /// Number of currently Open positions. Used by the health endpoint.
    pub async fn open_count(&self) -> usize {
        let positions = self.positions.read().await;
        positions.iter().filter(|p| p.is_open()).count()
    }
}
