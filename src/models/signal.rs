//! # models::signal
//!
//! Defines [`SignalRequest`], the inbound payload a client POSTs to
//! `/api/signal` to open a tracked position.
//!
//! Field names stay camelCase on the wire (`entryPrice`, `stopLoss`,
//! `target`) so existing clients keep working unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::TradeSide;

/// A trade signal as received from the routing layer.
///
/// ### Request body (JSON)
/// ```json
/// {
///   "symbol": "BTCUSDT",
///   "side": "Buy",
///   "entryPrice": 67000.0,
///   "stopLoss": 65000.0,
///   "target": 71000.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalRequest {
    pub symbol: String,
    pub side: TradeSide,
    #[serde(rename = "entryPrice")]
    pub entry_price: Decimal,
    #[serde(rename = "stopLoss")]
    pub stop_loss: Decimal,
    pub target: Decimal,
}

impl SignalRequest {
    /// Check the business preconditions for admission.
    ///
    /// Returns the first violation as a human-readable reason, or `Ok(())`
    /// if the signal may be handed to the registry.
    pub fn validate(&self) -> Result<(), String> {
        if self.symbol.trim().is_empty() {
            return Err("symbol must not be empty".to_string());
        }
        if self.entry_price <= Decimal::ZERO {
            return Err("entryPrice must be positive".to_string());
        }
        if self.stop_loss <= Decimal::ZERO {
            return Err("stopLoss must be positive".to_string());
        }
        if self.target <= Decimal::ZERO {
            return Err("target must be positive".to_string());
        }
        Ok(())
    }
}
