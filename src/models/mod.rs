//! Domain models shared across the entire papertrade system.

pub mod position;
pub mod signal;

pub use position::{TradePosition, TradeSide, TradeStatus};
pub use signal::SignalRequest;
