//! Shared concurrent stores — the only mutable state in the system.
//!
//! All coordination between the admission path, the price feed loop and
//! the monitor loop happens through the atomicity contracts of these two
//! stores; there is no cross-task signaling.

pub mod prices;
pub mod registry;

pub use prices::{PriceCache, PriceObservation};
pub use registry::{AdmitError, CloseOutcome, TradeRegistry};
