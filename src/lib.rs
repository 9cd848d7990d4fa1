// Core modules
pub mod config;
pub mod engine;
pub mod error;
pub mod ingest;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;

// Re-export commonly used types
pub use models::{SignalRequest, TradePosition, TradeSide, TradeStatus};
pub use state::{build_state, AppState, SharedState};
