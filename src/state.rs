//! # state
//!
//! The papertrade **shared application state** — the two stores that every
//! concurrent task coordinates through.
//!
//! ## Design Decisions
//!
//! * `Arc<AppState>` is cloned cheaply into every Axum handler via
//!   `axum::extract::State` and into both background loops.
//! * The stores own their locks internally; no caller ever sees a guard.
//!   All cross-task coordination goes through their atomic operations.
//! * The `reqwest::Client` is shared system-wide (connection pooling,
//!   built once).

use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use crate::store::{PriceCache, TradeRegistry};

// ─── AppState ─────────────────────────────────────────────────────────────────

/// Top-level shared state injected into every handler and loop.
///
/// Clone via `Arc::clone` — the `Arc` wrapper makes that O(1).
pub struct AppState {
    /// Every position ever admitted, open or closed.
    pub registry: TradeRegistry,

    /// Latest known price per symbol.
    pub prices: PriceCache,

    /// Shared HTTP client for the upstream price feed.
    pub http_client: reqwest::Client,

    /// Counter of monitor evaluation ticks processed. Useful for
    /// health-check dashboards and detecting a stalled loop.
    pub tick_count: AtomicU64,
}

impl AppState {
    /// Construct a fresh, empty application state.
    pub fn new() -> Self {
        Self {
            registry: TradeRegistry::new(),
            prices: PriceCache::new(),
            http_client: reqwest::Client::new(),
            tick_count: AtomicU64::new(0),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience type alias so callers can write `SharedState` instead of the
/// full generic form.
pub type SharedState = Arc<AppState>;

/// Construct the shared application state and wrap it in an `Arc` ready for
/// injection into the Axum router and the background loops.
pub fn build_state() -> SharedState {
    Arc::new(AppState::new())
}
