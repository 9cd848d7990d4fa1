//! # routes::trades
//!
//! Axum route handlers for position queries.
//!
//! | Method | Path          | Description                               |
//! |--------|---------------|-------------------------------------------|
//! | GET    | `/api/trades` | All positions (open + closed), in order   |
//! | GET    | `/api/health` | Loop liveness counters                    |

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::SharedState;

// ─── GET /api/trades ──────────────────────────────────────────────────────────

/// Render the full registry snapshot in admission order.
pub async fn list_trades(State(state): State<SharedState>) -> impl IntoResponse {
    let trades = state.registry.snapshot().await;

    Json(json!({
        "ok":     true,
        "trades": trades,
    }))
}

// ─── GET /api/health ──────────────────────────────────────────────────────────

/// Liveness counters — a stalled `tick_count` means the monitor loop died.
pub async fn health_check(State(state): State<SharedState>) -> impl IntoResponse {
    let tick_count = state
        .tick_count
        .load(std::sync::atomic::Ordering::Relaxed);

    Json(json!({
        "ok":             true,
        "tick_count":     tick_count,
        "open_positions": state.registry.open_count().await,
        "symbols_cached": state.prices.len().await,
    }))
}
