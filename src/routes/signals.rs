//! # routes::signals
//!
//! Axum route handler for signal submission.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{error::AppError, ingest, models::SignalRequest, state::SharedState};

// ─── POST /api/signal ─────────────────────────────────────────────────────────

/// Admit a new trade signal.
///
/// ### Response
/// * `201 Created` with the new position id on admission
/// * `400 Bad Request` for an invalid signal
/// * `409 Conflict` when an Open position already exists for the symbol
pub async fn submit_signal(
    State(state): State<SharedState>,
    Json(signal): Json<SignalRequest>,
) -> Result<impl IntoResponse, AppError> {
    let position = ingest::submit(&state, signal).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "ok":          true,
            "position_id": position.position_id,
            "symbol":      position.symbol,
            "message":     "Signal received",
        })),
    ))
}
