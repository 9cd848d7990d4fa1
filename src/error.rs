//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`.  Axum's `IntoResponse` impl
//! converts these into structured JSON error bodies so the client always
//! gets a machine-readable response even on failure.
//!
//! Price-feed failures are deliberately *not* represented here: they are
//! absorbed inside the feed loop (logged and skipped) and never surface to
//! a caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::store::AdmitError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The signal payload was syntactically correct but semantically
    /// invalid (blank symbol, non-positive price). Caller must correct
    /// and resubmit.
    #[error("Invalid signal: {0}")]
    InvalidSignal(String),

    /// An Open position already exists for the symbol. Caller may retry
    /// once the existing position closes.
    #[error("Trade already open for symbol {0}")]
    DuplicateOpenSymbol(String),

    /// Catch-all for unexpected failures.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AdmitError> for AppError {
    fn from(err: AdmitError) -> Self {
        match err {
            AdmitError::DuplicateOpenSymbol(symbol) => AppError::DuplicateOpenSymbol(symbol),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidSignal(msg) => (StatusCode::BAD_REQUEST, format!("Invalid signal: {msg}")),
            AppError::DuplicateOpenSymbol(symbol) => (
                StatusCode::CONFLICT,
                format!("Trade already open for symbol {symbol}"),
            ),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {err}"),
            ),
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}
