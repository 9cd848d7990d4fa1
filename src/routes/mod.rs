//! Axum route handlers — the thin HTTP boundary over the engine.

pub mod signals;
pub mod trades;
