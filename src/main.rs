//! # papertrade — Paper-Trade Signal Tracker
//!
//! ## Architecture Overview
//!
//! ```text
//!  ┌──────────────┐   POST /api/signal           ┌──────────────────────┐
//!  │  Client      │ ─────────────────────────────▶│  TradeRegistry       │
//!  │  (signals)   │   GET  /api/trades            │  (one Open position  │
//!  └──────────────┘ ◀─────────────────────────────│   per symbol)        │
//!                                                 └──────────┬───────────┘
//!  ┌──────────────┐   GET ticker/price                       │ snapshot +
//!  │  Upstream    │ ◀──────────────┐                         │ close_if_open
//!  │  ticker API  │                │                         ▼
//!  └──────────────┘        ┌───────┴───────┐        ┌────────────────┐
//!                          │ PriceFeed     │──set──▶│  PriceCache    │
//!                          │ loop          │        │                │◀─get─ TradeMonitor loop
//!                          └───────────────┘        └────────────────┘
//! ```
//!
//! ## Environment Variables
//!
//! | Variable                | Default                   | Description                      |
//! |-------------------------|---------------------------|----------------------------------|
//! | `BIND_ADDR`             | `0.0.0.0:5001`            | Address Axum listens on          |
//! | `FEED_BASE_URL`         | `https://api.binance.com` | Upstream ticker API base URL     |
//! | `FEED_SYMBOLS`          | `BTCUSDT`                 | Comma-separated symbols to poll  |
//! | `FEED_INTERVAL_SECS`    | `5`                       | Price polling interval           |
//! | `MONITOR_INTERVAL_SECS` | `5`                       | Position evaluation interval     |
//! | `FEED_TIMEOUT_SECS`     | `5`                       | Per-attempt upstream timeout     |
//! | `RUST_LOG`              | —                         | Tracing filter                   |

use axum::{
    routing::{get, post},
    Router,
};
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use papertrade::config::Config;
use papertrade::engine::{PriceFeedClient, TradeMonitor};
use papertrade::routes::{
    signals::submit_signal,
    trades::{health_check, list_trades},
};
use papertrade::state::build_state;

// ─── Entry Point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Load .env (optional — CI/prod can use real env vars) ──────────────
    dotenvy::dotenv().ok();

    // ── 2. Initialise structured logging ─────────────────────────────────────
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("papertrade=debug".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;

    // ── 3. Build shared state and the shutdown token ──────────────────────────
    let state = build_state();
    let shutdown = CancellationToken::new();

    // ── 4. Spawn the two background loops ─────────────────────────────────────
    let feed_handle = tokio::spawn(
        PriceFeedClient::from_config(&config).run(state.clone(), shutdown.clone()),
    );
    let monitor_handle = tokio::spawn(
        TradeMonitor::new(config.monitor_interval).run(state.clone(), shutdown.clone()),
    );

    // ── 5. Build CORS layer ───────────────────────────────────────────────────
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ── 6. Build the Axum router ──────────────────────────────────────────────
    let app = Router::new()
        .route("/api/signal", post(submit_signal))
        .route("/api/trades", get(list_trades))
        .route("/api/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    info!(addr = %config.bind_addr, "papertrade server starting");

    // ── 7. Serve until ctrl-c, then stop the loops ────────────────────────────
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move {
                let _ = tokio::signal::ctrl_c().await;
                shutdown.cancel();
            }
        })
        .await?;

    shutdown.cancel();
    let _ = feed_handle.await;
    let _ = monitor_handle.await;

    info!("papertrade stopped");
    Ok(())
}
