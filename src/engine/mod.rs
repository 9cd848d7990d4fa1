//! Background engine loops: price ingestion and trade monitoring.

pub mod feed;
pub mod monitor;

pub use feed::PriceFeedClient;
pub use monitor::TradeMonitor;
