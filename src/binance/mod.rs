// =============================================================================
// Binance market-data adapter
// =============================================================================

pub mod client;
pub mod rate_limit;

pub use client::KlineClient;
