// =============================================================================
// Binance Kline Client: public market data only
// =============================================================================
//
// Fetches OHLCV bars from GET /api/v3/klines.  No API key is needed; nothing
// here signs requests or touches an account.
// =============================================================================

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use super::rate_limit::{RateLimitTracker, WEIGHT_HARD_LIMIT};
use crate::error::AnalysisError;
use crate::market_data::{DataSource, RawBar};
use crate::types::Interval;

/// Request weight Binance charges for one klines call.
const KLINES_WEIGHT: u32 = 2;
/// Largest `limit` the klines endpoint accepts.
pub const KLINES_MAX_LIMIT: usize = 1000;
/// Binance error code for a symbol the exchange does not list.
const INVALID_SYMBOL_CODE: i64 = -1121;

/// Binance public REST client implementing [`DataSource`].
#[derive(Clone)]
pub struct KlineClient {
    base_url: String,
    client: reqwest::Client,
    rate_limit: Arc<RateLimitTracker>,
}

impl KlineClient {
    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> anyhow::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        debug!(%base_url, timeout_secs, "KlineClient initialised");

        Ok(Self {
            base_url,
            client,
            rate_limit: Arc::new(RateLimitTracker::new()),
        })
    }

    // -------------------------------------------------------------------------
    // Public market data
    // -------------------------------------------------------------------------

    /// GET /api/v3/klines
    ///
    /// Array indices of each entry:
    ///   [0] openTime, [1] open, [2] high, [3] low, [4] close, [5] volume,
    ///   [6] closeTime, ...
    #[instrument(skip(self), name = "binance::get_klines")]
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: Interval,
        limit: usize,
    ) -> Result<Vec<RawBar>, AnalysisError> {
        if !self.rate_limit.can_send_request(KLINES_WEIGHT) {
            return Err(AnalysisError::RateLimited {
                used: self.rate_limit.used_weight(),
                limit: WEIGHT_HARD_LIMIT,
            });
        }

        let limit = limit.clamp(1, KLINES_MAX_LIMIT);
        let url = format!("{}/api/v3/klines", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("symbol", symbol),
                ("interval", interval.as_str()),
                ("limit", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AnalysisError::upstream(format!("GET /api/v3/klines failed: {e}")))?;

        self.rate_limit.update_from_headers(resp.headers());

        let status = resp.status();
        let body: serde_json::Value = resp.json().await.map_err(|e| {
            AnalysisError::upstream(format!("failed to parse klines response: {e}"))
        })?;

        if is_unknown_symbol(status, &body) {
            warn!(symbol, interval = interval.as_str(), "provider does not list symbol");
            return Err(AnalysisError::NoData {
                symbol: symbol.to_string(),
                interval: interval.as_str().to_string(),
            });
        }
        if !status.is_success() {
            return Err(AnalysisError::upstream(format!(
                "GET /api/v3/klines returned {status}: {body}"
            )));
        }

        let bars = parse_klines(&body)?;
        if bars.is_empty() {
            return Err(AnalysisError::NoData {
                symbol: symbol.to_string(),
                interval: interval.as_str().to_string(),
            });
        }

        debug!(symbol, interval = interval.as_str(), count = bars.len(), "klines fetched");
        Ok(bars)
    }
}

#[async_trait]
impl DataSource for KlineClient {
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        bar_count: usize,
    ) -> Result<Vec<RawBar>, AnalysisError> {
        self.get_klines(symbol, interval, bar_count).await
    }

    fn name(&self) -> &'static str {
        "binance"
    }

    fn used_weight(&self) -> Option<u32> {
        Some(self.rate_limit.used_weight())
    }
}

impl std::fmt::Debug for KlineClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KlineClient")
            .field("base_url", &self.base_url)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Payload parsing
// -----------------------------------------------------------------------------

/// Parse the array-of-arrays klines payload.
///
/// An entry without a usable open time is skipped.  An OHLCV field that is
/// absent or unparsable becomes `None`, leaving the bar to Series Preparation.
pub fn parse_klines(body: &serde_json::Value) -> Result<Vec<RawBar>, AnalysisError> {
    let raw = body
        .as_array()
        .ok_or_else(|| AnalysisError::upstream("klines response is not an array"))?;

    let mut bars = Vec::with_capacity(raw.len());
    for entry in raw {
        let Some(arr) = entry.as_array() else {
            warn!("skipping kline entry that is not an array");
            continue;
        };
        let Some(timestamp) = arr.first().and_then(serde_json::Value::as_i64) else {
            warn!(elements = arr.len(), "skipping kline entry without open time");
            continue;
        };

        let field = |i: usize| arr.get(i).and_then(parse_str_f64);
        bars.push(RawBar {
            timestamp,
            open: field(1),
            high: field(2),
            low: field(3),
            close: field(4),
            volume: field(5),
        });
    }
    Ok(bars)
}

/// Binance rejects an unlisted symbol with HTTP 400 and
/// `{"code": -1121, "msg": "Invalid symbol."}`.
fn is_unknown_symbol(status: reqwest::StatusCode, body: &serde_json::Value) -> bool {
    if status != reqwest::StatusCode::BAD_REQUEST {
        return false;
    }
    let code = body.get("code").and_then(serde_json::Value::as_i64);
    let msg = body.get("msg").and_then(serde_json::Value::as_str).unwrap_or_default();
    code == Some(INVALID_SYMBOL_CODE) || msg.eq_ignore_ascii_case("invalid symbol.")
}

/// Parse a JSON value that may be either a string or a number into `f64`.
fn parse_str_f64(val: &serde_json::Value) -> Option<f64> {
    match val {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    }
}
