use async_trait::async_trait;

use crate::error::AnalysisError;
use crate::market_data::RawBar;
use crate::types::Interval;

/// Anything that can supply a raw bar table for a (symbol, interval) pair.
///
/// Implementations perform a single attempt: the caller treats every error as
/// terminal for the request.  An empty answer must be reported as
/// [`AnalysisError::NoData`] rather than `Ok(vec![])`.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch up to `bar_count` of the most recent bars, oldest first.
    async fn fetch_bars(
        &self,
        symbol: &str,
        interval: Interval,
        bar_count: usize,
    ) -> Result<Vec<RawBar>, AnalysisError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Request weight spent against the provider's budget in the current
    /// window, for providers that meter requests.
    fn used_weight(&self) -> Option<u32> {
        None
    }
}
