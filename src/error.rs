// =============================================================================
// Error taxonomy
// =============================================================================
//
// `AnalysisError` is terminal for the request that produced it: nothing in the
// pipeline retries or degrades.  An individual indicator that cannot produce a
// reading is NOT an error; it surfaces as `Signal::Undefined` instead.
//
// `RequestError` covers malformed caller input and never reaches the core.
// =============================================================================

use thiserror::Error;

/// Series-level failures raised by the data source, Series Preparation, or the
/// indicator battery.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalysisError {
    /// The provider has no bars for this (symbol, interval) combination.
    #[error("no data returned for {symbol}@{interval}")]
    NoData { symbol: String, interval: String },

    /// The series contained zero bars when it reached Series Preparation.
    #[error("price series is empty")]
    EmptySeries,

    /// Fewer complete bars than the largest lookback window.
    #[error("insufficient data: need {required} complete bars, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// Bar timestamps must be strictly increasing once incomplete bars are gone.
    #[error("bar timestamps are not strictly increasing at index {index}")]
    MisorderedTimestamps { index: usize },

    /// Unexpected numeric failure not otherwise guarded.
    #[error("computation error: {0}")]
    Computation(String),

    /// The provider could not be reached or answered with garbage.
    #[error("market data provider error: {0}")]
    Upstream(String),

    /// The local request-weight budget for the provider is exhausted.
    #[error("provider rate limit reached: used weight {used} of {limit}")]
    RateLimited { used: u32, limit: u32 },
}

impl AnalysisError {
    /// Stable machine-readable kind, used in HTTP error bodies and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoData { .. } => "NoDataError",
            Self::EmptySeries => "EmptySeriesError",
            Self::InsufficientData { .. } => "InsufficientDataError",
            Self::MisorderedTimestamps { .. } => "MisorderedTimestampsError",
            Self::Computation(_) => "ComputationError",
            Self::Upstream(_) => "UpstreamError",
            Self::RateLimited { .. } => "RateLimitedError",
        }
    }

    pub fn computation(msg: impl Into<String>) -> Self {
        Self::Computation(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }
}

/// Caller-side validation failures (client errors).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("symbol is required")]
    MissingSymbol,

    #[error("interval is required")]
    MissingInterval,

    #[error("invalid interval '{0}', expected one of 1m, 3m, 5m, 15m, 30m, 1h, 2h, 4h, 6h, 8h, 12h, 1d, 3d, 1w, 1M")]
    InvalidInterval(String),

    #[error("invalid period '{0}', expected one of 1d, 5d, 1mo, 3mo, 6mo, 1y, 2y, 5y, 10y, max")]
    InvalidPeriod(String),
}

impl RequestError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingSymbol | Self::MissingInterval => "MissingParameterError",
            Self::InvalidInterval(_) | Self::InvalidPeriod(_) => "ValidationError",
        }
    }
}
