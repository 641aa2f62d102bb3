// =============================================================================
// Central Application State
// =============================================================================
//
// Shared across handlers via `Arc<AppState>`.  Holds no analysis results:
// every request recomputes from a fresh fetch.  The only mutable pieces are
// operational telemetry (request counter and a bounded error log).
//
// Thread safety:
//   - Atomic counter for requests served.
//   - parking_lot::RwLock for the recent-error ring.
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::market_data::DataSource;
use crate::runtime_config::ServiceConfig;
use crate::signals::IndicatorBattery;
use crate::types::LookbackPeriod;

/// A recorded failure, kept for diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Human-readable error message.
    pub message: String,
    /// Machine-readable error kind (e.g. `InsufficientDataError`).
    pub code: Option<String>,
    /// Request that failed, when one was assigned.
    pub request_id: Option<String>,
    /// ISO 8601 timestamp.
    pub at: String,
}

/// Maximum number of recent errors to retain.
const MAX_RECENT_ERRORS: usize = 50;

pub struct AppState {
    pub config: ServiceConfig,
    pub default_period: LookbackPeriod,
    pub source: Arc<dyn DataSource>,
    pub battery: Arc<IndicatorBattery>,

    requests_served: AtomicU64,
    recent_errors: RwLock<VecDeque<ErrorRecord>>,

    /// Instant when the service was started. Used for uptime calculations.
    pub start_time: std::time::Instant,
}

impl AppState {
    pub fn new(config: ServiceConfig, source: Arc<dyn DataSource>) -> Self {
        let default_period = config.default_lookback();
        Self {
            config,
            default_period,
            source,
            battery: Arc::new(IndicatorBattery::standard()),
            requests_served: AtomicU64::new(0),
            recent_errors: RwLock::new(VecDeque::with_capacity(MAX_RECENT_ERRORS)),
            start_time: std::time::Instant::now(),
        }
    }

    // ── Counters ────────────────────────────────────────────────────────

    pub fn record_request(&self) -> u64 {
        self.requests_served.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    // ── Error Log ───────────────────────────────────────────────────────

    /// Record an error.  The log is bounded by [`MAX_RECENT_ERRORS`]; oldest
    /// entries are evicted when the limit is reached.
    pub fn push_error(&self, message: String, code: Option<String>, request_id: Option<String>) {
        let record = ErrorRecord {
            message,
            code,
            request_id,
            at: Utc::now().to_rfc3339(),
        };

        let mut errors = self.recent_errors.write();
        if errors.len() == MAX_RECENT_ERRORS {
            errors.pop_front();
        }
        errors.push_back(record);
    }

    /// Recent errors, newest last.
    pub fn recent_errors(&self) -> Vec<ErrorRecord> {
        self.recent_errors.read().iter().cloned().collect()
    }
}
