// =============================================================================
// Request-Weight Tracker: keeps kline fetches under the Binance weight budget
// =============================================================================
//
// Binance allows 1200 request weight per minute per IP; we hard-cap ourselves
// at 1000.  The tracker reads the `X-MBX-USED-WEIGHT-1M` response header after
// every request.  The budget resets with each calendar minute, so a reading
// taken in an earlier minute no longer counts.
// =============================================================================

use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

use tracing::{debug, warn};

/// Hard ceiling at which we refuse to send additional requests.
pub const WEIGHT_HARD_LIMIT: u32 = 1000;
/// Soft warning threshold.
const WEIGHT_WARN_THRESHOLD: u32 = 800;

const WEIGHT_HEADER: &str = "x-mbx-used-weight-1m";

/// Thread-safe weight tracker backed by atomic counters.
pub struct RateLimitTracker {
    used_weight_1m: AtomicU32,
    /// Epoch minute in which `used_weight_1m` was observed.
    window_minute: AtomicI64,
}

fn current_minute() -> i64 {
    chrono::Utc::now().timestamp() / 60
}

impl RateLimitTracker {
    pub fn new() -> Self {
        Self {
            used_weight_1m: AtomicU32::new(0),
            window_minute: AtomicI64::new(0),
        }
    }

    /// Update the weight counter from Binance response headers.
    pub fn update_from_headers(&self, headers: &reqwest::header::HeaderMap) {
        let weight = headers
            .get(WEIGHT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u32>().ok());
        if let Some(w) = weight {
            self.record(w, current_minute());
        }
    }

    fn record(&self, weight: u32, minute: i64) {
        let prev = self.used_at(minute);
        self.used_weight_1m.store(weight, Ordering::Relaxed);
        self.window_minute.store(minute, Ordering::Relaxed);

        if weight >= WEIGHT_WARN_THRESHOLD && prev < WEIGHT_WARN_THRESHOLD {
            warn!(
                used_weight = weight,
                hard_limit = WEIGHT_HARD_LIMIT,
                "rate-limit weight crossed warning threshold"
            );
        }
        debug!(used_weight_1m = weight, "rate-limit weight updated from header");
    }

    fn used_at(&self, minute: i64) -> u32 {
        if self.window_minute.load(Ordering::Relaxed) == minute {
            self.used_weight_1m.load(Ordering::Relaxed)
        } else {
            0
        }
    }

    /// Weight used in the current minute.
    pub fn used_weight(&self) -> u32 {
        self.used_at(current_minute())
    }

    /// Return `true` if we can afford to spend `weight` more request weight
    /// without exceeding the hard limit.
    pub fn can_send_request(&self, weight: u32) -> bool {
        self.can_send_at(weight, current_minute())
    }

    fn can_send_at(&self, weight: u32, minute: i64) -> bool {
        let current = self.used_at(minute);
        let allowed = current.saturating_add(weight) <= WEIGHT_HARD_LIMIT;
        if !allowed {
            warn!(
                current_weight = current,
                requested_weight = weight,
                hard_limit = WEIGHT_HARD_LIMIT,
                "request blocked, would exceed rate limit"
            );
        }
        allowed
    }
}

impl Default for RateLimitTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RateLimitTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitTracker")
            .field("used_weight_1m", &self.used_weight_1m.load(Ordering::Relaxed))
            .field("window_minute", &self.window_minute.load(Ordering::Relaxed))
            .finish()
    }
}
