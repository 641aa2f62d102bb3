// =============================================================================
// Runtime Configuration: service settings loaded once at startup
// =============================================================================
//
// Read from `ta_signals.json` next to the binary.  All fields carry
// `#[serde(default)]` so that a partial (or empty) file loads cleanly; a
// missing file is handled by the caller, which falls back to defaults.
//
// Environment overrides (applied after the file):
//   TA_SIGNALS_BIND_ADDR      → bind_addr
//   TA_SIGNALS_PROVIDER_URL   → provider_base_url
// =============================================================================

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::binance::client::KLINES_MAX_LIMIT;
use crate::market_data::MIN_BARS;
use crate::types::LookbackPeriod;

pub const CONFIG_FILE: &str = "ta_signals.json";

const ENV_BIND_ADDR: &str = "TA_SIGNALS_BIND_ADDR";
const ENV_PROVIDER_URL: &str = "TA_SIGNALS_PROVIDER_URL";

// =============================================================================
// Default value helpers (used by serde)
// =============================================================================

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_provider_base_url() -> String {
    "https://api.binance.com".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_period() -> String {
    "max".to_string()
}

fn default_max_bars() -> usize {
    KLINES_MAX_LIMIT
}

// =============================================================================
// ServiceConfig
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP server listens on.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Base URL of the market-data provider.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: String,

    /// Timeout for a single provider call.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Look-back used when a request names no period.
    #[serde(default = "default_period")]
    pub default_period: String,

    /// Upper bound on bars fetched per request.
    #[serde(default = "default_max_bars")]
    pub max_bars: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            provider_base_url: default_provider_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            default_period: default_period(),
            max_bars: default_max_bars(),
        }
    }
}

impl ServiceConfig {
    /// Load from `path`.  Returns an error if the file is missing, malformed,
    /// or fails validation; the caller decides whether to fall back.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read service config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse service config from {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid service config in {}", path.display()))?;

        info!(
            path = %path.display(),
            bind_addr = %config.bind_addr,
            provider = %config.provider_base_url,
            max_bars = config.max_bars,
            "service config loaded"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.default_period
            .parse::<LookbackPeriod>()
            .context("default_period")?;
        if self.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be positive");
        }
        if !(MIN_BARS..=KLINES_MAX_LIMIT).contains(&self.max_bars) {
            anyhow::bail!(
                "max_bars must be within {MIN_BARS}..={KLINES_MAX_LIMIT}, got {}",
                self.max_bars
            );
        }
        Ok(())
    }

    /// Parsed `default_period`; `max` if it does not parse.
    pub fn default_lookback(&self) -> LookbackPeriod {
        self.default_period.parse().unwrap_or_else(|_| {
            warn!(period = %self.default_period, "invalid default period, using max");
            LookbackPeriod::Max
        })
    }

    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        if let Some(addr) = non_empty(ENV_BIND_ADDR) {
            info!(bind_addr = %addr, "bind address overridden from environment");
            self.bind_addr = addr;
        }
        if let Some(url) = non_empty(ENV_PROVIDER_URL) {
            info!(provider = %url, "provider URL overridden from environment");
            self.provider_base_url = url;
        }
    }
}
