// =============================================================================
// Shared types used across the signal service
// =============================================================================

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

/// Discrete market-state label emitted for an indicator reading.
///
/// Each indicator draws from one family of labels; `Undefined` is shared by
/// all of them and means the reading could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Bullish,
    Bearish,
    Overbought,
    Oversold,
    Neutral,
    #[serde(rename = "Strong Trend")]
    StrongTrend,
    #[serde(rename = "Weak Trend")]
    WeakTrend,
    #[serde(rename = "High Volatility")]
    HighVolatility,
    #[serde(rename = "Low Volatility")]
    LowVolatility,
    Undefined,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Overbought => "Overbought",
            Self::Oversold => "Oversold",
            Self::Neutral => "Neutral",
            Self::StrongTrend => "Strong Trend",
            Self::WeakTrend => "Weak Trend",
            Self::HighVolatility => "High Volatility",
            Self::LowVolatility => "Low Volatility",
            Self::Undefined => "Undefined",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Interval
// =============================================================================

/// Sampling interval of a bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    M1,
    M3,
    M5,
    M15,
    M30,
    H1,
    H2,
    H4,
    H6,
    H8,
    H12,
    D1,
    D3,
    W1,
    Mo1,
}

impl Interval {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::M1 => "1m",
            Self::M3 => "3m",
            Self::M5 => "5m",
            Self::M15 => "15m",
            Self::M30 => "30m",
            Self::H1 => "1h",
            Self::H2 => "2h",
            Self::H4 => "4h",
            Self::H6 => "6h",
            Self::H8 => "8h",
            Self::H12 => "12h",
            Self::D1 => "1d",
            Self::D3 => "3d",
            Self::W1 => "1w",
            Self::Mo1 => "1M",
        }
    }

    /// Nominal length of one bar in minutes (a month counts as 30 days).
    pub fn minutes(&self) -> u64 {
        match self {
            Self::M1 => 1,
            Self::M3 => 3,
            Self::M5 => 5,
            Self::M15 => 15,
            Self::M30 => 30,
            Self::H1 => 60,
            Self::H2 => 120,
            Self::H4 => 240,
            Self::H6 => 360,
            Self::H8 => 480,
            Self::H12 => 720,
            Self::D1 => 1_440,
            Self::D3 => 4_320,
            Self::W1 => 10_080,
            Self::Mo1 => 43_200,
        }
    }
}

impl FromStr for Interval {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // "1M" (month) and "1m" (minute) differ only by case, so no lowercasing.
        let iv = match s.trim() {
            "1m" => Self::M1,
            "3m" => Self::M3,
            "5m" => Self::M5,
            "15m" => Self::M15,
            "30m" => Self::M30,
            "1h" => Self::H1,
            "2h" => Self::H2,
            "4h" => Self::H4,
            "6h" => Self::H6,
            "8h" => Self::H8,
            "12h" => Self::H12,
            "1d" => Self::D1,
            "3d" => Self::D3,
            "1w" => Self::W1,
            "1M" => Self::Mo1,
            other => return Err(RequestError::InvalidInterval(other.to_string())),
        };
        Ok(iv)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lookback period
// =============================================================================

/// How far back the requested history reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookbackPeriod {
    Day1,
    Day5,
    Month1,
    Month3,
    Month6,
    Year1,
    Year2,
    Year5,
    Year10,
    Max,
}

impl LookbackPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "1d",
            Self::Day5 => "5d",
            Self::Month1 => "1mo",
            Self::Month3 => "3mo",
            Self::Month6 => "6mo",
            Self::Year1 => "1y",
            Self::Year2 => "2y",
            Self::Year5 => "5y",
            Self::Year10 => "10y",
            Self::Max => "max",
        }
    }

    /// Span in minutes, `None` for `max`.
    fn minutes(&self) -> Option<u64> {
        const DAY: u64 = 1_440;
        match self {
            Self::Day1 => Some(DAY),
            Self::Day5 => Some(5 * DAY),
            Self::Month1 => Some(30 * DAY),
            Self::Month3 => Some(90 * DAY),
            Self::Month6 => Some(180 * DAY),
            Self::Year1 => Some(365 * DAY),
            Self::Year2 => Some(730 * DAY),
            Self::Year5 => Some(1_825 * DAY),
            Self::Year10 => Some(3_650 * DAY),
            Self::Max => None,
        }
    }

    /// Number of bars of `interval` needed to cover this period, capped at
    /// `max_bars`.  Always at least one bar.
    pub fn bar_count(&self, interval: Interval, max_bars: usize) -> usize {
        match self.minutes() {
            None => max_bars,
            Some(span) => {
                let bars = span.div_ceil(interval.minutes()).max(1);
                usize::try_from(bars).unwrap_or(usize::MAX).min(max_bars)
            }
        }
    }
}

impl FromStr for LookbackPeriod {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let period = match s.trim().to_ascii_lowercase().as_str() {
            "1d" => Self::Day1,
            "5d" => Self::Day5,
            "1mo" => Self::Month1,
            "3mo" => Self::Month3,
            "6mo" => Self::Month6,
            "1y" => Self::Year1,
            "2y" => Self::Year2,
            "5y" => Self::Year5,
            "10y" => Self::Year10,
            "max" => Self::Max,
            _ => return Err(RequestError::InvalidPeriod(s.to_string())),
        };
        Ok(period)
    }
}

impl std::fmt::Display for LookbackPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Analysis request
// =============================================================================

/// A validated request for a signal snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub symbol: String,
    pub interval: Interval,
    pub period: LookbackPeriod,
}

impl AnalysisRequest {
    /// Validate raw caller input.  `default_period` applies when no period is
    /// supplied.
    pub fn parse(
        symbol: Option<&str>,
        interval: Option<&str>,
        period: Option<&str>,
        default_period: LookbackPeriod,
    ) -> Result<Self, RequestError> {
        let symbol = symbol
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::MissingSymbol)?;

        let interval = interval
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RequestError::MissingInterval)?
            .parse::<Interval>()?;

        let period = match period.map(str::trim).filter(|s| !s.is_empty()) {
            Some(p) => p.parse::<LookbackPeriod>()?,
            None => default_period,
        };

        Ok(Self {
            symbol,
            interval,
            period,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signal_labels_serialise_verbatim() {
        let json = serde_json::to_string(&Signal::StrongTrend).unwrap();
        assert_eq!(json, "\"Strong Trend\"");
        let json = serde_json::to_string(&Signal::LowVolatility).unwrap();
        assert_eq!(json, "\"Low Volatility\"");
        let json = serde_json::to_string(&Signal::Undefined).unwrap();
        assert_eq!(json, "\"Undefined\"");
        assert_eq!(Signal::HighVolatility.to_string(), "High Volatility");
    }

    #[test]
    fn interval_minute_and_month_are_distinct() {
        assert_eq!("1m".parse::<Interval>().unwrap(), Interval::M1);
        assert_eq!("1M".parse::<Interval>().unwrap(), Interval::Mo1);
        assert!("2m".parse::<Interval>().is_err());
    }

    #[test]
    fn period_bar_count() {
        assert_eq!(LookbackPeriod::Max.bar_count(Interval::D1, 1000), 1000);
        assert_eq!(LookbackPeriod::Month3.bar_count(Interval::D1, 1000), 90);
        assert_eq!(LookbackPeriod::Day1.bar_count(Interval::M5, 1000), 288);
        // A week in one-month bars still yields one bar.
        assert_eq!(LookbackPeriod::Day5.bar_count(Interval::Mo1, 1000), 1);
        // Capped at the provider ceiling.
        assert_eq!(LookbackPeriod::Year10.bar_count(Interval::M1, 1000), 1000);
    }

    #[test]
    fn request_parse_normalises_symbol() {
        let req =
            AnalysisRequest::parse(Some(" btcusdt "), Some("1h"), None, LookbackPeriod::Max)
                .unwrap();
        assert_eq!(req.symbol, "BTCUSDT");
        assert_eq!(req.interval, Interval::H1);
        assert_eq!(req.period, LookbackPeriod::Max);
    }

    #[test]
    fn request_parse_rejects_missing_fields() {
        assert_eq!(
            AnalysisRequest::parse(None, Some("1d"), None, LookbackPeriod::Max),
            Err(RequestError::MissingSymbol)
        );
        assert_eq!(
            AnalysisRequest::parse(Some("   "), Some("1d"), None, LookbackPeriod::Max),
            Err(RequestError::MissingSymbol)
        );
        assert_eq!(
            AnalysisRequest::parse(Some("ETHUSDT"), None, None, LookbackPeriod::Max),
            Err(RequestError::MissingInterval)
        );
        assert_eq!(
            AnalysisRequest::parse(Some("ETHUSDT"), Some("1d"), Some("7w"), LookbackPeriod::Max),
            Err(RequestError::InvalidPeriod("7w".into()))
        );
    }
}
