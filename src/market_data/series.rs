use tracing::debug;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Data types
// ---------------------------------------------------------------------------

/// Largest lookback window used by the indicator battery.  A cleaned series
/// shorter than this is rejected outright.
pub const MIN_BARS: usize = 20;

/// A bar as delivered by the provider.  Any OHLCV field may be missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawBar {
    /// Bar open time, milliseconds since the UNIX epoch.
    pub timestamp: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

impl RawBar {
    /// Convert into a complete bar, or `None` when any field is missing or
    /// non-finite.  The open only takes part in the completeness check; no
    /// indicator reads it.
    pub fn complete(&self) -> Option<PriceBar> {
        let finite = |v: Option<f64>| v.filter(|x| x.is_finite());
        finite(self.open)?;
        Some(PriceBar {
            timestamp: self.timestamp,
            high: finite(self.high)?,
            low: finite(self.low)?,
            close: finite(self.close)?,
            volume: finite(self.volume)?,
        })
    }
}

/// A complete bar: every numeric field is finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub timestamp: i64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// A cleaned, chronologically ordered bar series.
///
/// Only [`prepare`] builds one, so holding a `Series` means every bar is
/// complete, timestamps strictly increase, and there are at least
/// [`MIN_BARS`] bars.  Column views are materialised once so indicators can
/// borrow plain slices.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<PriceBar>,
    high: Vec<f64>,
    low: Vec<f64>,
    close: Vec<f64>,
    volume: Vec<f64>,
}

impl Series {
    fn from_bars(bars: Vec<PriceBar>) -> Self {
        Self {
            high: bars.iter().map(|b| b.high).collect(),
            low: bars.iter().map(|b| b.low).collect(),
            close: bars.iter().map(|b| b.close).collect(),
            volume: bars.iter().map(|b| b.volume).collect(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn high(&self) -> &[f64] {
        &self.high
    }

    pub fn low(&self) -> &[f64] {
        &self.low
    }

    pub fn close(&self) -> &[f64] {
        &self.close
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    /// Open time of the most recent bar.
    pub fn last_timestamp(&self) -> i64 {
        // Non-empty by construction.
        self.bars()[self.len() - 1].timestamp
    }

    /// Close of the most recent bar.
    pub fn last_close(&self) -> f64 {
        // Non-empty by construction.
        self.close[self.close.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// Series Preparation
// ---------------------------------------------------------------------------

/// Validate and clean a raw bar table.
///
/// Drops every bar with a missing or non-finite field and keeps the rest in
/// their original order.  Fails when:
/// - the input is empty (`EmptySeries`),
/// - the surviving bars do not have strictly increasing timestamps
///   (`MisorderedTimestamps`, index into the cleaned series),
/// - fewer than [`MIN_BARS`] bars survive (`InsufficientData`).
pub fn prepare(raw: &[RawBar]) -> Result<Series, AnalysisError> {
    if raw.is_empty() {
        return Err(AnalysisError::EmptySeries);
    }

    let bars: Vec<PriceBar> = raw.iter().filter_map(RawBar::complete).collect();
    let dropped = raw.len() - bars.len();
    if dropped > 0 {
        debug!(dropped, kept = bars.len(), "dropped incomplete bars");
    }

    if let Some(index) = bars
        .windows(2)
        .position(|w| w[1].timestamp <= w[0].timestamp)
    {
        return Err(AnalysisError::MisorderedTimestamps { index: index + 1 });
    }

    if bars.len() < MIN_BARS {
        return Err(AnalysisError::InsufficientData {
            required: MIN_BARS,
            actual: bars.len(),
        });
    }

    Ok(Series::from_bars(bars))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(i: i64, close: f64) -> RawBar {
        RawBar {
            timestamp: i * 60_000,
            open: Some(close),
            high: Some(close + 1.0),
            low: Some(close - 1.0),
            close: Some(close),
            volume: Some(100.0),
        }
    }

    fn raw_series(n: usize) -> Vec<RawBar> {
        (0..n).map(|i| raw(i as i64, 100.0 + i as f64)).collect()
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(prepare(&[]), Err(AnalysisError::EmptySeries));
    }

    #[test]
    fn short_series_fails_with_insufficient_data() {
        for n in 1..MIN_BARS {
            assert_eq!(
                prepare(&raw_series(n)),
                Err(AnalysisError::InsufficientData {
                    required: MIN_BARS,
                    actual: n
                })
            );
        }
    }

    #[test]
    fn exact_minimum_is_accepted() {
        let series = prepare(&raw_series(MIN_BARS)).unwrap();
        assert_eq!(series.len(), MIN_BARS);
        assert_eq!(series.close()[0], 100.0);
        assert_eq!(series.last_close(), 119.0);
        assert_eq!(series.last_timestamp(), 19 * 60_000);
    }

    #[test]
    fn missing_open_alone_drops_the_bar() {
        let mut bars = raw_series(21);
        bars[20].open = None;
        let series = prepare(&bars).unwrap();
        assert_eq!(series.len(), 20);
        assert_eq!(series.last_timestamp(), 19 * 60_000);
    }

    #[test]
    fn nan_volume_bar_is_dropped() {
        let mut bars = raw_series(25);
        bars[3].volume = Some(f64::NAN);
        let series = prepare(&bars).unwrap();
        assert_eq!(series.len(), 24);
        assert!(series.bars().iter().all(|b| b.timestamp != 3 * 60_000));
    }

    #[test]
    fn dropping_below_minimum_fails() {
        let mut bars = raw_series(MIN_BARS);
        bars[7].volume = Some(f64::NAN);
        assert_eq!(
            prepare(&bars),
            Err(AnalysisError::InsufficientData {
                required: MIN_BARS,
                actual: MIN_BARS - 1
            })
        );
    }

    #[test]
    fn missing_and_infinite_fields_are_dropped() {
        let mut bars = raw_series(30);
        bars[0].open = None;
        bars[10].high = Some(f64::INFINITY);
        bars[20].close = None;
        let series = prepare(&bars).unwrap();
        assert_eq!(series.len(), 27);
        // Order is preserved.
        assert!(series
            .bars()
            .windows(2)
            .all(|w| w[0].timestamp < w[1].timestamp));
    }

    #[test]
    fn duplicate_timestamp_is_rejected() {
        let mut bars = raw_series(25);
        bars[12].timestamp = bars[11].timestamp;
        assert_eq!(
            prepare(&bars),
            Err(AnalysisError::MisorderedTimestamps { index: 12 })
        );
    }

    #[test]
    fn all_bars_incomplete_is_insufficient() {
        let bars: Vec<RawBar> = raw_series(25)
            .into_iter()
            .map(|mut b| {
                b.close = None;
                b
            })
            .collect();
        assert_eq!(
            prepare(&bars),
            Err(AnalysisError::InsufficientData {
                required: MIN_BARS,
                actual: 0
            })
        );
    }
}
