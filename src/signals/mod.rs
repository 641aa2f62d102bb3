// =============================================================================
// Signals Module
// =============================================================================
//
// Turns indicator series into discrete market-state labels:
// - `Reading`: the latest value(s) of one indicator
// - `SignalIndicator`: compute a reading from a series, classify it
// - `IndicatorBattery`: the fixed set of twelve indicators run per request

pub mod battery;
pub mod rules;

pub use battery::{AnalysisResult, IndicatorBattery, IndicatorInfo};

use crate::market_data::Series;
use crate::types::Signal;

/// Latest value(s) of an indicator, taken at the most recent bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// A value compared against a reference line (close vs. MA, MACD line vs.
    /// signal, Aroon up vs. down, ...).
    Relative { value: f64, reference: f64 },
    /// A single oscillator level compared against fixed thresholds.
    Level(f64),
}

impl Reading {
    /// Pair two optional latest values; undefined when either side is.
    pub fn relative(value: Option<f64>, reference: Option<f64>) -> Option<Self> {
        Some(Self::Relative {
            value: value?,
            reference: reference?,
        })
    }
}

/// One indicator of the battery.
///
/// Implementations are stateless: `compute` only reads the series, so the
/// same instance may be evaluated from any thread.
pub trait SignalIndicator: Send + Sync {
    /// Key under which the label is reported.
    fn name(&self) -> &'static str;

    /// Labels this indicator can emit, `Undefined` excluded.
    fn labels(&self) -> &'static [Signal];

    /// Latest reading, `None` when the indicator is undefined at the last bar.
    fn compute(&self, series: &Series) -> Option<Reading>;

    fn classify(&self, reading: &Reading) -> Signal;

    fn evaluate(&self, series: &Series) -> Signal {
        self.compute(series)
            .map_or(Signal::Undefined, |reading| self.classify(&reading))
    }
}
