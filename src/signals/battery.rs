// =============================================================================
// Indicator Battery: the fixed twelve-indicator evaluation
// =============================================================================

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use super::rules::{
    AroonCross, AverageTrueRange, BollingerBands, DonchianChannels, ExponentialAverage,
    HullAverage, KeltnerChannel, Macd, MovingAverage, RelativeStrength, TrendStrength, Vwap,
};
use super::SignalIndicator;
use crate::market_data::Series;
use crate::types::Signal;

/// Indicator name → label.  Ordered so that serialisation is stable.
pub type AnalysisResult = BTreeMap<&'static str, Signal>;

/// Static description of one battery entry.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorInfo {
    pub name: &'static str,
    pub labels: Vec<Signal>,
}

pub struct IndicatorBattery {
    indicators: Vec<Box<dyn SignalIndicator>>,
}

impl IndicatorBattery {
    pub fn new(indicators: Vec<Box<dyn SignalIndicator>>) -> Self {
        Self { indicators }
    }

    /// The standard battery reported by the service.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(MovingAverage),
            Box::new(ExponentialAverage),
            Box::new(Macd),
            Box::new(TrendStrength),
            Box::new(AverageTrueRange),
            Box::new(RelativeStrength),
            Box::new(BollingerBands),
            Box::new(DonchianChannels),
            Box::new(HullAverage),
            Box::new(KeltnerChannel),
            Box::new(AroonCross),
            Box::new(Vwap),
        ])
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn describe(&self) -> Vec<IndicatorInfo> {
        self.indicators
            .iter()
            .map(|ind| IndicatorInfo {
                name: ind.name(),
                labels: ind.labels().to_vec(),
            })
            .collect()
    }

    /// Evaluate every indicator against `series`.
    ///
    /// An indicator that cannot produce a reading reports `Undefined`; the
    /// remaining entries are unaffected.
    pub fn run(&self, series: &Series) -> AnalysisResult {
        let result: AnalysisResult = self
            .indicators
            .iter()
            .map(|ind| (ind.name(), ind.evaluate(series)))
            .collect();

        let undefined = result.values().filter(|s| **s == Signal::Undefined).count();
        debug!(bars = series.len(), indicators = result.len(), undefined, "battery evaluated");
        result
    }
}
