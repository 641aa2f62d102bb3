// =============================================================================
// Keltner Channel
// =============================================================================
//
//   middle = EMA(close, period)
//   upper  = middle + multiplier * ATR(period)
//   lower  = middle - multiplier * ATR(period)

use super::atr::atr;
use super::ema::ema;
use super::{zip_with, IndicatorSeries};

pub const PERIOD: usize = 20;
pub const ATR_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub struct KeltnerChannel {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

pub fn keltner(
    high: &[f64],
    low: &[f64],
    close: &[f64],
    period: usize,
    multiplier: f64,
) -> KeltnerChannel {
    let middle = ema(close, period);
    let range = atr(high, low, close, period);
    let upper = zip_with(&middle, &range, |m, a| m + multiplier * a);
    let lower = zip_with(&middle, &range, |m, a| m - multiplier * a);
    KeltnerChannel {
        upper,
        middle,
        lower,
    }
}
