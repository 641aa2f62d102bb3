// =============================================================================
// Donchian Channels
// =============================================================================
//
//   upper  = highest high of the trailing window
//   lower  = lowest low of the trailing window
//   middle = (upper + lower) / 2

use super::extrema::{rolling_max, rolling_min};
use super::{zip_with, IndicatorSeries};

pub const PERIOD: usize = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct DonchianChannels {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

pub fn donchian(high: &[f64], low: &[f64], period: usize) -> DonchianChannels {
    let upper = rolling_max(high, period);
    let lower = rolling_min(low, period);
    let middle = zip_with(&upper, &lower, |u, l| (u + l) / 2.0);
    DonchianChannels {
        upper,
        middle,
        lower,
    }
}
