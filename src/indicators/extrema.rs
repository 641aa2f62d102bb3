// Rolling max / min over a trailing window.

use super::sma::rolling;
use super::IndicatorSeries;

/// Highest value of the trailing `period` values.
pub fn rolling_max(values: &[f64], period: usize) -> IndicatorSeries {
    rolling(values, period, |window| {
        window.iter().copied().fold(f64::NEG_INFINITY, |acc, x| {
            if x.is_nan() || acc.is_nan() {
                f64::NAN
            } else {
                acc.max(x)
            }
        })
    })
}

/// Lowest value of the trailing `period` values.
pub fn rolling_min(values: &[f64], period: usize) -> IndicatorSeries {
    rolling(values, period, |window| {
        window.iter().copied().fold(f64::INFINITY, |acc, x| {
            if x.is_nan() || acc.is_nan() {
                f64::NAN
            } else {
                acc.min(x)
            }
        })
    })
}
