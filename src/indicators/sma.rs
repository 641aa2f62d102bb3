// =============================================================================
// Simple Moving Average (SMA) and rolling standard deviation
// =============================================================================
//
//   SMA_t = mean(x_{t-period+1} ..= x_t)
//   σ_t   = sqrt(mean((x - SMA_t)^2))      (population deviation, ddof = 0)
// =============================================================================

use super::{finite, IndicatorSeries};

/// Rolling arithmetic mean over the trailing `period` values.
///
/// The first `period - 1` positions are `None`.  `period == 0` or an input
/// shorter than `period` yields an all-`None` series.
pub fn sma(values: &[f64], period: usize) -> IndicatorSeries {
    rolling(values, period, |window| {
        window.iter().sum::<f64>() / window.len() as f64
    })
}

/// Rolling population standard deviation over the trailing `period` values.
pub fn rolling_std(values: &[f64], period: usize) -> IndicatorSeries {
    rolling(values, period, |window| {
        let n = window.len() as f64;
        let mean = window.iter().sum::<f64>() / n;
        let variance = window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
        variance.sqrt()
    })
}

/// Shared trailing-window driver: `f` sees each full window, oldest first.
pub(crate) fn rolling<F>(values: &[f64], period: usize, f: F) -> IndicatorSeries
where
    F: Fn(&[f64]) -> f64,
{
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }
    for (i, window) in values.windows(period).enumerate() {
        out[i + period - 1] = finite(f(window));
    }
    out
}
