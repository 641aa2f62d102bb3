// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//              = EMA_{t-1} + multiplier * (close_t - EMA_{t-1})
//
// The second form is what gets evaluated: a constant input then reproduces
// itself exactly instead of drifting by an ulp.
//
// The very first EMA value is seeded with the SMA of the first `period` values
// and sits at index `period - 1`.
// =============================================================================

use super::{finite, over_defined_tail, IndicatorSeries};

/// Compute the EMA series for `values` and look-back `period`.
///
/// # Edge cases
/// - `period == 0` or `values.len() < period` => all `None`
/// - A non-finite seed or intermediate value ends the series: every later
///   position is `None`.
pub fn ema(values: &[f64], period: usize) -> IndicatorSeries {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let multiplier = 2.0 / (period + 1) as f64;

    // Seed: SMA of the first `period` values.
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let Some(mut prev) = finite(seed) else {
        return out;
    };
    out[period - 1] = Some(prev);

    for (i, &x) in values.iter().enumerate().skip(period) {
        match finite(prev + multiplier * (x - prev)) {
            Some(v) => {
                out[i] = Some(v);
                prev = v;
            }
            // Downstream consumers should not trust a broken recurrence.
            None => break,
        }
    }

    out
}

/// EMA of a derived series whose leading positions are undefined (e.g. the
/// MACD line).  Seeds on the first `period` defined values.
pub fn ema_of(series: &[Option<f64>], period: usize) -> IndicatorSeries {
    over_defined_tail(series, |tail| ema(tail, period))
}
