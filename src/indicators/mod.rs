// =============================================================================
// Technical Indicators Module
// =============================================================================
//
// Pure, side-effect-free rolling-window transforms.  Every function returns an
// `IndicatorSeries` aligned index-for-index with its input: `None` marks a
// position without enough history, or one whose value came out non-finite.
// Once a recurrence hits a non-finite value every later position is `None`.

pub mod adx;
pub mod aroon;
pub mod atr;
pub mod bollinger;
pub mod donchian;
pub mod ema;
pub mod extrema;
pub mod hull;
pub mod keltner;
pub mod macd;
pub mod rsi;
pub mod sma;
pub mod vwap;
pub mod wma;

/// One value per bar; `None` where the indicator is undefined.
pub type IndicatorSeries = Vec<Option<f64>>;

/// Value at the most recent position, if defined there.
pub fn latest(series: &[Option<f64>]) -> Option<f64> {
    series.last().copied().flatten()
}

/// `Some(value)` only for finite values.
pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

/// Apply a primitive to a derived series that starts with an undefined
/// prefix.  The primitive sees the tail from the first defined entry on; holes
/// inside that tail are passed through as NaN so they propagate.
pub(crate) fn over_defined_tail<F>(series: &[Option<f64>], f: F) -> IndicatorSeries
where
    F: FnOnce(&[f64]) -> IndicatorSeries,
{
    let Some(start) = series.iter().position(Option::is_some) else {
        return vec![None; series.len()];
    };
    let tail: Vec<f64> = series[start..]
        .iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    let mut out = vec![None; start];
    out.extend(f(&tail));
    out
}

/// Element-wise combination of two aligned series.
pub(crate) fn zip_with<F>(a: &[Option<f64>], b: &[Option<f64>], f: F) -> IndicatorSeries
where
    F: Fn(f64, f64) -> f64,
{
    a.iter()
        .zip(b)
        .map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => finite(f(*x, *y)),
            _ => None,
        })
        .collect()
}
