// =============================================================================
// Average True Range (ATR): Wilder's Smoothing Method
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR_0 = H - L                                   (no previous close)
//   TR_t = max(H - L, |H - prevClose|, |L - prevClose|)
//
// ATR is then the smoothed average of TR using Wilder's method:
//   ATR_{period-1} = SMA of the first `period` TR values
//   ATR_t          = (ATR_{t-1} * (period - 1) + TR_t) / period
// =============================================================================

use super::{finite, IndicatorSeries};

pub const PERIOD: usize = 14;

/// True range per bar.  The first bar has no previous close, so its range is
/// simply `high - low`.
pub fn true_range(high: &[f64], low: &[f64], close: &[f64]) -> Vec<f64> {
    let n = high.len().min(low.len()).min(close.len());
    (0..n)
        .map(|i| {
            let hl = high[i] - low[i];
            if i == 0 {
                return hl;
            }
            let prev_close = close[i - 1];
            let hc = (high[i] - prev_close).abs();
            let lc = (low[i] - prev_close).abs();
            // f64::max silently discards NaN, so check explicitly.
            if hl.is_nan() || hc.is_nan() || lc.is_nan() {
                return f64::NAN;
            }
            hl.max(hc).max(lc)
        })
        .collect()
}

/// Wilder's running average: seeded with the mean of the first `period`
/// values, then `avg_t = (avg_{t-1} * (period - 1) + x_t) / period`.
pub fn wilder_average(values: &[f64], period: usize) -> IndicatorSeries {
    let mut out = vec![None; values.len()];
    if period == 0 || values.len() < period {
        return out;
    }

    let period_f = period as f64;
    let seed = values[..period].iter().sum::<f64>() / period_f;
    let Some(mut avg) = finite(seed) else {
        return out;
    };
    out[period - 1] = Some(avg);

    for (i, &x) in values.iter().enumerate().skip(period) {
        match finite(avg + (x - avg) / period_f) {
            Some(v) => {
                out[i] = Some(v);
                avg = v;
            }
            None => break,
        }
    }
    out
}

/// Full ATR series, first defined at index `period - 1`.
pub fn atr(high: &[f64], low: &[f64], close: &[f64], period: usize) -> IndicatorSeries {
    wilder_average(&true_range(high, low, close), period)
}

/// Mean of the defined part of a series, `None` if nothing is defined.
pub fn defined_mean(series: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = series
        .iter()
        .flatten()
        .fold((0.0_f64, 0_usize), |(s, c), v| (s + v, c + 1));
    if count == 0 {
        return None;
    }
    finite(sum / count as f64)
}

// =============================================================================
// Unit Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    fn columns(bars: &[(f64, f64, f64)]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        (
            bars.iter().map(|b| b.0).collect(),
            bars.iter().map(|b| b.1).collect(),
            bars.iter().map(|b| b.2).collect(),
        )
    }

    #[test]
    fn atr_period_zero() {
        let (h, l, c) = columns(&[(105.0, 95.0, 102.0); 20]);
        assert!(atr(&h, &l, &c, 0).iter().all(Option::is_none));
    }

    #[test]
    fn atr_insufficient_data() {
        let (h, l, c) = columns(&[(105.0, 95.0, 102.0); 10]);
        assert!(atr(&h, &l, &c, 14).iter().all(Option::is_none));
    }

    #[test]
    fn atr_first_defined_at_period_minus_one() {
        let (h, l, c) = columns(&[(102.0, 98.0, 101.0), (104.0, 99.0, 103.0), (106.0, 100.0, 105.0)]);
        let out = atr(&h, &l, &c, 3);
        assert_eq!(out[..2], [None, None]);
        // TR = [4, 5, 6] => seed 5.0
        assert!((out[2].unwrap() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn atr_constant_range() {
        // All bars have H-L=10 around a slowly drifting close.
        let bars: Vec<(f64, f64, f64)> = (0..30)
            .map(|i| {
                let base = 100.0 + i as f64 * 0.1;
                (base + 5.0, base - 5.0, base)
            })
            .collect();
        let (h, l, c) = columns(&bars);
        let value = atr(&h, &l, &c, 14)[29].unwrap();
        assert!((value - 10.0).abs() < 1.0, "expected ATR near 10.0, got {value}");
    }

    #[test]
    fn true_range_uses_prev_close() {
        // Gap scenario: |H - prevClose| > H - L
        let (h, l, c) = columns(&[(105.0, 95.0, 95.0), (115.0, 108.0, 112.0)]);
        let tr = true_range(&h, &l, &c);
        assert_eq!(tr, vec![10.0, 20.0]);
    }

    #[test]
    fn atr_nan_truncates_series() {
        let (h, l, c) = columns(&[
            (105.0, 95.0, 100.0),
            (105.0, 95.0, 100.0),
            (105.0, 95.0, 100.0),
            (f64::NAN, 95.0, 100.0),
            (105.0, 95.0, 100.0),
        ]);
        let out = atr(&h, &l, &c, 3);
        assert!(out[2].is_some());
        assert_eq!(out[3..], [None, None]);
    }

    #[test]
    fn wilder_known_values() {
        let out = wilder_average(&[2.0, 4.0, 6.0, 10.0], 3);
        // seed 4.0, then (4*2 + 10) / 3 = 6.0
        assert_eq!(out, vec![None, None, Some(4.0), Some(6.0)]);
    }

    #[test]
    fn defined_mean_ignores_prefix() {
        assert_eq!(defined_mean(&[None, Some(2.0), Some(4.0)]), Some(3.0));
        assert_eq!(defined_mean(&[None, None]), None);
    }
}
