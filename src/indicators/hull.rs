// =============================================================================
// Hull Moving Average
// =============================================================================
//
//   raw  = 2 * WMA(close, period / 2) - WMA(close, period)
//   hull = WMA(raw, round(sqrt(period)))
//
// For period 20 that is WMA 10 / 20 / 4, first defined at index 22.
// =============================================================================

use super::wma::{wma, wma_of};
use super::{zip_with, IndicatorSeries};

pub const PERIOD: usize = 20;

pub fn hull_ma(closes: &[f64], period: usize) -> IndicatorSeries {
    let half = (period / 2).max(1);
    let smoothing = ((period as f64).sqrt().round() as usize).max(1);

    let wma_half = wma(closes, half);
    let wma_full = wma(closes, period);
    let raw = zip_with(&wma_half, &wma_full, |h, f| 2.0 * h - f);

    wma_of(&raw, smoothing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_defined_index() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let hull = hull_ma(&closes, PERIOD);
        assert!(hull[..22].iter().all(Option::is_none));
        assert!(hull[22].is_some());
    }

    #[test]
    fn flat_series_is_flat() {
        let hull = hull_ma(&[42.0; 30], PERIOD);
        assert!((hull[29].unwrap() - 42.0).abs() < 1e-10);
    }

    #[test]
    fn linear_series_lags_slightly() {
        // On a straight line the WMA lag is (n - 1) / 3, so
        // raw = close + 1/3 and hull = raw - 1 = close - 2/3.
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let hull = hull_ma(&closes, PERIOD)[29].unwrap();
        assert!((hull - (129.0 - 2.0 / 3.0)).abs() < 1e-9, "got {hull}");
    }
}
