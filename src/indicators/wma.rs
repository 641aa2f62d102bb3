// =============================================================================
// Weighted Moving Average (WMA)
// =============================================================================
//
// Linear weights 1..=period, the most recent value weighted highest:
//   WMA_t = Σ_{j=1..period} j * x_{t-period+j} / (period * (period + 1) / 2)
// =============================================================================

use super::sma::rolling;
use super::{over_defined_tail, IndicatorSeries};

/// Rolling linearly weighted mean over the trailing `period` values.
pub fn wma(values: &[f64], period: usize) -> IndicatorSeries {
    let denom = (period * (period + 1)) as f64 / 2.0;
    rolling(values, period, |window| {
        window
            .iter()
            .enumerate()
            .map(|(j, x)| x * (j + 1) as f64)
            .sum::<f64>()
            / denom
    })
}

/// WMA of a derived series with an undefined prefix.
pub fn wma_of(series: &[Option<f64>], period: usize) -> IndicatorSeries {
    over_defined_tail(series, |tail| wma(tail, period))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wma_known_value() {
        // (1*1 + 2*2 + 3*3) / 6 = 14 / 6
        let out = wma(&[1.0, 2.0, 3.0], 3);
        assert_eq!(out[..2], [None, None]);
        assert!((out[2].unwrap() - 14.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn wma_weights_recent_highest() {
        // A spike at the newest position moves the WMA more than the SMA.
        let values = [10.0, 10.0, 10.0, 40.0];
        let w = wma(&values, 4)[3].unwrap();
        let s = values.iter().sum::<f64>() / 4.0;
        assert!(w > s, "wma {w} should exceed sma {s}");
    }

    #[test]
    fn wma_period_one_is_identity() {
        let values = [2.0, 3.0, 5.0];
        let out = wma(&values, 1);
        assert_eq!(out, vec![Some(2.0), Some(3.0), Some(5.0)]);
    }

    #[test]
    fn wma_period_zero() {
        assert_eq!(wma(&[1.0, 2.0], 0), vec![None, None]);
    }

    #[test]
    fn wma_of_keeps_prefix() {
        let series = vec![None, Some(1.0), Some(2.0), Some(3.0)];
        let out = wma_of(&series, 3);
        assert_eq!(out[..3], [None, None, None]);
        assert!((out[3].unwrap() - 14.0 / 6.0).abs() < 1e-12);
    }
}
