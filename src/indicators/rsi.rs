// =============================================================================
// Relative Strength Index (RSI)
// =============================================================================
//
// Bar-to-bar changes are split into gains and losses, each smoothed with
// Wilder's average (the same recurrence ATR uses):
//
//   RS  = avg_gain / avg_loss
//   RSI = 100 - 100 / (1 + RS)
//
// The change into bar k+1 is the k-th sample, so RSI(period) first appears at
// index `period`.
// =============================================================================

use super::atr::wilder_average;
use super::{zip_with, IndicatorSeries};

pub const PERIOD: usize = 14;

/// Full RSI series for `closes`.
///
/// No losses in the window gives 100; no movement at all gives 50.
pub fn rsi(closes: &[f64], period: usize) -> IndicatorSeries {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            if change.is_nan() {
                (f64::NAN, f64::NAN)
            } else {
                (change.max(0.0), (-change).max(0.0))
            }
        })
        .unzip();

    let avg_gain = wilder_average(&gains, period);
    let avg_loss = wilder_average(&losses, period);
    let values = zip_with(&avg_gain, &avg_loss, strength_index);

    // values[k] belongs to closes[k + 1].
    out[1..].copy_from_slice(&values);
    out
}

fn strength_index(avg_gain: f64, avg_loss: f64) -> f64 {
    match (avg_gain == 0.0, avg_loss == 0.0) {
        (true, true) => 50.0,
        (_, true) => 100.0,
        _ => 100.0 - 100.0 / (1.0 + avg_gain / avg_loss),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn too_short_is_undefined() {
        assert!(rsi(&[], 14).is_empty());
        assert_eq!(rsi(&[1.0, 2.0, 3.0], 0), vec![None; 3]);
        // 14 closes give only 13 changes.
        let closes: Vec<f64> = (1..=14).map(f64::from).collect();
        assert!(rsi(&closes, 14).iter().all(Option::is_none));
    }

    #[test]
    fn first_value_at_period() {
        let closes: Vec<f64> = (1..=15).map(f64::from).collect();
        let out = rsi(&closes, 14);
        assert!(out[..14].iter().all(Option::is_none));
        assert_eq!(out[14], Some(100.0));
    }

    #[test]
    fn monotone_series_hit_the_bounds() {
        let up: Vec<f64> = (1..=30).map(f64::from).collect();
        assert_eq!(rsi(&up, 14)[29], Some(100.0));

        let down: Vec<f64> = (1..=30).rev().map(f64::from).collect();
        assert_eq!(rsi(&down, 14)[29], Some(0.0));
    }

    #[test]
    fn flat_series_is_fifty() {
        let out = rsi(&[100.0; 30], 14);
        assert!(out[14..].iter().all(|v| *v == Some(50.0)));
    }

    #[test]
    fn known_value() {
        // Period 2: changes +2, -1, +1.
        // seed: gain 1.0, loss 0.5 => RS 2 => 66.67
        // next: gain 1.0, loss 0.25 => RS 4 => 80
        let out = rsi(&[10.0, 12.0, 11.0, 12.0], 2);
        assert_eq!(out[..2], [None, None]);
        assert!((out[2].unwrap() - 200.0 / 3.0).abs() < 1e-10);
        assert!((out[3].unwrap() - 80.0).abs() < 1e-10);
    }

    #[test]
    fn bounded_on_oscillating_series() {
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + (i as f64 * 0.7).sin() * 5.0 + (i as f64 * 0.13).cos())
            .collect();
        let out = rsi(&closes, 14);
        assert!(out[199].is_some());
        for v in out.into_iter().flatten() {
            assert!((0.0..=100.0).contains(&v), "RSI {v} out of range");
        }
    }

    #[test]
    fn nan_close_ends_series() {
        let mut closes: Vec<f64> = (0..20).map(|i| 100.0 + (i % 3) as f64).collect();
        closes[17] = f64::NAN;
        let out = rsi(&closes, 5);
        assert!(out[16].is_some());
        assert!(out[17..].iter().all(Option::is_none));
    }
}
