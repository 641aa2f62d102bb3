// =============================================================================
// Aroon Up / Down
// =============================================================================
//
// Looks at the trailing `period + 1` bars (the current bar plus `period`
// predecessors) and measures how long ago the extreme occurred:
//
//   aroon_up   = 100 * (period - bars_since_highest_high) / period
//   aroon_down = 100 * (period - bars_since_lowest_low)   / period
//
// Ties resolve to the most recent extreme, so a fresh equal high reads 100.
// The first value sits at index `period`.
// =============================================================================

use super::{finite, IndicatorSeries};

pub const PERIOD: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct Aroon {
    pub up: IndicatorSeries,
    pub down: IndicatorSeries,
}

pub fn aroon(high: &[f64], low: &[f64], period: usize) -> Aroon {
    let n = high.len().min(low.len());
    let mut up = vec![None; n];
    let mut down = vec![None; n];
    if period == 0 || n <= period {
        return Aroon { up, down };
    }

    let period_f = period as f64;
    for i in period..n {
        let window = i - period..=i;
        if window.clone().any(|j| high[j].is_nan() || low[j].is_nan()) {
            continue;
        }

        let mut max_idx = i - period;
        let mut min_idx = i - period;
        for j in window {
            if high[j] >= high[max_idx] {
                max_idx = j;
            }
            if low[j] <= low[min_idx] {
                min_idx = j;
            }
        }

        up[i] = finite(100.0 * (period_f - (i - max_idx) as f64) / period_f);
        down[i] = finite(100.0 * (period_f - (i - min_idx) as f64) / period_f);
    }

    Aroon { up, down }
}
