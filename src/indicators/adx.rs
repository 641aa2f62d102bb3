// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// Trend strength, regardless of direction.
//
//   +DM_t = up move   if up > down and up > 0, else 0    (up   = H_t - H_{t-1})
//   -DM_t = down move if down > up and down > 0, else 0  (down = L_{t-1} - L_t)
//   +DI   = 100 * wilder(+DM) / wilder(TR)
//   -DI   = 100 * wilder(-DM) / wilder(TR)
//   DX    = 100 * |+DI - -DI| / (+DI + -DI)
//   ADX   = wilder(DX)
//
// Movement is measured bar-to-bar, so DX starts at index `period` and ADX at
// index `2 * period - 1`.
// =============================================================================

use super::atr::{true_range, wilder_average};
use super::{finite, IndicatorSeries};

pub const PERIOD: usize = 14;

/// Full ADX series.
///
/// Where the smoothed true range is zero DX is undefined, and so is every ADX
/// value from there on.
pub fn adx(high: &[f64], low: &[f64], close: &[f64], period: usize) -> IndicatorSeries {
    let n = high.len().min(low.len()).min(close.len());
    let mut out = vec![None; n];
    if period == 0 || n < 2 * period {
        return out;
    }

    // Per-bar inputs for bars 1..n; element k belongs to bar k + 1.
    let (plus_dm, minus_dm): (Vec<f64>, Vec<f64>) = (1..n)
        .map(|i| directional_movement(high[i] - high[i - 1], low[i - 1] - low[i]))
        .unzip();
    let tr = &true_range(high, low, close)[1..];

    let avg_plus = wilder_average(&plus_dm, period);
    let avg_minus = wilder_average(&minus_dm, period);
    let avg_tr = wilder_average(tr, period);

    // DX from the first smoothed bar on; NaN marks an undefined DX so the
    // ADX recurrence stops there.
    let dx: Vec<f64> = (period - 1..n - 1)
        .map(|k| match (avg_plus[k], avg_minus[k], avg_tr[k]) {
            (Some(p), Some(m), Some(t)) => directional_index(p, m, t).unwrap_or(f64::NAN),
            _ => f64::NAN,
        })
        .collect();

    // dx[j] belongs to bar period + j.
    for (j, value) in wilder_average(&dx, period).into_iter().enumerate() {
        out[period + j] = value;
    }
    out
}

fn directional_movement(up: f64, down: f64) -> (f64, f64) {
    if up.is_nan() || down.is_nan() {
        return (f64::NAN, f64::NAN);
    }
    let plus = if up > down && up > 0.0 { up } else { 0.0 };
    let minus = if down > up && down > 0.0 { down } else { 0.0 };
    (plus, minus)
}

/// DX from smoothed +DM, -DM and TR.  Zero TR is undefined; zero movement in
/// both directions is 0.
fn directional_index(plus_dm: f64, minus_dm: f64, tr: f64) -> Option<f64> {
    if tr == 0.0 {
        return None;
    }
    let plus_di = 100.0 * plus_dm / tr;
    let minus_di = 100.0 * minus_dm / tr;
    let sum = plus_di + minus_di;
    if sum == 0.0 {
        return Some(0.0);
    }
    finite(100.0 * (plus_di - minus_di).abs() / sum)
}
