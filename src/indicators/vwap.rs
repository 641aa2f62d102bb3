// =============================================================================
// Anchored VWAP
// =============================================================================
//
// Anchored at the first bar of the series and never reset:
//   VWAP_t = Σ_{0..=t} close * volume / Σ_{0..=t} volume
//
// Undefined while the cumulative volume is still zero.

use super::{finite, IndicatorSeries};

pub fn anchored_vwap(close: &[f64], volume: &[f64]) -> IndicatorSeries {
    let mut cum_pv = 0.0_f64;
    let mut cum_vol = 0.0_f64;

    close
        .iter()
        .zip(volume)
        .map(|(c, v)| {
            cum_pv += c * v;
            cum_vol += v;
            if cum_vol == 0.0 {
                None
            } else {
                finite(cum_pv / cum_vol)
            }
        })
        .collect()
}
