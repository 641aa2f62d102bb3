// Fixture builders shared by unit tests.

use super::{prepare, RawBar, Series};

/// One-minute bar at position `i`.
pub(crate) fn raw_bar(i: usize, open: f64, high: f64, low: f64, close: f64, volume: f64) -> RawBar {
    RawBar {
        timestamp: i as i64 * 60_000,
        open: Some(open),
        high: Some(high),
        low: Some(low),
        close: Some(close),
        volume: Some(volume),
    }
}

/// Series whose bars span `close ± 1` with constant volume.
pub(crate) fn series_from_closes(closes: &[f64]) -> Series {
    let bars: Vec<RawBar> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| raw_bar(i, c, c + 1.0, c - 1.0, c, 100.0))
        .collect();
    prepare(&bars).expect("fixture series must be valid")
}

/// Series from explicit `(high, low, close)` triples.
pub(crate) fn series_from_hlc(hlc: &[(f64, f64, f64)]) -> Series {
    let bars: Vec<RawBar> = hlc
        .iter()
        .enumerate()
        .map(|(i, &(h, l, c))| raw_bar(i, c, h, l, c, 100.0))
        .collect();
    prepare(&bars).expect("fixture series must be valid")
}

/// `100, 101, 102, ...`
pub(crate) fn ascending(n: usize) -> Vec<f64> {
    (0..n).map(|i| 100.0 + i as f64).collect()
}

/// `100 + n - 1, ..., 101, 100`
pub(crate) fn descending(n: usize) -> Vec<f64> {
    (0..n).rev().map(|i| 100.0 + i as f64).collect()
}
