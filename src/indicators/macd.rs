// =============================================================================
// Moving Average Convergence / Divergence (MACD)
// =============================================================================
//
//   line      = EMA(close, fast) - EMA(close, slow)
//   signal    = EMA(line, signal_period)        (seeded on the defined line)
//   histogram = line - signal
//
// With the standard 12 / 26 / 9 periods the line is first defined at index 25
// and the signal at index 33.
// =============================================================================

use super::ema::{ema, ema_of};
use super::{zip_with, IndicatorSeries};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// The three aligned MACD outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Macd {
    pub line: IndicatorSeries,
    pub signal: IndicatorSeries,
    pub histogram: IndicatorSeries,
}

pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_period: usize) -> Macd {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line = zip_with(&fast_ema, &slow_ema, |f, s| f - s);
    let signal = ema_of(&line, signal_period);
    let histogram = zip_with(&line, &signal, |l, s| l - s);
    Macd {
        line,
        signal,
        histogram,
    }
}

/// MACD with the standard 12 / 26 / 9 periods.
pub fn standard(closes: &[f64]) -> Macd {
    macd(closes, FAST_PERIOD, SLOW_PERIOD, SIGNAL_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_alignment() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let m = standard(&closes);
        assert!(m.line[..25].iter().all(Option::is_none));
        assert!(m.line[25].is_some());
        assert!(m.signal[..33].iter().all(Option::is_none));
        assert!(m.signal[33].is_some());
        assert!(m.histogram[33].is_some());
    }

    #[test]
    fn flat_series_is_all_zero() {
        let m = standard(&[50.0; 40]);
        assert_eq!(m.line[39], Some(0.0));
        assert_eq!(m.signal[39], Some(0.0));
        assert_eq!(m.histogram[39], Some(0.0));
    }

    #[test]
    fn rising_series_line_above_signal() {
        // Accelerating rise: the fast EMA pulls away so the line keeps growing.
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i * i) as f64 * 0.05).collect();
        let m = standard(&closes);
        let line = m.line[59].unwrap();
        let signal = m.signal[59].unwrap();
        assert!(line > signal, "line {line} should exceed signal {signal}");
    }

    #[test]
    fn short_series_has_no_signal() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let m = standard(&closes);
        assert!(m.signal.iter().all(Option::is_none));
    }
}
