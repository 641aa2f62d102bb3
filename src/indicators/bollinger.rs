// =============================================================================
// Bollinger Bands
// =============================================================================
//
// Bollinger Bands consist of a middle band (SMA), an upper band (SMA + k*σ),
// and a lower band (SMA - k*σ), σ being the population standard deviation of
// the same window.

use super::sma::{rolling_std, sma};
use super::{zip_with, IndicatorSeries};

pub const PERIOD: usize = 20;
pub const NUM_STD: f64 = 2.0;

/// Aligned upper / middle / lower bands.
#[derive(Debug, Clone, PartialEq)]
pub struct BollingerBands {
    pub upper: IndicatorSeries,
    pub middle: IndicatorSeries,
    pub lower: IndicatorSeries,
}

/// Calculate Bollinger Bands for the given closing prices.
pub fn bollinger(closes: &[f64], period: usize, num_std: f64) -> BollingerBands {
    let middle = sma(closes, period);
    let std_dev = rolling_std(closes, period);
    let upper = zip_with(&middle, &std_dev, |m, s| m + num_std * s);
    let lower = zip_with(&middle, &std_dev, |m, s| m - num_std * s);
    BollingerBands {
        upper,
        middle,
        lower,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bollinger_basic() {
        let closes: Vec<f64> = (1..=20).map(f64::from).collect();
        let bb = bollinger(&closes, PERIOD, NUM_STD);
        let (upper, middle, lower) = (
            bb.upper[19].unwrap(),
            bb.middle[19].unwrap(),
            bb.lower[19].unwrap(),
        );
        assert!((middle - 10.5).abs() < 1e-10);
        assert!(upper > middle);
        assert!(lower < middle);
        assert!(((upper - middle) - (middle - lower)).abs() < 1e-10);
    }

    #[test]
    fn bollinger_insufficient_data() {
        let bb = bollinger(&[1.0, 2.0, 3.0], PERIOD, NUM_STD);
        assert!(bb.middle.iter().all(Option::is_none));
        assert!(bb.upper.iter().all(Option::is_none));
    }

    #[test]
    fn bollinger_flat_collapses() {
        let bb = bollinger(&[100.0; 20], PERIOD, NUM_STD);
        assert_eq!(bb.upper[19], Some(100.0));
        assert_eq!(bb.lower[19], Some(100.0));
    }
}
