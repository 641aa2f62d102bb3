// =============================================================================
// Classification Rules: one `SignalIndicator` per battery entry
// =============================================================================
//
// Trend-following rules compare the latest value against a reference line and
// are Bullish only on a strict `>`; a tie reads Bearish.
//
//   RSI  > 70 => Overbought, < 30 => Oversold, else Neutral
//   ADX  > 25 => Strong Trend, else Weak Trend
//   ATR  > mean(ATR series) => High Volatility, else Low Volatility
// =============================================================================

use super::{Reading, SignalIndicator};
use crate::indicators::{
    adx, aroon, atr, bollinger, donchian, ema, hull, keltner, latest, macd, rsi, sma, vwap,
};
use crate::market_data::Series;
use crate::types::Signal;

pub const MA_PERIOD: usize = 20;
pub const EMA_PERIOD: usize = 20;
pub const RSI_OVERBOUGHT: f64 = 70.0;
pub const RSI_OVERSOLD: f64 = 30.0;
pub const ADX_TREND_THRESHOLD: f64 = 25.0;

const DIRECTIONAL: &[Signal] = &[Signal::Bullish, Signal::Bearish];
const MOMENTUM: &[Signal] = &[Signal::Overbought, Signal::Oversold, Signal::Neutral];
const STRENGTH: &[Signal] = &[Signal::StrongTrend, Signal::WeakTrend];
const VOLATILITY: &[Signal] = &[Signal::HighVolatility, Signal::LowVolatility];

/// `above` when value > reference, `otherwise` on anything else.  A level
/// reading handed to a relative rule is undefined.
fn compare(reading: &Reading, above: Signal, otherwise: Signal) -> Signal {
    match *reading {
        Reading::Relative { value, reference } if value > reference => above,
        Reading::Relative { .. } => otherwise,
        Reading::Level(_) => Signal::Undefined,
    }
}

fn directional(reading: &Reading) -> Signal {
    compare(reading, Signal::Bullish, Signal::Bearish)
}

/// Latest close against the latest value of `line`.
fn close_against(series: &Series, line: &[Option<f64>]) -> Option<Reading> {
    Reading::relative(Some(series.last_close()), latest(line))
}

// ── Moving averages ──────────────────────────────────────────────────────────

pub struct MovingAverage;

impl SignalIndicator for MovingAverage {
    fn name(&self) -> &'static str {
        "MA"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        close_against(series, &sma::sma(series.close(), MA_PERIOD))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct ExponentialAverage;

impl SignalIndicator for ExponentialAverage {
    fn name(&self) -> &'static str {
        "EMA"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        close_against(series, &ema::ema(series.close(), EMA_PERIOD))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct HullAverage;

impl SignalIndicator for HullAverage {
    fn name(&self) -> &'static str {
        "Hull MA"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        close_against(series, &hull::hull_ma(series.close(), hull::PERIOD))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct Vwap;

impl SignalIndicator for Vwap {
    fn name(&self) -> &'static str {
        "VWAP"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        close_against(series, &vwap::anchored_vwap(series.close(), series.volume()))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

// ── Momentum ─────────────────────────────────────────────────────────────────

/// MACD line against its signal line.
pub struct Macd;

impl SignalIndicator for Macd {
    fn name(&self) -> &'static str {
        "MACD"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let m = macd::standard(series.close());
        Reading::relative(latest(&m.line), latest(&m.signal))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct RelativeStrength;

impl SignalIndicator for RelativeStrength {
    fn name(&self) -> &'static str {
        "RSI"
    }

    fn labels(&self) -> &'static [Signal] {
        MOMENTUM
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        latest(&rsi::rsi(series.close(), rsi::PERIOD)).map(Reading::Level)
    }

    fn classify(&self, reading: &Reading) -> Signal {
        match *reading {
            Reading::Level(v) if v > RSI_OVERBOUGHT => Signal::Overbought,
            Reading::Level(v) if v < RSI_OVERSOLD => Signal::Oversold,
            Reading::Level(_) => Signal::Neutral,
            Reading::Relative { .. } => Signal::Undefined,
        }
    }
}

/// Aroon Up against Aroon Down.
pub struct AroonCross;

impl SignalIndicator for AroonCross {
    fn name(&self) -> &'static str {
        "Aroon"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let a = aroon::aroon(series.high(), series.low(), aroon::PERIOD);
        Reading::relative(latest(&a.up), latest(&a.down))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

// ── Trend strength & volatility ──────────────────────────────────────────────

pub struct TrendStrength;

impl SignalIndicator for TrendStrength {
    fn name(&self) -> &'static str {
        "ADX"
    }

    fn labels(&self) -> &'static [Signal] {
        STRENGTH
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        latest(&adx::adx(series.high(), series.low(), series.close(), adx::PERIOD))
            .map(Reading::Level)
    }

    fn classify(&self, reading: &Reading) -> Signal {
        match *reading {
            Reading::Level(v) if v > ADX_TREND_THRESHOLD => Signal::StrongTrend,
            Reading::Level(_) => Signal::WeakTrend,
            Reading::Relative { .. } => Signal::Undefined,
        }
    }
}

/// Latest ATR against the mean of its own defined history.
pub struct AverageTrueRange;

impl SignalIndicator for AverageTrueRange {
    fn name(&self) -> &'static str {
        "ATR"
    }

    fn labels(&self) -> &'static [Signal] {
        VOLATILITY
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let values = atr::atr(series.high(), series.low(), series.close(), atr::PERIOD);
        Reading::relative(latest(&values), atr::defined_mean(&values))
    }

    fn classify(&self, reading: &Reading) -> Signal {
        compare(reading, Signal::HighVolatility, Signal::LowVolatility)
    }
}

// ── Bands & channels (close against the middle line) ─────────────────────────

pub struct BollingerBands;

impl SignalIndicator for BollingerBands {
    fn name(&self) -> &'static str {
        "Bollinger Bands"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let bands = bollinger::bollinger(series.close(), bollinger::PERIOD, bollinger::NUM_STD);
        close_against(series, &bands.middle)
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct DonchianChannels;

impl SignalIndicator for DonchianChannels {
    fn name(&self) -> &'static str {
        "Donchian Channels"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let channels = donchian::donchian(series.high(), series.low(), donchian::PERIOD);
        close_against(series, &channels.middle)
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}

pub struct KeltnerChannel;

impl SignalIndicator for KeltnerChannel {
    fn name(&self) -> &'static str {
        "Keltner Channel"
    }

    fn labels(&self) -> &'static [Signal] {
        DIRECTIONAL
    }

    fn compute(&self, series: &Series) -> Option<Reading> {
        let channel = keltner::keltner(
            series.high(),
            series.low(),
            series.close(),
            keltner::PERIOD,
            keltner::ATR_MULTIPLIER,
        );
        close_against(series, &channel.middle)
    }

    fn classify(&self, reading: &Reading) -> Signal {
        directional(reading)
    }
}
