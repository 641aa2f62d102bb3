// =============================================================================
// Analysis pipeline: fetch → Series Preparation → indicator battery
// =============================================================================

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::error::AnalysisError;
use crate::market_data::{prepare, DataSource};
use crate::signals::{AnalysisResult, IndicatorBattery};
use crate::types::AnalysisRequest;

/// Signal snapshot returned for one request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub request_id: Uuid,
    pub symbol: String,
    pub interval: &'static str,
    pub period: &'static str,
    /// Complete bars that survived Series Preparation.
    pub bars: usize,
    pub signals: AnalysisResult,
}

/// Run one analysis end to end.
///
/// The provider fetch is the only await point; the battery runs on the
/// blocking pool so indicator math never stalls the executor.
pub async fn run_analysis(
    source: &dyn DataSource,
    battery: Arc<IndicatorBattery>,
    request: &AnalysisRequest,
    request_id: Uuid,
    max_bars: usize,
) -> Result<AnalysisReport, AnalysisError> {
    let span = info_span!(
        "analysis",
        %request_id,
        symbol = %request.symbol,
        interval = request.interval.as_str(),
    );

    async move {
        let bar_count = request.period.bar_count(request.interval, max_bars);
        let raw = source
            .fetch_bars(&request.symbol, request.interval, bar_count)
            .await?;
        let fetched = raw.len();

        let series = prepare(&raw)?;
        let bars = series.len();
        let last_bar = series.last_timestamp();

        let signals = tokio::task::spawn_blocking(move || battery.run(&series))
            .await
            .map_err(|e| AnalysisError::computation(format!("indicator battery failed: {e}")))?;

        info!(
            provider = source.name(),
            fetched,
            bars,
            last_bar,
            "analysis complete"
        );

        Ok(AnalysisReport {
            request_id,
            symbol: request.symbol.clone(),
            interval: request.interval.as_str(),
            period: request.period.as_str(),
            bars,
            signals,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::market_data::testing::{ascending, raw_bar};
    use crate::market_data::RawBar;
    use crate::types::{Interval, LookbackPeriod, Signal};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    /// In-memory provider that records the bar count it was asked for.
    pub(crate) struct StubSource {
        pub result: Result<Vec<RawBar>, AnalysisError>,
        pub requested: Mutex<Option<usize>>,
    }

    impl StubSource {
        pub(crate) fn with_bars(bars: Vec<RawBar>) -> Self {
            Self {
                result: Ok(bars),
                requested: Mutex::new(None),
            }
        }

        pub(crate) fn failing(err: AnalysisError) -> Self {
            Self {
                result: Err(err),
                requested: Mutex::new(None),
            }
        }

        pub(crate) fn ascending(n: usize) -> Self {
            let bars = ascending(n)
                .into_iter()
                .enumerate()
                .map(|(i, c)| raw_bar(i, c, c + 1.0, c - 1.0, c, 100.0))
                .collect();
            Self::with_bars(bars)
        }
    }

    #[async_trait]
    impl DataSource for StubSource {
        async fn fetch_bars(
            &self,
            _symbol: &str,
            _interval: Interval,
            bar_count: usize,
        ) -> Result<Vec<RawBar>, AnalysisError> {
            *self.requested.lock() = Some(bar_count);
            self.result.clone()
        }

        fn name(&self) -> &'static str {
            "stub"
        }
    }

    fn request(period: LookbackPeriod) -> AnalysisRequest {
        AnalysisRequest {
            symbol: "BTCUSDT".into(),
            interval: Interval::D1,
            period,
        }
    }

    #[tokio::test]
    async fn full_pipeline() {
        let source = StubSource::ascending(40);
        let battery = Arc::new(IndicatorBattery::standard());
        let id = Uuid::new_v4();

        let report = run_analysis(&source, battery, &request(LookbackPeriod::Month3), id, 1000)
            .await
            .unwrap();

        assert_eq!(*source.requested.lock(), Some(90));
        assert_eq!(report.request_id, id);
        assert_eq!(report.symbol, "BTCUSDT");
        assert_eq!(report.interval, "1d");
        assert_eq!(report.period, "3mo");
        assert_eq!(report.bars, 40);
        assert_eq!(report.signals.len(), 12);
        assert_eq!(report.signals["RSI"], Signal::Overbought);
    }

    #[tokio::test]
    async fn short_series_is_insufficient() {
        let bars = (0..19).map(|i| raw_bar(i, 1.0, 2.0, 0.5, 1.5, 10.0)).collect();
        let source = StubSource::with_bars(bars);
        let err = run_analysis(
            &source,
            Arc::new(IndicatorBattery::standard()),
            &request(LookbackPeriod::Max),
            Uuid::new_v4(),
            1000,
        )
        .await
        .unwrap_err();

        assert_eq!(
            err,
            AnalysisError::InsufficientData {
                required: 20,
                actual: 19
            }
        );
    }

    #[tokio::test]
    async fn provider_error_is_passed_through() {
        let source = StubSource::failing(AnalysisError::NoData {
            symbol: "BTCUSDT".into(),
            interval: "1d".into(),
        });
        let err = run_analysis(
            &source,
            Arc::new(IndicatorBattery::standard()),
            &request(LookbackPeriod::Max),
            Uuid::new_v4(),
            500,
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), "NoDataError");
        assert_eq!(*source.requested.lock(), Some(500));
    }

    #[tokio::test]
    async fn nan_volume_below_minimum_fails() {
        let mut bars: Vec<RawBar> = (0..20).map(|i| raw_bar(i, 1.0, 2.0, 0.5, 1.5, 10.0)).collect();
        bars[7].volume = Some(f64::NAN);
        let source = StubSource::with_bars(bars);
        let err = run_analysis(
            &source,
            Arc::new(IndicatorBattery::standard()),
            &request(LookbackPeriod::Max),
            Uuid::new_v4(),
            1000,
        )
        .await
        .unwrap_err();

        assert_eq!(err.kind(), "InsufficientDataError");
    }
}
