use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeSet;
use std::f64::consts::PI;
use std::sync::Arc;

use oil_gauge::chart::{ChartPayload, PayloadKind};
use oil_gauge::engine::MemorySink;
use oil_gauge::{
    ChartController, Dataset, HistogramPeriod, Overlay, SelectionEvent, SelectionState, Series,
    SeriesId, SeriesSource, load_dataset,
};

/// Stand-in for the remote data package.
struct FixtureSource;

/// Quiet price history whose final observation jumps by `shock`.
fn shocked(name: &str, n: usize, base: f64, shock: f64) -> Series {
    let start = NaiveDate::from_ymd_opt(2000, 1, 4).unwrap();
    let rows = (0..n)
        .map(|i| {
            let price = if i + 1 == n {
                base + shock
            } else if i % 2 == 0 {
                base + 0.5
            } else {
                base - 0.5
            };
            (start + Duration::days(i as i64), price)
        })
        .collect();
    Series::from_rows(name, rows)
}

#[async_trait]
impl SeriesSource for FixtureSource {
    fn signature(&self) -> &'static str {
        "Fixture"
    }

    async fn fetch_dataset(&self) -> Result<Dataset> {
        Ok([
            // last price far above the upper band of every window
            shocked("brent-daily", 400, 100.0, 50.0),
            // last price far below the lower band
            shocked("wti-daily", 400, 100.0, -50.0),
        ]
        .into_iter()
        .collect())
    }
}

fn gauge_angle(sink: &MemorySink, kind: PayloadKind) -> f64 {
    match sink.latest(kind) {
        Some(ChartPayload::Gauge(g)) => g.angle,
        other => panic!("expected gauge for {}, got {:?}", kind, other),
    }
}

#[tokio::test]
async fn load_then_react_to_selection_changes() {
    let dir = std::env::temp_dir().join(format!("oil-gauge-it-{}", std::process::id()));
    let cache = dir.join("oil_prices_v1.bin");
    let _ = std::fs::remove_dir_all(&dir);

    let dataset = Arc::new(load_dataset(&cache, &FixtureSource).await.unwrap());
    assert!(cache.exists());

    // the cache alone reproduces the dataset
    let cached = oil_gauge::CacheFile::load_from_path(&cache)
        .unwrap()
        .into_dataset()
        .unwrap();
    assert_eq!(&cached, dataset.as_ref());

    let mut controller =
        ChartController::new(dataset, SelectionState::default(), MemorySink::new());
    assert_eq!(controller.initialize().unwrap(), 5);

    for kind in [PayloadKind::Gauge20, PayloadKind::Gauge50, PayloadKind::Gauge100] {
        assert_eq!(gauge_angle(controller.sink(), kind), 0.0, "{} should read overbought", kind);
    }

    controller
        .handle_event(SelectionEvent::OverlaysChanged(BTreeSet::from([
            Overlay::Sma20,
            Overlay::Sma50,
            Overlay::Sma100,
        ])))
        .unwrap();
    match controller.sink().latest(PayloadKind::Line) {
        Some(ChartPayload::Line(line)) => {
            assert_eq!(line.traces.len(), 4);
            assert!(line.traces.iter().all(|t| t.x.len() == 400));
        }
        other => panic!("expected line, got {:?}", other),
    }

    controller
        .handle_event(SelectionEvent::PeriodChanged(HistogramPeriod::P20))
        .unwrap();
    match controller.sink().latest(PayloadKind::Histogram) {
        Some(ChartPayload::Histogram(h)) => {
            assert_eq!(h.bins.len(), 15);
            assert_eq!(h.rows_used, 20);
            assert_eq!(h.sample_count, 20);
        }
        other => panic!("expected histogram, got {:?}", other),
    }

    controller
        .handle_event(SelectionEvent::SeriesSelected(SeriesId::WtiDaily))
        .unwrap();
    for kind in [PayloadKind::Gauge20, PayloadKind::Gauge50, PayloadKind::Gauge100] {
        assert_eq!(gauge_angle(controller.sink(), kind), PI, "{} should read oversold", kind);
    }

    // selection carried over: three overlays and the 20-period histogram
    match controller.sink().latest(PayloadKind::Line) {
        Some(ChartPayload::Line(line)) => {
            assert_eq!(line.series, "wti-daily");
            assert_eq!(line.traces.len(), 4);
        }
        other => panic!("expected line, got {:?}", other),
    }

    controller
        .handle_event(SelectionEvent::SeriesSelected(SeriesId::BrentYear))
        .unwrap();
    assert!(controller.sink().latest(PayloadKind::Gauge50).unwrap().is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
