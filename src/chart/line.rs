use std::collections::BTreeSet;

use crate::chart::{AxisConfig, ChartLayout, LinePayload, LineTrace};
use crate::config::plot::PLOT_CONFIG;
use crate::domain::Overlay;
use crate::models::DerivedSeries;

/// Full price history plus one trace per requested overlay.
///
/// Overlays are emitted in canonical order (SMA20, SMA50, SMA100) and every
/// trace spans the full date range. Returns `None` for an empty series.
pub fn compose_line(derived: &DerivedSeries, overlays: &BTreeSet<Overlay>) -> Option<LinePayload> {
    if derived.is_empty() {
        return None;
    }

    let dates = derived.dates().to_vec();

    let mut traces = Vec::with_capacity(1 + overlays.len());
    traces.push(LineTrace {
        name: PLOT_CONFIG.price_trace_name.to_string(),
        x: dates.clone(),
        y: derived.prices().iter().copied().map(Some).collect(),
    });

    for &overlay in overlays {
        traces.push(LineTrace {
            name: overlay.to_string(),
            x: dates.clone(),
            y: derived.overlay(overlay).to_vec(),
        });
    }

    let background = PLOT_CONFIG.transparent_background.to_string();
    Some(LinePayload {
        series: derived.name().to_string(),
        overlays: overlays.iter().copied().collect(),
        traces,
        layout: ChartLayout {
            title: None,
            plot_bgcolor: background.clone(),
            paper_bgcolor: background,
            x_axis: AxisConfig {
                title: "Date".to_string(),
                fixed_range: PLOT_CONFIG.line.x_fixed_range,
                nticks: Some(PLOT_CONFIG.line.x_nticks),
                rangeslider_visible: PLOT_CONFIG.line.x_rangeslider_visible,
            },
            y_axis: AxisConfig {
                title: PLOT_CONFIG.price_trace_name.to_string(),
                fixed_range: false,
                nticks: None,
                rangeslider_visible: false,
            },
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive;
    use crate::models::Series;
    use chrono::{Duration, NaiveDate};

    fn derived(n: usize) -> DerivedSeries {
        let start = NaiveDate::from_ymd_opt(2010, 6, 1).unwrap();
        let rows = (0..n)
            .map(|i| (start + Duration::days(i as i64), 50.0 + i as f64))
            .collect();
        derive(&Series::from_rows("wti-daily", rows))
    }

    #[test]
    fn price_trace_only_without_overlays() {
        let payload = compose_line(&derived(30), &BTreeSet::new()).unwrap();
        assert_eq!(payload.traces.len(), 1);
        assert_eq!(payload.traces[0].name, "Price");
        assert_eq!(payload.traces[0].y.len(), 30);
        assert!(payload.layout.x_axis.rangeslider_visible);
        assert_eq!(payload.layout.x_axis.nticks, Some(14));
    }

    #[test]
    fn overlays_follow_canonical_order_and_span_full_range() {
        let overlays = BTreeSet::from([Overlay::Sma100, Overlay::Sma20]);
        let payload = compose_line(&derived(120), &overlays).unwrap();

        let names: Vec<_> = payload.traces.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Price", "SMA20", "SMA100"]);
        for trace in &payload.traces {
            assert_eq!(trace.x.len(), 120);
            assert_eq!(trace.y.len(), 120);
        }
        assert_eq!(payload.traces[1].y[18], None);
        assert!(payload.traces[1].y[19].is_some());
    }

    #[test]
    fn empty_series_yields_nothing() {
        assert!(compose_line(&derived(0), &BTreeSet::new()).is_none());
    }
}
