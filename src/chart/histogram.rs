use argminmax::ArgMinMax;

use crate::chart::{AxisConfig, ChartLayout, HistogramBin, HistogramPayload};
use crate::config::{DASHBOARD, plot::PLOT_CONFIG};
use crate::domain::HistogramPeriod;
use crate::models::DerivedSeries;

/// Bins the returns of the trailing `period` rows into a fixed number of bins.
///
/// A period longer than the series uses the whole series. Undefined returns
/// (the first row, zero-price bases) are skipped. Returns `None` for an empty series.
pub fn compose_histogram(derived: &DerivedSeries, period: HistogramPeriod) -> Option<HistogramPayload> {
    if derived.is_empty() {
        return None;
    }

    let (rows_used, values) = trailing_returns(derived, period.periods());
    let bins = bin_values(&values, DASHBOARD.histogram_bins);

    let background = PLOT_CONFIG.transparent_background.to_string();
    Some(HistogramPayload {
        series: derived.name().to_string(),
        period,
        rows_used,
        sample_count: values.len(),
        bins,
        layout: ChartLayout {
            title: Some(format!("Returns over the last {} periods", period)),
            plot_bgcolor: background.clone(),
            paper_bgcolor: background,
            x_axis: AxisConfig {
                title: "Returns".to_string(),
                fixed_range: false,
                nticks: None,
                rangeslider_visible: false,
            },
            y_axis: AxisConfig {
                title: "count".to_string(),
                fixed_range: false,
                nticks: None,
                rangeslider_visible: false,
            },
        },
    })
}

/// Defined returns among the last `periods` rows, period clamped to `[1, len]`.
pub(crate) fn trailing_returns(derived: &DerivedSeries, periods: usize) -> (usize, Vec<f64>) {
    let len = derived.returns.len();
    if len == 0 {
        return (0, Vec::new());
    }
    let rows = periods.clamp(1, len);
    let values = derived.returns[len - rows..]
        .iter()
        .flatten()
        .copied()
        .filter(|r| r.is_finite())
        .collect();
    (rows, values)
}

/// Equal-width bins spanning `[min, max]` of `values`; the max lands in the last bin.
///
/// Degenerate ranges: equal values use `[v - 0.5, v + 0.5]`, no values use `[0, 1]`.
pub fn bin_values(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let (lo, hi) = if values.is_empty() {
        (0.0, 1.0)
    } else {
        let (min_index, max_index) = values.argminmax();
        let (min, max) = (values[min_index], values[max_index]);
        if min == max {
            (min - 0.5, max + 0.5)
        } else {
            (min, max)
        }
    };

    let width = (hi - lo) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: lo + i as f64 * width,
            upper: if i + 1 == bin_count {
                hi
            } else {
                lo + (i + 1) as f64 * width
            },
            count: 0,
        })
        .collect();

    for &value in values {
        let index = (((value - lo) / width).floor() as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}
