use chrono::NaiveDate;
use serde::Serialize;
use strum_macros::{Display, EnumIter};

use crate::domain::{HistogramPeriod, Overlay, RollingWindow, SeriesId};

/// Where a payload is published. One slot per chart on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Display, EnumIter)]
pub enum PayloadKind {
    #[strum(to_string = "line-chart")]
    #[serde(rename = "line-chart")]
    Line,
    #[strum(to_string = "returns-hist")]
    #[serde(rename = "returns-hist")]
    Histogram,
    #[strum(to_string = "20-gauge-chart")]
    #[serde(rename = "20-gauge-chart")]
    Gauge20,
    #[strum(to_string = "50-gauge-chart")]
    #[serde(rename = "50-gauge-chart")]
    Gauge50,
    #[strum(to_string = "100-gauge-chart")]
    #[serde(rename = "100-gauge-chart")]
    Gauge100,
}

impl PayloadKind {
    pub fn gauge(window: RollingWindow) -> Self {
        match window {
            RollingWindow::W20 => Self::Gauge20,
            RollingWindow::W50 => Self::Gauge50,
            RollingWindow::W100 => Self::Gauge100,
        }
    }

    pub fn gauge_window(&self) -> Option<RollingWindow> {
        match self {
            Self::Gauge20 => Some(RollingWindow::W20),
            Self::Gauge50 => Some(RollingWindow::W50),
            Self::Gauge100 => Some(RollingWindow::W100),
            Self::Line | Self::Histogram => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartPayload {
    Line(LinePayload),
    Histogram(HistogramPayload),
    Gauge(GaugePayload),
    /// Placeholder when the selected series has no data.
    Empty(EmptyPayload),
}

impl ChartPayload {
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmptyPayload {
    pub series: SeriesId,
    pub message: String,
}

// --- SHARED LAYOUT ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisConfig {
    pub title: String,
    pub fixed_range: bool,
    pub nticks: Option<u32>,
    pub rangeslider_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartLayout {
    pub title: Option<String>,
    pub plot_bgcolor: String,
    pub paper_bgcolor: String,
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    /// Paper coordinates
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Circle {
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        fill_color: String,
    },
    Line {
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        color: String,
        width: f64,
    },
}

// --- LINE ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePayload {
    pub series: String,
    pub overlays: Vec<Overlay>,
    /// Price first, then one trace per overlay
    pub traces: Vec<LineTrace>,
    pub layout: ChartLayout,
}

// --- HISTOGRAM ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramPayload {
    pub series: String,
    pub period: HistogramPeriod,
    /// Rows actually used after clamping the period to the series length
    pub rows_used: usize,
    /// Defined returns that were binned
    pub sample_count: usize,
    pub bins: Vec<HistogramBin>,
    pub layout: ChartLayout,
}

// --- GAUGE ---

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeBand {
    pub low: f64,
    pub high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeSection {
    pub value: f64,
    pub color: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugePayload {
    pub series: String,
    pub window: RollingWindow,
    /// Radians in [0, PI]: 0 is the overbought extreme, PI the oversold one
    pub angle: f64,
    /// `None` while the series is shorter than the window
    pub band: Option<GaugeBand>,
    pub current_date: NaiveDate,
    pub current_price: f64,
    pub sma: Option<f64>,
    pub std: Option<f64>,
    pub sections: Vec<GaugeSection>,
    pub rotation_deg: f64,
    pub hole: f64,
    pub width_px: u32,
    pub height_px: u32,
    pub background_color: String,
    pub annotation: Annotation,
    pub shapes: Vec<Shape>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn gauge_slots_follow_windows() {
        for window in RollingWindow::iter() {
            assert_eq!(PayloadKind::gauge(window).gauge_window(), Some(window));
        }
        assert_eq!(PayloadKind::gauge(RollingWindow::W50).to_string(), "50-gauge-chart");
        assert_eq!(PayloadKind::Histogram.gauge_window(), None);
    }
}
