use crate::domain::{HistogramPeriod, RollingWindow, SeriesId};

pub struct DashboardConfig {
    /// Series shown when the dashboard first loads
    pub default_series: SeriesId,
    pub default_period: HistogramPeriod,
    /// The histogram always uses this many equal-width bins
    pub histogram_bins: usize,
    /// One gauge per window, left to right
    pub gauge_windows: &'static [RollingWindow],
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    default_series: SeriesId::BrentDaily,
    default_period: HistogramPeriod::P100,
    histogram_bins: 15,
    gauge_windows: &[RollingWindow::W20, RollingWindow::W50, RollingWindow::W100],
};
