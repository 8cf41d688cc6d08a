//! Chart styling passed through to the rendering surface as opaque metadata.

pub struct GaugeStyle {
    pub background_color: &'static str,
    /// Pie sections: invisible lower half, then the three visible bands
    pub section_colors: [&'static str; 4],
    pub section_text: [&'static str; 4],
    /// The lower half takes this share of the pie; the rest is split evenly
    pub lower_half_share: f64,
    pub rotation_deg: f64,
    pub hole: f64,
    pub width_px: u32,
    pub height_px: u32,
    pub pointer_color: &'static str,
    pub pointer_width: f64,
    /// Distance from the hub to the pointer tip in paper coordinates
    pub pointer_length: f64,
    pub hub_radius: f64,
}

pub struct LineStyle {
    pub x_nticks: u32,
    pub x_fixed_range: bool,
    pub x_rangeslider_visible: bool,
}

pub struct PlotConfig {
    /// Plot and paper background for line and histogram charts
    pub transparent_background: &'static str,
    pub price_trace_name: &'static str,
    pub line: LineStyle,
    pub gauge: GaugeStyle,
}

pub const PLOT_CONFIG: PlotConfig = PlotConfig {
    transparent_background: "rgba(0, 0, 0, 0)",
    price_trace_name: "Price",
    line: LineStyle {
        x_nticks: 14,
        x_fixed_range: true,
        x_rangeslider_visible: true,
    },
    gauge: GaugeStyle {
        background_color: "#ffffff",
        section_colors: ["#ffffff", "#ff6961", "#fffaa0", "lightgreen"],
        section_text: ["", "<b>Over Bought</b>", "<b>Neutral</b>", "<b>Over Sold</b>"],
        lower_half_share: 0.5,
        rotation_deg: 90.0,
        hole: 0.5,
        width_px: 450,
        height_px: 450,
        pointer_color: "#333",
        pointer_width: 4.0,
        pointer_length: std::f64::consts::SQRT_2 / 4.0,
        hub_radius: 0.02,
    },
};
