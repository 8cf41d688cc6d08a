use std::f64::consts::PI;

use crate::chart::{Annotation, GaugeBand, GaugePayload, GaugeSection, Shape};
use crate::config::plot::PLOT_CONFIG;
use crate::domain::RollingWindow;
use crate::models::DerivedSeries;

/// Pointer angle used when the band is undefined or has zero width.
pub const NEUTRAL_ANGLE: f64 = PI / 2.0;

/// Band half-width in standard deviations.
const BAND_STD_MULTIPLIER: f64 = 2.0;

/// Maps a price onto the gauge dial.
///
/// PI at or below `low` (oversold), 0 at or above `high` (overbought), linear
/// in between. A zero-width band gives [`NEUTRAL_ANGLE`].
pub fn pointer_angle(current: f64, band: GaugeBand) -> f64 {
    let GaugeBand { low, high } = band;
    if !(current.is_finite() && low.is_finite() && high.is_finite()) || high <= low {
        return NEUTRAL_ANGLE;
    }

    if current <= low {
        PI
    } else if current >= high {
        0.0
    } else {
        PI * (1.0 - (current.clamp(low, high) - low) / (high - low))
    }
}

/// Overbought/oversold gauge for the latest observation of `derived`.
///
/// Returns `None` for an empty series.
pub fn compose_gauge(derived: &DerivedSeries, window: RollingWindow) -> Option<GaugePayload> {
    let (current_date, current_price) = derived.series.last()?;
    let sma = derived.sma(window).last().copied().flatten();
    let std = derived.std(window).last().copied().flatten();

    let band = match (sma, std) {
        (Some(sma), Some(std)) => Some(GaugeBand {
            low: sma - BAND_STD_MULTIPLIER * std,
            high: sma + BAND_STD_MULTIPLIER * std,
        }),
        _ => None,
    };

    let angle = match band {
        Some(band) => pointer_angle(current_price, band),
        None => NEUTRAL_ANGLE,
    };

    if band.is_some_and(|b| b.high == b.low) {
        log::debug!(
            "Gauge {} on {}: zero-width band, pointer held at neutral",
            window,
            derived.name()
        );
    }

    let style = &PLOT_CONFIG.gauge;
    let visible_sections = style.section_colors.len() - 1;
    let sections = style
        .section_colors
        .iter()
        .zip(style.section_text.iter())
        .enumerate()
        .map(|(i, (color, text))| GaugeSection {
            value: if i == 0 {
                style.lower_half_share
            } else {
                (1.0 - style.lower_half_share) / visible_sections as f64
            },
            color: color.to_string(),
            text: text.to_string(),
        })
        .collect();

    let (hub, r) = (0.5, style.hub_radius);
    let shapes = vec![
        Shape::Circle {
            x0: hub - r,
            x1: hub + r,
            y0: hub - r,
            y1: hub + r,
            fill_color: style.pointer_color.to_string(),
        },
        Shape::Line {
            x0: hub,
            x1: hub + style.pointer_length * angle.cos(),
            y0: hub,
            y1: hub + style.pointer_length * angle.sin(),
            color: style.pointer_color.to_string(),
            width: style.pointer_width,
        },
    ];

    Some(GaugePayload {
        series: derived.name().to_string(),
        window,
        angle,
        band,
        current_date,
        current_price,
        sma,
        std,
        sections,
        rotation_deg: style.rotation_deg,
        hole: style.hole,
        width_px: style.width_px,
        height_px: style.height_px,
        background_color: style.background_color.to_string(),
        annotation: Annotation {
            text: format!(
                "<b>Current Date:</b><br>{}<br><b>Current Price:</b><br>{}",
                current_date, current_price
            ),
            x: 0.5,
            y: 0.25,
        },
        shapes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::derive;
    use crate::models::Series;
    use chrono::{Duration, NaiveDate};

    fn band(low: f64, high: f64) -> GaugeBand {
        GaugeBand { low, high }
    }

    fn derived(prices: &[f64]) -> DerivedSeries {
        let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let rows = prices
            .iter()
            .enumerate()
            .map(|(i, &p)| (start + Duration::days(i as i64), p))
            .collect();
        derive(&Series::from_rows("brent-daily", rows))
    }

    #[test]
    fn centred_price_points_straight_up() {
        // sma 100, std 10
        assert_eq!(pointer_angle(100.0, band(80.0, 120.0)), PI / 2.0);
    }

    #[test]
    fn clamps_at_band_edges() {
        assert_eq!(pointer_angle(125.0, band(80.0, 120.0)), 0.0);
        assert_eq!(pointer_angle(120.0, band(80.0, 120.0)), 0.0);
        assert_eq!(pointer_angle(80.0, band(80.0, 120.0)), PI);
        assert_eq!(pointer_angle(10.0, band(80.0, 120.0)), PI);
    }

    #[test]
    fn angle_is_non_increasing_in_price() {
        let b = band(80.0, 120.0);
        let mut previous = pointer_angle(79.0, b);
        let mut price = 79.0;
        while price <= 121.0 {
            let angle = pointer_angle(price, b);
            assert!(angle <= previous);
            assert!((0.0..=PI).contains(&angle));
            previous = angle;
            price += 0.25;
        }
    }

    #[test]
    fn zero_width_band_is_neutral() {
        assert_eq!(pointer_angle(50.0, band(50.0, 50.0)), NEUTRAL_ANGLE);

        let payload = compose_gauge(&derived(&[75.0; 30]), RollingWindow::W20).unwrap();
        assert_eq!(payload.std, Some(0.0));
        assert_eq!(payload.band, Some(band(75.0, 75.0)));
        assert_eq!(payload.angle, NEUTRAL_ANGLE);
    }

    #[test]
    fn short_series_has_no_band() {
        let payload = compose_gauge(&derived(&[70.0, 71.0, 72.0]), RollingWindow::W100).unwrap();
        assert_eq!(payload.band, None);
        assert_eq!(payload.sma, None);
        assert_eq!(payload.angle, NEUTRAL_ANGLE);
        assert_eq!(payload.current_price, 72.0);
    }

    #[test]
    fn spike_above_band_reads_overbought() {
        let mut prices: Vec<f64> = (0..60).map(|i| 60.0 + (i % 3) as f64).collect();
        prices.push(90.0);
        let payload = compose_gauge(&derived(&prices), RollingWindow::W50).unwrap();
        assert_eq!(payload.angle, 0.0);
        assert!(payload.band.unwrap().high < 90.0);
    }

    #[test]
    fn payload_carries_display_metadata() {
        let payload = compose_gauge(&derived(&[75.0; 25]), RollingWindow::W20).unwrap();
        assert_eq!(payload.sections.len(), 4);
        assert_eq!(payload.sections[0].value, 0.5);
        assert!((payload.sections[1].value - 1.0 / 6.0).abs() < 1e-12);
        assert_eq!(payload.sections[3].text, "<b>Over Sold</b>");
        assert!(payload.annotation.text.contains("1990-01-25"));
        assert_eq!(payload.shapes.len(), 2);
        if let Shape::Line { x1, y1, .. } = payload.shapes[1] {
            // neutral pointer is vertical
            assert!((x1 - 0.5).abs() < 1e-12);
            assert!(y1 > 0.5);
        } else {
            panic!("second shape should be the pointer");
        }
    }

    #[test]
    fn empty_series_yields_nothing() {
        assert!(compose_gauge(&derived(&[]), RollingWindow::W20).is_none());
    }
}
