//! Static SVG charts drawn with Plotters.
//!
//! The output page has no script at all: the chart is an inline `<svg>`
//! produced by Plotters' string backend.
//!
//! Dates are mapped to a month index (`year * 12 + month0`) so the cartesian
//! coordinate system stays `f64` on both axes; tick labels map the index back
//! to `YYYY-MM`.

use chrono::{Datelike, NaiveDate};
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;

use crate::domain::{ChartKind, PlotConfig, TransposedSeries};
use crate::error::AppError;
use crate::plot::{compress_value_axis, date_range, escape_html};

const WIDTH: u32 = 1200;
const HEIGHT: u32 = 675;
const BAR_HALF_WIDTH: f64 = 0.4;
const SERIES_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Render a chart as a self-contained HTML page with an inline SVG.
pub fn render_svg_html(config: &PlotConfig, data: &TransposedSeries) -> Result<String, AppError> {
    let (first, last) = date_range(data).ok_or_else(|| {
        tracing::error!(title = %config.title, "cannot plot an empty series");
        AppError::render(format!("Cannot plot '{}': the series is empty.", config.title))
    })?;

    let points: Vec<(f64, f64)> = data
        .dates()
        .iter()
        .map(|d| month_index(*d))
        .zip(data.values().iter().copied())
        .collect();

    let x_bounds = widen_if_flat(month_index(first), month_index(last), 1.0);
    let y_bounds = value_bounds(config, data.values());

    let mut svg = String::new();
    draw_chart(&mut svg, config, &points, x_bounds, y_bounds).map_err(|e| {
        tracing::error!(title = %config.title, "SVG rendering failed: {e}");
        AppError::render(format!("Failed to draw '{}': {e}", config.title))
    })?;

    let title = escape_html(&config.title);
    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title}</title>
</head>
<body>
{svg}
</body>
</html>
"#
    ))
}

fn draw_chart(
    svg: &mut String,
    config: &PlotConfig,
    points: &[(f64, f64)],
    (x0, x1): (f64, f64),
    (y0, y1): (f64, f64),
) -> Result<(), DrawingAreaErrorKind<std::io::Error>> {
    let root = SVGBackend::with_string(svg, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 22))
        .margin(16)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(config.date_label.as_str())
        .y_desc(config.value_label.as_str())
        .x_labels(10)
        .y_labels(8)
        .x_label_formatter(&|v| format_month_index(*v))
        .y_label_formatter(&|v| format!("{v:.2}"))
        .draw()?;

    match config.kind {
        ChartKind::Line => {
            chart
                .draw_series(LineSeries::new(points.iter().copied(), SERIES_COLOR.stroke_width(2)))?
                .label(config.value_label.as_str())
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], SERIES_COLOR.stroke_width(2)));
        }
        ChartKind::Bar => {
            // Bars grow from zero, or from the nearest visible edge when the
            // axis range excludes zero.
            let base = 0.0_f64.clamp(y0, y1);
            chart
                .draw_series(points.iter().map(|&(x, y)| {
                    Rectangle::new(
                        [(x - BAR_HALF_WIDTH, base), (x + BAR_HALF_WIDTH, y)],
                        SERIES_COLOR.filled(),
                    )
                }))?
                .label(config.value_label.as_str())
                .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], SERIES_COLOR.filled()));
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn month_index(date: NaiveDate) -> f64 {
    f64::from(date.year() * 12 + date.month0() as i32)
}

fn format_month_index(v: f64) -> String {
    let idx = v.round() as i64;
    format!("{}-{:02}", idx.div_euclid(12), idx.rem_euclid(12) + 1)
}

fn widen_if_flat(lo: f64, hi: f64, pad: f64) -> (f64, f64) {
    if hi > lo { (lo, hi) } else { (lo - pad, hi + pad) }
}

/// Value-axis bounds: the compressed range when requested and usable,
/// otherwise the data range padded by 5% (bars always include zero).
fn value_bounds(config: &PlotConfig, values: &[f64]) -> (f64, f64) {
    if config.compress_value_axis {
        match compress_value_axis(values) {
            Some([lo, hi]) if lo.is_finite() && hi.is_finite() && lo < hi => return (lo, hi),
            range => tracing::debug!(?range, "compressed range unusable; auto-scaling"),
        }
    }

    let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if config.kind == ChartKind::Bar {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if !(lo.is_finite() && hi.is_finite()) {
        return (0.0, 1.0);
    }
    let pad = ((hi - lo) * 0.05).max(1e-6);
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::transpose_parallel;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn yoy() -> TransposedSeries {
        transpose_parallel(&[ymd(1959, 3), ymd(1959, 4), ymd(1959, 5)], &[0.3, -0.09, 0.25])
    }

    #[test]
    fn month_index_round_trips_through_label() {
        assert_eq!(format_month_index(month_index(ymd(1958, 3))), "1958-03");
        assert_eq!(format_month_index(month_index(ymd(2020, 12))), "2020-12");
    }

    #[test]
    fn compressed_bounds_used_when_valid() {
        let config = PlotConfig {
            compress_value_axis: true,
            ..PlotConfig::default()
        };
        assert_eq!(value_bounds(&config, &[100.0, 120.0]), (95.0, 126.0));
    }

    #[test]
    fn inverted_compressed_bounds_fall_back() {
        let config = PlotConfig {
            compress_value_axis: true,
            ..PlotConfig::default()
        };
        let (lo, hi) = value_bounds(&config, &[0.3, -0.09, 0.25]);
        assert!(lo < -0.09 && hi > 0.3);
    }

    #[test]
    fn bar_bounds_include_zero() {
        let config = PlotConfig {
            kind: ChartKind::Bar,
            ..PlotConfig::default()
        };
        let (lo, _) = value_bounds(&config, &[315.0, 320.0]);
        assert!(lo <= 0.0);
    }

    #[test]
    fn renders_inline_svg_page() {
        let config = PlotConfig {
            kind: ChartKind::Bar,
            title: "YoY & more".to_string(),
            ..PlotConfig::default()
        };
        let html = render_svg_html(&config, &yoy()).unwrap();
        assert!(html.contains("<svg"));
        assert!(html.contains("<title>YoY &amp; more</title>"));
        assert!(!html.contains("<script"));
    }

    #[test]
    fn single_point_series_renders() {
        let data = transpose_parallel(&[ymd(2000, 1)], &[1.0]);
        assert!(render_svg_html(&PlotConfig::default(), &data).is_ok());
    }

    #[test]
    fn empty_series_is_render_error() {
        let err = render_svg_html(&PlotConfig::default(), &TransposedSeries::default()).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Render);
    }
}
