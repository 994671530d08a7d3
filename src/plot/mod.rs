//! Chart rendering.
//!
//! A `PlotConfig` plus a `TransposedSeries` become a self-contained HTML
//! string through one of three backends:
//!
//! - `Express` / `Objects`: an interactive plotly figure with plotly.js inlined (`figure`)
//! - `Svg`: a static chart drawn with Plotters (`svg`)
//!
//! Both interactive styles get a range slider, the shortcut range selector,
//! and a highlighted zero line on the value axis.
//!
//! Value-axis compression anchors on the first and last values only
//! (`[first * 0.95, last * 1.05]`). On a non-monotonic series this can clip
//! interior extrema; it is a display heuristic, not a normalization.

use chrono::NaiveDate;

use crate::domain::{Backend, PlotConfig, TransposedSeries};
use crate::error::AppError;

pub mod figure;
pub mod svg;

pub use figure::{build_figure, figure_html};
pub use svg::render_svg_html;

const COMPRESS_LOW: f64 = 0.95;
const COMPRESS_HIGH: f64 = 1.05;

/// Render a chart to HTML with the backend chosen in `config`.
pub fn render_chart(config: &PlotConfig, data: &TransposedSeries) -> Result<String, AppError> {
    tracing::debug!(
        title = %config.title,
        kind = ?config.kind,
        backend = ?config.backend,
        points = data.len(),
        "rendering chart"
    );
    match config.backend {
        Backend::Express | Backend::Objects => Ok(figure_html(&build_figure(config, data)?)),
        Backend::Svg => render_svg_html(config, data),
    }
}

/// First and last date of the series, in series order.
pub fn date_range(data: &TransposedSeries) -> Option<(NaiveDate, NaiveDate)> {
    Some((*data.dates().first()?, *data.dates().last()?))
}

/// Compressed value-axis range `[first * 0.95, last * 1.05]`.
pub fn compress_value_axis(values: &[f64]) -> Option<[f64; 2]> {
    Some([values.first()? * COMPRESS_LOW, values.last()? * COMPRESS_HIGH])
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ChartKind;
    use crate::series::transpose_parallel;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn compression_uses_first_and_last_only() {
        let values = [315.7, 400.0, 250.0, 317.45];
        assert_eq!(compress_value_axis(&values), Some([315.7 * 0.95, 317.45 * 1.05]));
        assert_eq!(compress_value_axis(&[]), None);
    }

    #[test]
    fn date_range_follows_series_order() {
        let data = transpose_parallel(&[ymd(2001, 5), ymd(2000, 1), ymd(2001, 2)], &[1.0, 2.0, 3.0]);
        assert_eq!(date_range(&data), Some((ymd(2001, 5), ymd(2001, 2))));
        assert_eq!(date_range(&TransposedSeries::default()), None);
    }

    #[test]
    fn every_backend_and_kind_renders() {
        let data = transpose_parallel(&[ymd(1958, 3), ymd(1958, 4)], &[315.7, 317.45]);
        for backend in Backend::ALL {
            for kind in ChartKind::ALL {
                let config = PlotConfig {
                    kind,
                    backend,
                    ..PlotConfig::default()
                };
                let html = render_chart(&config, &data).unwrap();
                assert!(html.contains("Atmospheric Co2 Data"), "{backend:?}/{kind:?}");
            }
        }
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;");
    }
}
