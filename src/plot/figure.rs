//! Interactive figures built with plotly.
//!
//! The figure is assembled from `plotly` traces and layout builders and
//! rendered as a standalone page. The crate's `plotly_embed_js` feature
//! inlines plotly.js, so the page has no external script references.

use plotly::common::{Mode, Title};
use plotly::layout::{Axis, Layout, RangeSelector, RangeSlider, SelectorButton, SelectorStep, StepMode};
use plotly::{Bar, Plot, Scatter, Trace};

use crate::domain::{Backend, ChartKind, PlotConfig, TransposedSeries};
use crate::error::AppError;
use crate::plot::{compress_value_axis, date_range};

const ZERO_LINE_COLOR: &str = "#F00";
const ZERO_LINE_WIDTH: usize = 2;

fn window(count: usize, label: &str, step: SelectorStep, step_mode: StepMode) -> SelectorButton {
    SelectorButton::new().count(count).label(label).step(step).step_mode(step_mode)
}

/// Shortcut windows: 1m, 6m, YTD, 1y, 5y, 10y, 25y, all.
pub fn range_selector() -> RangeSelector {
    RangeSelector::new().buttons(vec![
        window(1, "1m", SelectorStep::Month, StepMode::Backward),
        window(6, "6m", SelectorStep::Month, StepMode::Backward),
        window(1, "YTD", SelectorStep::Year, StepMode::ToDate),
        window(1, "1y", SelectorStep::Year, StepMode::Backward),
        window(5, "5y", SelectorStep::Year, StepMode::Backward),
        window(10, "10y", SelectorStep::Year, StepMode::Backward),
        window(25, "25y", SelectorStep::Year, StepMode::Backward),
        SelectorButton::new().step(SelectorStep::All),
    ])
}

/// Build the figure for an interactive backend.
pub fn build_figure(config: &PlotConfig, data: &TransposedSeries) -> Result<Plot, AppError> {
    let (first, last) = date_range(data).ok_or_else(|| {
        tracing::error!(title = %config.title, "cannot plot an empty series");
        AppError::render(format!("Cannot plot '{}': the series is empty.", config.title))
    })?;
    let window_range = vec![first.to_string(), last.to_string()];

    // Express: plain line, labels on the axes, default x window.
    // Objects: named trace with markers, legend shown. The SVG chart draws
    // the same way, so it gets the same figure if asked for one.
    let express = config.backend == Backend::Express;
    let name = (!express).then_some(config.value_label.as_str());

    let x = data.dates().to_vec();
    let y = data.values().to_vec();
    let trace: Box<dyn Trace> = match config.kind {
        ChartKind::Line => {
            let mode = if express { Mode::Lines } else { Mode::LinesMarkers };
            let mut scatter = Scatter::new(x, y).mode(mode);
            if let Some(name) = name {
                scatter = scatter.name(name);
            }
            scatter
        }
        ChartKind::Bar => {
            let mut bar = Bar::new(x, y);
            if let Some(name) = name {
                bar = bar.name(name);
            }
            bar
        }
    };

    let mut xaxis = Axis::new()
        .title(Title::from(config.date_label.as_str()))
        .range_slider(RangeSlider::new().visible(true).range(window_range.clone()))
        .range_selector(range_selector());
    if express {
        xaxis = xaxis.range(window_range);
    }

    let mut yaxis = Axis::new()
        .title(Title::from(config.value_label.as_str()))
        .zero_line(true)
        .zero_line_color(ZERO_LINE_COLOR)
        .zero_line_width(ZERO_LINE_WIDTH);
    if config.compress_value_axis {
        if let Some([low, high]) = compress_value_axis(data.values()) {
            yaxis = yaxis.range(vec![low, high]);
        }
    }

    let layout = Layout::new()
        .title(Title::from(config.title.as_str()))
        .show_legend(!express)
        .x_axis(xaxis)
        .y_axis(yaxis);

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(layout);
    Ok(plot)
}

/// Render a figure as a standalone HTML page with plotly.js inlined.
pub fn figure_html(plot: &Plot) -> String {
    plot.to_html()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::Value;

    use super::*;
    use crate::series::transpose_parallel;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn ppm() -> TransposedSeries {
        transpose_parallel(&[ymd(1958, 3), ymd(1958, 4), ymd(1958, 5)], &[315.7, 317.45, 317.51])
    }

    fn figure_json(config: &PlotConfig) -> Value {
        let plot = build_figure(config, &ppm()).unwrap();
        serde_json::from_str(&plot.to_json()).unwrap()
    }

    #[test]
    fn objects_line_has_markers_and_legend() {
        let fig = figure_json(&PlotConfig::default());

        let trace = &fig["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "lines+markers");
        assert_eq!(trace["name"], "Values");
        assert_eq!(trace["x"][0], "1958-03-01");
        assert_eq!(fig["layout"]["showlegend"], true);
        assert_eq!(fig["layout"]["title"]["text"], "Atmospheric Co2 Data");
        assert!(fig["layout"]["xaxis"].get("range").is_none());
    }

    #[test]
    fn bar_drops_mode() {
        let fig = figure_json(&PlotConfig {
            kind: ChartKind::Bar,
            ..PlotConfig::default()
        });
        assert_eq!(fig["data"][0]["type"], "bar");
        assert!(fig["data"][0].get("mode").is_none());
    }

    #[test]
    fn express_sets_default_x_window() {
        let fig = figure_json(&PlotConfig {
            backend: Backend::Express,
            ..PlotConfig::default()
        });
        assert_eq!(fig["layout"]["xaxis"]["range"], serde_json::json!(["1958-03-01", "1958-05-01"]));
        assert_eq!(fig["layout"]["showlegend"], false);
        assert_eq!(fig["data"][0]["mode"], "lines");
        assert!(fig["data"][0].get("name").is_none());
    }

    #[test]
    fn slider_and_selector_span_series() {
        let fig = figure_json(&PlotConfig::default());
        let slider = &fig["layout"]["xaxis"]["rangeslider"];
        assert_eq!(slider["visible"], true);
        assert_eq!(slider["range"], serde_json::json!(["1958-03-01", "1958-05-01"]));

        let buttons = fig["layout"]["xaxis"]["rangeselector"]["buttons"].as_array().unwrap();
        let labels: Vec<&str> = buttons.iter().map(|b| b["label"].as_str().unwrap_or("all")).collect();
        assert_eq!(labels, vec!["1m", "6m", "YTD", "1y", "5y", "10y", "25y", "all"]);
        assert_eq!(buttons[2]["stepmode"], "todate");
        assert_eq!(buttons[7]["step"], "all");
    }

    #[test]
    fn compression_sets_value_range() {
        let fig = figure_json(&PlotConfig {
            compress_value_axis: true,
            ..PlotConfig::default()
        });
        let yaxis = &fig["layout"]["yaxis"];
        assert_eq!(yaxis["range"][0].as_f64(), Some(315.7 * 0.95));
        assert_eq!(yaxis["range"][1].as_f64(), Some(317.51 * 1.05));
        assert_eq!(yaxis["zeroline"], true);
        assert_eq!(yaxis["zerolinecolor"], "#F00");
        assert_eq!(yaxis["zerolinewidth"], 2);

        let plain = figure_json(&PlotConfig::default());
        assert!(plain["layout"]["yaxis"].get("range").is_none());
    }

    #[test]
    fn empty_series_is_render_error() {
        let err = build_figure(&PlotConfig::default(), &TransposedSeries::default()).err().expect("expected render error");
        assert_eq!(err.kind(), crate::error::ErrorKind::Render);
    }

    #[test]
    fn page_inlines_plotly_without_external_scripts() {
        for backend in [Backend::Express, Backend::Objects] {
            let config = PlotConfig {
                backend,
                ..PlotConfig::default()
            };
            let html = figure_html(&build_figure(&config, &ppm()).unwrap());

            assert!(html.contains("Plotly.newPlot"), "{backend:?}");
            assert!(html.contains("Atmospheric Co2 Data"), "{backend:?}");
            let external: Vec<&str> = html.lines().filter(|l| l.contains("<script src=")).collect();
            assert!(external.is_empty(), "{backend:?}: {external:?}");
        }
    }
}
