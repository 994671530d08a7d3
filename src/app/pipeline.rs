//! Shared fetch → extract → transpose → render → write workflow.
//!
//! The CLI and the web endpoint both go through here; they differ only in
//! what they do with the rendered HTML.

use std::path::Path;

use crate::config::AppConfig;
use crate::data::FeatureClient;
use crate::domain::{Backend, ChartKind, PlotConfig, RawRecord, SeriesKind};
use crate::error::AppError;
use crate::io::{WrittenFile, write_plot_html};
use crate::plot::render_chart;
use crate::series::{extract_series, transpose};

/// Which series/visual/backend combinations to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPlan {
    pub series: Vec<SeriesKind>,
    pub charts: Vec<ChartKind>,
    pub backends: Vec<Backend>,
}

impl Default for RenderPlan {
    /// Both series as line and bar, with the default backend.
    fn default() -> Self {
        Self {
            series: SeriesKind::ALL.to_vec(),
            charts: ChartKind::ALL.to_vec(),
            backends: vec![Backend::default()],
        }
    }
}

impl RenderPlan {
    /// Every combination, series-major.
    pub fn configs(&self) -> Vec<(SeriesKind, PlotConfig)> {
        let mut out = Vec::with_capacity(self.series.len() * self.charts.len() * self.backends.len());
        for &series in &self.series {
            for &chart in &self.charts {
                for &backend in &self.backends {
                    out.push((series, PlotConfig::standard(series, chart, backend)));
                }
            }
        }
        out
    }
}

/// All outputs of one `co2 render` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub records: Vec<RawRecord>,
    pub written: Vec<WrittenFile>,
}

/// One fetch against the configured API.
pub fn fetch_records(config: &AppConfig) -> Result<Vec<RawRecord>, AppError> {
    let mut client = FeatureClient::new(config)?;
    client.fetch_records()
}

/// Extract, transpose and render one series.
pub fn render_series_html(records: &[RawRecord], series: SeriesKind, plot: &PlotConfig) -> Result<String, AppError> {
    let extracted = extract_series(records, series);
    let transposed = transpose(&extracted);
    render_chart(plot, &transposed)
}

/// Render every combination in `plan` and write each to `output_dir`.
///
/// Stops at the first failure; files written before it stay on disk.
pub fn render_plan(records: &[RawRecord], plan: &RenderPlan, output_dir: &Path) -> Result<Vec<WrittenFile>, AppError> {
    let configs = plan.configs();
    let mut written = Vec::with_capacity(configs.len());
    for (series, plot) in configs {
        let html = render_series_html(records, series, &plot)?;
        written.push(write_plot_html(output_dir, &plot.file_name, Some(&html))?);
    }
    Ok(written)
}

/// Fetch once, then render and write everything in `plan`.
pub fn run_render(config: &AppConfig, plan: &RenderPlan) -> Result<RunOutput, AppError> {
    let records = fetch_records(config)?;
    let written = render_plan(&records, plan, &config.output_dir)?;
    tracing::info!(files = written.len(), dir = %config.output_dir.display(), "render run complete");
    Ok(RunOutput { records, written })
}
