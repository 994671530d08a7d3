//! Shared domain types.
//!
//! Records and series are plain owned data: a fetch produces `RawRecord`s,
//! extraction folds them into a `Series`, and transposition turns a `Series`
//! into the parallel vectors a chart consumes.

use std::collections::HashMap;

use chrono::NaiveDate;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Unit tag carried by concentration records.
pub const PPM_UNIT: &str = "Parts Per Million";
/// Unit tag carried by year-over-year change records.
pub const YOY_UNIT: &str = "Percent";

/// One observation from the feature service, with its date already parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub indicator: String,
    pub code: String,
    pub unit: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// Which of the two known series to extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Absolute concentration in parts per million.
    Ppm,
    /// Year-over-year percentage change.
    Yoy,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 2] = [SeriesKind::Ppm, SeriesKind::Yoy];

    /// The `Unit` attribute value records of this series carry.
    pub fn unit_tag(self) -> &'static str {
        match self {
            SeriesKind::Ppm => PPM_UNIT,
            SeriesKind::Yoy => YOY_UNIT,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            SeriesKind::Ppm => "Monthly Atmospheric Co2 Concentrations",
            SeriesKind::Yoy => "Atmospheric Co2 Year on Year Percentage Change",
        }
    }

    pub fn value_label(self) -> &'static str {
        match self {
            SeriesKind::Ppm => "Co2 PPM",
            SeriesKind::Yoy => "YoY % Change",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            SeriesKind::Ppm => "ppm",
            SeriesKind::Yoy => "yoy",
        }
    }
}

/// Line or bar visual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
    Bar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 2] = [ChartKind::Line, ChartKind::Bar];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
        }
    }
}

/// How a chart is turned into HTML.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Interactive figure with axis labels on the trace and no legend.
    Express,
    /// Interactive figure with a named `lines+markers` trace and a legend.
    #[default]
    Objects,
    /// Static inline SVG drawn with Plotters.
    Svg,
}

impl Backend {
    pub const ALL: [Backend; 3] = [Backend::Express, Backend::Objects, Backend::Svg];

    pub fn slug(self) -> &'static str {
        match self {
            Backend::Express => "express",
            Backend::Objects => "objects",
            Backend::Svg => "svg",
        }
    }
}

/// Rendering options for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub kind: ChartKind,
    pub backend: Backend,
    pub date_label: String,
    pub value_label: String,
    pub title: String,
    /// Anchor the value axis at `[first * 0.95, last * 1.05]` instead of auto-scaling.
    pub compress_value_axis: bool,
    /// Output file base name, without the `.html` suffix.
    pub file_name: String,
}

pub const DEFAULT_DATE_LABEL: &str = "Dates";
pub const DEFAULT_VALUE_LABEL: &str = "Values";
pub const DEFAULT_TITLE: &str = "Atmospheric Co2 Data";
pub const DEFAULT_FILE_NAME: &str = "test_plot";

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            kind: ChartKind::default(),
            backend: Backend::default(),
            date_label: DEFAULT_DATE_LABEL.to_string(),
            value_label: DEFAULT_VALUE_LABEL.to_string(),
            title: DEFAULT_TITLE.to_string(),
            compress_value_axis: false,
            file_name: DEFAULT_FILE_NAME.to_string(),
        }
    }
}

impl PlotConfig {
    /// The standard chart for a series/visual/backend combination.
    ///
    /// Concentration charts compress the value axis; the heuristic reads
    /// poorly on the year-over-year series, so those stay auto-scaled.
    pub fn standard(series: SeriesKind, kind: ChartKind, backend: Backend) -> Self {
        Self {
            kind,
            backend,
            date_label: DEFAULT_DATE_LABEL.to_string(),
            value_label: series.value_label().to_string(),
            title: series.title().to_string(),
            compress_value_axis: series == SeriesKind::Ppm,
            file_name: format!("co2_{}_{}_{}", series.slug(), kind.slug(), backend.slug()),
        }
    }
}

/// Ordered date → value mapping.
///
/// Iteration follows first-insertion order. Inserting a date that is already
/// present replaces its value in place (last write wins, position kept).
#[derive(Debug, Clone, Default)]
pub struct Series {
    points: Vec<(NaiveDate, f64)>,
    index: HashMap<NaiveDate, usize>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite; returns the previous value for `date`, if any.
    pub fn insert(&mut self, date: NaiveDate, value: f64) -> Option<f64> {
        match self.index.get(&date) {
            Some(&i) => Some(std::mem::replace(&mut self.points[i].1, value)),
            None => {
                self.index.insert(date, self.points.len());
                self.points.push((date, value));
                None
            }
        }
    }

    pub fn get(&self, date: &NaiveDate) -> Option<f64> {
        self.index.get(date).map(|&i| self.points[i].1)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.points.iter().copied()
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.points.iter().map(|(d, _)| *d)
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|(_, v)| *v)
    }

    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        self.points.last().copied()
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.points == other.points
    }
}

impl FromIterator<(NaiveDate, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        let mut series = Series::new();
        for (date, value) in iter {
            series.insert(date, value);
        }
        series
    }
}

/// A `Series` reshaped into positionally aligned date and value vectors.
///
/// Fields are private so `dates.len() == values.len()` always holds.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransposedSeries {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl TransposedSeries {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Zip the two vectors back into a mapping.
    pub fn to_series(&self) -> Series {
        self.dates.iter().copied().zip(self.values.iter().copied()).collect()
    }
}

impl From<&Series> for TransposedSeries {
    fn from(series: &Series) -> Self {
        let (dates, values) = series.iter().unzip();
        Self { dates, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn duplicate_date_overwrites_in_place() {
        let mut s = Series::new();
        s.insert(ymd(1958, 3), 1.0);
        s.insert(ymd(1958, 4), 2.0);
        assert_eq!(s.insert(ymd(1958, 3), 9.0), Some(1.0));

        assert_eq!(s.len(), 2);
        assert_eq!(s.iter().collect::<Vec<_>>(), vec![(ymd(1958, 3), 9.0), (ymd(1958, 4), 2.0)]);
    }

    #[test]
    fn standard_configs_differ_by_series() {
        let ppm = PlotConfig::standard(SeriesKind::Ppm, ChartKind::Bar, Backend::Express);
        assert!(ppm.compress_value_axis);
        assert_eq!(ppm.file_name, "co2_ppm_bar_express");

        let yoy = PlotConfig::standard(SeriesKind::Yoy, ChartKind::Line, Backend::Svg);
        assert!(!yoy.compress_value_axis);
        assert_eq!(yoy.value_label, "YoY % Change");
    }

    #[test]
    fn defaults_match_inline_constants() {
        let cfg = PlotConfig::default();
        assert_eq!(cfg.kind, ChartKind::Line);
        assert_eq!(cfg.date_label, "Dates");
        assert_eq!(cfg.value_label, "Values");
        assert_eq!(cfg.file_name, "test_plot");
        assert!(!cfg.compress_value_axis);
    }
}
