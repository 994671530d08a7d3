//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - fetched observations (`RawRecord`)
//! - the date → value `Series` and its `TransposedSeries` view
//! - rendering options (`PlotConfig`, `ChartKind`, `Backend`, `SeriesKind`)

pub mod types;

pub use types::*;
