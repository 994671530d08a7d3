//! Command-line parsing for the CO2 chart tool.
//!
//! Parsing only; dispatch lives in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{Backend, ChartKind, SeriesKind};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "co2", version, about = "Atmospheric CO2 charts from the climate-indicator feature service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch once, then write one HTML chart per series/visual/backend combination.
    Render(RenderArgs),
    /// Fetch once and print record counts per unit.
    Fetch(SourceArgs),
    /// Serve the concentration chart at `/`, fetching on every request.
    Serve(ServeArgs),
}

/// Where to fetch from.
#[derive(Debug, Args, Clone, Default)]
pub struct SourceArgs {
    /// Feature-service query URL.
    #[arg(long)]
    pub url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Options for `co2 render`.
#[derive(Debug, Args, Clone, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only this series (default: both).
    #[arg(long, value_enum)]
    pub series: Option<SeriesKind>,

    /// Only this visual (default: line and bar).
    #[arg(long, value_enum)]
    pub chart: Option<ChartKind>,

    /// Chart backend (default: objects).
    #[arg(long, value_enum)]
    pub backend: Option<Backend>,

    /// Render with every backend.
    #[arg(long, conflicts_with = "backend")]
    pub all_backends: bool,

    /// Directory for the HTML files.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Options for `co2 serve`.
#[derive(Debug, Args, Clone, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Address to listen on.
    #[arg(long, value_name = "ADDR")]
    pub bind: Option<String>,
}
