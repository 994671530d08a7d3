//! Top-level application orchestration.
//!
//! `src/main.rs` only sets up logging; this module is the "real main" that:
//! - parses CLI arguments
//! - layers CLI overrides on top of the environment configuration
//! - runs the requested command

use std::time::Duration;

use clap::Parser;

use crate::cli::{Command, RenderArgs, ServeArgs, SourceArgs};
use crate::config::AppConfig;
use crate::domain::Backend;
use crate::error::AppError;

pub mod pipeline;

use pipeline::RenderPlan;

/// Entry point for the `co2` binary.
pub fn run() -> Result<(), AppError> {
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Render(args) => handle_render(config, args),
        Command::Fetch(args) => handle_fetch(config, args),
        Command::Serve(args) => handle_serve(config, args),
    }
}

fn handle_render(mut config: AppConfig, args: RenderArgs) -> Result<(), AppError> {
    apply_source(&mut config, &args.source)?;
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }

    let plan = render_plan_from_args(&args);
    let run = pipeline::run_render(&config, &plan)?;

    println!("{}", crate::report::format_written(&run.written));
    Ok(())
}

fn handle_fetch(mut config: AppConfig, args: SourceArgs) -> Result<(), AppError> {
    apply_source(&mut config, &args)?;
    let records = pipeline::fetch_records(&config)?;
    print!("{}", crate::report::format_fetch_summary(&records));
    Ok(())
}

fn handle_serve(mut config: AppConfig, args: ServeArgs) -> Result<(), AppError> {
    apply_source(&mut config, &args.source)?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    crate::web::serve(&config)
}

fn apply_source(config: &mut AppConfig, args: &SourceArgs) -> Result<(), AppError> {
    if let Some(url) = &args.url {
        config.api_url = url.clone();
    }
    if let Some(secs) = args.timeout {
        config.timeout = Duration::from_secs(secs);
    }
    config.validate()
}

pub fn render_plan_from_args(args: &RenderArgs) -> RenderPlan {
    let defaults = RenderPlan::default();
    RenderPlan {
        series: args.series.map(|s| vec![s]).unwrap_or(defaults.series),
        charts: args.chart.map(|c| vec![c]).unwrap_or(defaults.charts),
        backends: if args.all_backends {
            Backend::ALL.to_vec()
        } else {
            args.backend.map(|b| vec![b]).unwrap_or(defaults.backends)
        },
    }
}

/// Rewrite argv so `co2` defaults to `co2 render`.
///
/// Rules:
/// - `co2`                      -> `co2 render`
/// - `co2 --backend svg ...`    -> `co2 render --backend svg ...`
/// - `co2 --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("render".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "render" | "fetch" | "serve");
    if is_subcommand {
        return argv;
    }

    // A leading flag belongs to `render`.
    if arg1.starts_with('-') {
        argv.insert(1, "render".to_string());
        return argv;
    }

    argv
}
