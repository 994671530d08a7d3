//! `co2-charts` library crate.
//!
//! The binary (`co2`) is a thin wrapper around this library so that:
//!
//! - the fetch/reshape/render pipeline is testable without spawning processes
//! - the web endpoint and the CLI share one implementation

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
pub mod series;
pub mod web;
