//! Runtime configuration.
//!
//! Defaults live here rather than as scattered constants; `.env` and
//! environment variables can override them, and the CLI overrides both.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::AppError;

/// Monthly atmospheric CO2 feature service query (all records, JSON output).
pub const ATMOSPHERIC_CO2_URL: &str = concat!(
    "https://services9.arcgis.com",
    "/weJ1QsnbMYJlCHdG/arcgis/rest/services",
    "/Indicator_3_2_Climate_Indicators",
    "_Monthly_Atmospheric_Carbon_Dioxide_concentrations",
    "/FeatureServer/0/query?",
    "where=1%3D1&outFields=Indicator,Code,Unit,Date,Value&",
    "outSR=4326&f=json",
);

pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
pub const DEFAULT_OUTPUT_DIR: &str = "plot_files";
pub const DEFAULT_BIND_ADDR: &str = "localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub output_dir: PathBuf,
    pub bind_addr: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: ATMOSPHERIC_CO2_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }
}

impl AppConfig {
    /// Defaults overlaid with `.env` / process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with whatever `lookup` returns for each known key.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(url) = lookup("CO2_API_URL") {
            config.api_url = url;
        }
        if let Some(raw) = lookup("CO2_TIMEOUT_SECS") {
            config.timeout = parse_timeout(&raw)?;
        }
        if let Some(dir) = lookup("CO2_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        if let Some(addr) = lookup("CO2_BIND_ADDR") {
            config.bind_addr = addr;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.api_url.trim().is_empty() {
            tracing::error!("empty API URL in configuration");
            return Err(AppError::config("API URL must not be empty."));
        }
        if self.timeout.is_zero() {
            tracing::error!("zero request timeout in configuration");
            return Err(AppError::config("Request timeout must be at least one second."));
        }
        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, AppError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|e| {
            tracing::error!(value = raw, "invalid CO2_TIMEOUT_SECS: {e}");
            AppError::config(format!("Invalid CO2_TIMEOUT_SECS '{raw}': {e}"))
        })
}
