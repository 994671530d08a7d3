//! ArcGIS feature-service client for the monthly atmospheric CO2 indicator.
//!
//! The service answers a query with
//! `{"features": [{"attributes": {"Indicator", "Code", "Unit", "Date", "Value"}}, ...]}`,
//! where `Date` is a `YYYYMmm` token. One GET fetches every record of both
//! series (concentration and year-over-year change).

use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::data::date::parse_year_month;
use crate::domain::{RawRecord, Series, SeriesKind};
use crate::error::AppError;
use crate::series::extract_series;

/// Status and body of the last response the client received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

pub struct FeatureClient {
    client: Client,
    url: String,
    last_response: Option<RawResponse>,
    last_records: Vec<RawRecord>,
}

impl FeatureClient {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.timeout).build().map_err(|e| {
            tracing::error!("failed to build HTTP client: {e}");
            AppError::config(format!("Failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            client,
            url: config.api_url.clone(),
            last_response: None,
            last_records: Vec::new(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// The response kept from the most recent request, for diagnostics.
    pub fn last_response(&self) -> Option<&RawResponse> {
        self.last_response.as_ref()
    }

    /// Records from the most recent successful fetch (empty before the first).
    pub fn records(&self) -> &[RawRecord] {
        &self.last_records
    }

    /// Extract `kind` from `records`, or from the most recent fetch when `None`.
    pub fn series(&self, records: Option<&[RawRecord]>, kind: SeriesKind) -> Series {
        extract_series(records.unwrap_or(&self.last_records), kind)
    }

    /// Fetch and parse every record.
    ///
    /// A non-success status is a `RemoteRequest` error carrying that status. A
    /// malformed date anywhere in the list aborts the whole fetch.
    pub fn fetch_records(&mut self) -> Result<Vec<RawRecord>, AppError> {
        tracing::debug!(url = %self.url, "requesting CO2 features");

        let resp = self.client.get(&self.url).send().map_err(|e| {
            tracing::error!(url = %self.url, "CO2 request failed: {e}");
            AppError::remote(e.status().map(|s| s.as_u16()), format!("CO2 request failed: {e}"))
        })?;

        let status = resp.status();
        let body = resp.text().map_err(|e| {
            tracing::error!(%status, "failed to read CO2 response body: {e}");
            AppError::remote(Some(status.as_u16()), format!("Failed to read CO2 response body: {e}"))
        })?;
        self.last_response = Some(RawResponse {
            status: status.as_u16(),
            body,
        });

        if !status.is_success() {
            tracing::error!(%status, url = %self.url, "CO2 request returned an error status");
            return Err(AppError::remote(
                Some(status.as_u16()),
                format!("CO2 request failed with status {status}."),
            ));
        }

        let body = self.last_response.as_ref().map(|r| r.body.as_str()).unwrap_or_default();
        let records = parse_features(body)?;
        tracing::info!(count = records.len(), "fetched CO2 records");
        self.last_records = records.clone();
        Ok(records)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    features: Option<Vec<Feature>>,
    error: Option<ServiceError>,
}

/// Error envelope ArcGIS returns (with HTTP 200) for rejected queries.
#[derive(Debug, Deserialize)]
struct ServiceError {
    code: Option<u16>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    attributes: Attributes,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Attributes {
    indicator: Option<String>,
    code: Option<String>,
    unit: String,
    date: String,
    value: Option<f64>,
}

/// Parse a feature-service JSON body into records.
///
/// A body without a `features` key yields no records. Records with a `null`
/// value are skipped; a malformed date is a `Format` error.
pub fn parse_features(body: &str) -> Result<Vec<RawRecord>, AppError> {
    let parsed: QueryResponse = serde_json::from_str(body).map_err(|e| {
        tracing::error!("failed to parse CO2 response: {e}");
        AppError::decode(format!("Failed to parse CO2 response: {e}"))
    })?;

    let features = match (parsed.features, parsed.error) {
        (Some(features), _) => features,
        (None, Some(err)) => {
            let message = err.message.unwrap_or_else(|| "unknown error".to_string());
            tracing::error!(code = ?err.code, "feature service rejected the query: {message}");
            return Err(AppError::remote(
                err.code,
                format!("Feature service rejected the query: {message}"),
            ));
        }
        (None, None) => {
            tracing::warn!("CO2 response has no 'features' key; treating as empty");
            Vec::new()
        }
    };

    let mut out = Vec::with_capacity(features.len());
    for feature in features {
        let attrs = feature.attributes;
        let date = parse_year_month(&attrs.date)?;
        let Some(value) = attrs.value else {
            tracing::warn!(date = %date, unit = %attrs.unit, "skipping record with null value");
            continue;
        };
        out.push(RawRecord {
            indicator: attrs.indicator.unwrap_or_default(),
            code: attrs.code.unwrap_or_default(),
            unit: attrs.unit,
            date,
            value,
        });
    }

    Ok(out)
}
