//! Minimal web endpoint: `GET /` returns a freshly fetched concentration chart.
//!
//! Requests are handled one at a time on the calling thread. Every request
//! performs its own fetch; nothing is cached between requests.

use tiny_http::{Header, Method, Request, Response, Server};

use crate::app::pipeline::{fetch_records, render_series_html};
use crate::config::AppConfig;
use crate::domain::{Backend, ChartKind, PlotConfig, SeriesKind};
use crate::error::AppError;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Status, content type and body for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl Reply {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_CONTENT_TYPE,
            body: body.into(),
        }
    }
}

/// Bind `config.bind_addr` and serve until the process exits.
pub fn serve(config: &AppConfig) -> Result<(), AppError> {
    let server = Server::http(config.bind_addr.as_str()).map_err(|e| {
        tracing::error!(addr = %config.bind_addr, "failed to bind web endpoint: {e}");
        AppError::server(format!("Failed to bind '{}': {e}", config.bind_addr))
    })?;
    tracing::info!(addr = %config.bind_addr, "serving CO2 chart at /");

    for request in server.incoming_requests() {
        handle(config, request);
    }
    Ok(())
}

fn handle(config: &AppConfig, request: Request) {
    let reply = route(config, request.method(), request.url());
    tracing::info!(method = %request.method(), url = request.url(), status = reply.status, "handled request");

    let mut response = Response::from_string(reply.body).with_status_code(reply.status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], reply.content_type.as_bytes()) {
        response = response.with_header(header);
    }
    if let Err(e) = request.respond(response) {
        tracing::warn!("failed to send response: {e}");
    }
}

/// Decide the reply for a method and request target.
pub fn route(config: &AppConfig, method: &Method, url: &str) -> Reply {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    if path != "/" {
        return Reply::text(404, "Not Found");
    }
    if *method != Method::Get {
        return Reply::text(405, "Method Not Allowed");
    }

    match index_html(config) {
        Ok(body) => Reply {
            status: 200,
            content_type: HTML_CONTENT_TYPE,
            body,
        },
        // Already logged where it was detected.
        Err(err) => Reply::text(502, format!("Unable to build chart: {err}")),
    }
}

fn index_html(config: &AppConfig) -> Result<String, AppError> {
    let records = fetch_records(config)?;
    let plot = PlotConfig::standard(SeriesKind::Ppm, ChartKind::Line, Backend::Objects);
    render_series_html(&records, SeriesKind::Ppm, &plot)
}
