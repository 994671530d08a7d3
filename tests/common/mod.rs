use std::thread::JoinHandle;
use std::time::Duration;

use co2_charts::config::AppConfig;

pub const PPM_FIXTURE: &str = r#"{"features": [{"attributes": {"Unit": "Parts Per Million", "Date": "1958M03", "Value": 315.7}}, {"attributes": {"Unit": "Parts Per Million", "Date": "1958M04", "Value": 317.45}}]}"#;

pub const MIXED_FIXTURE: &str = r#"{"features": [
    {"attributes": {"Indicator": "Monthly Atmospheric Co2 Concentrations", "Code": "ECNCIC_PPM", "Unit": "Parts Per Million", "Date": "1958M03", "Value": 315.7}},
    {"attributes": {"Indicator": "Monthly Atmospheric Co2 Concentrations", "Code": "ECNCIC_PPM", "Unit": "Parts Per Million", "Date": "1958M04", "Value": 317.45}},
    {"attributes": {"Indicator": "Monthly Atmospheric Co2 Concentrations", "Code": "ECNCIC_PPM", "Unit": "Parts Per Million", "Date": "1958M05", "Value": 317.51}},
    {"attributes": {"Indicator": "Year on Year Percentage Change", "Code": "ECNCIC_YOY", "Unit": "Percent", "Date": "1959M03", "Value": 0.3}},
    {"attributes": {"Indicator": "Year on Year Percentage Change", "Code": "ECNCIC_YOY", "Unit": "Percent", "Date": "1959M04", "Value": 0.09}},
    {"attributes": {"Indicator": "Year on Year Percentage Change", "Code": "ECNCIC_YOY", "Unit": "Percent", "Date": "1959M05", "Value": 0.25}}
]}"#;

/// Stand-in feature service: answers exactly one request, then exits.
pub fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let handle = std::thread::spawn(move || {
        if let Ok(request) = server.recv() {
            let response = tiny_http::Response::from_string(body).with_status_code(status);
            let _ = request.respond(response);
        }
    });
    (format!("http://{addr}/FeatureServer/0/query"), handle)
}

pub fn config_for(url: String, output_dir: &std::path::Path) -> AppConfig {
    AppConfig {
        api_url: url,
        timeout: Duration::from_secs(5),
        output_dir: output_dir.to_path_buf(),
        ..AppConfig::default()
    }
}
