//! Service and scraper status.
//!
//! A registry of known local services with a bounded TCP probe for live
//! status, replacing hand-maintained status strings.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;

/// How long a single port probe may take.
const PROBE_TIMEOUT: Duration = Duration::from_millis(300);

/// Status of one known service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub name: String,
    pub port: u16,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// Status of one scraper job.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scraper {
    pub name: String,
    pub status: String,
    pub config_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

/// The known local services and the ports they listen on.
fn service_registry() -> Vec<(&'static str, u16, &'static str)> {
    vec![
        ("Ollama Server", 11434, "ollama-log.txt"),
        ("News Scraper", 5000, "news-scraper-log.txt"),
        ("Stock Scraper", 5001, "stock-scraper-log.txt"),
        ("Event Correlation Scraper", 5002, "event-correlation-log.txt"),
        ("Market Data Aggregator", 6000, "market-data-log.txt"),
        ("Sentiment Analysis Dashboard", 7000, "sentiment-dashboard-log.txt"),
        ("Analytics Engine", 9100, "analytics-engine-log.txt"),
    ]
}

/// Probe a local port, true when something accepts the connection.
async fn port_open(port: u16) -> bool {
    matches!(
        timeout(PROBE_TIMEOUT, TcpStream::connect(("127.0.0.1", port))).await,
        Ok(Ok(_))
    )
}

/// Check the status of all registered services with live port probes.
pub async fn service_status() -> Vec<ServiceStatus> {
    let mut services = Vec::new();
    for (name, port, log_file) in service_registry() {
        let status = if port_open(port).await {
            "Running"
        } else {
            "Not Running"
        };
        services.push(ServiceStatus {
            name: name.to_string(),
            port,
            status: status.to_string(),
            log_file: Some(log_file.to_string()),
        });
    }
    services
}

/// List known scrapers; status follows the port of their host service.
pub async fn scraper_status() -> Vec<Scraper> {
    let registry = [
        ("News Scraper", 5000, "/scrapers/news/config"),
        ("Stock Scraper", 5001, "/scrapers/stock/config"),
        ("Event Correlation Scraper", 5002, "/scrapers/correlation/config"),
    ];

    let mut scrapers = Vec::new();
    for (name, port, config_url) in registry {
        let status = if port_open(port).await { "Running" } else { "Idle" };
        scrapers.push(Scraper {
            name: name.to_string(),
            status: status.to_string(),
            config_url: config_url.to_string(),
            log_file: Some(format!("{}-log.txt", name.to_lowercase().replace(' ', "-"))),
        });
    }
    scrapers
}
