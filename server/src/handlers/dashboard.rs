//! Operational dashboard handlers.
//!
//! `/` renders the HTML dashboard; `/api/dashboard` serves the same data as
//! JSON; `/api/analysis` relays an operational summary prompt to the LLM.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::ServerResult;
use crate::repo_scan::Repo;
use crate::services::{self, Scraper, ServiceStatus};
use crate::state::AppState;
use crate::sysinfo::{self, SystemInfo};

const ANALYSIS_PROMPT: &str =
    "Generate a brief analysis of the current state of services and active scrapers.";

/// A catalog entry as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    pub intent: String,
    pub matched_project: String,
    pub params: String,
}

/// Everything the dashboard shows, in one aggregate.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub system_info: SystemInfo,
    pub services: Vec<ServiceStatus>,
    pub projects: Vec<Repo>,
    pub scrapers: Vec<Scraper>,
    pub intents: Vec<IntentSummary>,
}

async fn gather(state: &AppState) -> DashboardData {
    let (system_info, services, scrapers, projects) = tokio::join!(
        sysinfo::load_system_info(),
        services::service_status(),
        services::scraper_status(),
        crate::handlers::repos::scan_projects(state),
    );

    let intents = state
        .matcher
        .catalog()
        .iter()
        .map(|record| IntentSummary {
            intent: record.intent.clone(),
            matched_project: record.project.clone(),
            params: record.params.clone(),
        })
        .collect();

    DashboardData {
        system_info,
        services,
        projects,
        scrapers,
        intents,
    }
}

/// `GET /api/dashboard`
pub async fn api_dashboard(State(state): State<Arc<AppState>>) -> Json<DashboardData> {
    Json(gather(&state).await)
}

/// `GET /`
pub async fn home(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(render_dashboard(&gather(&state).await))
}

/// `GET /api/analysis`
pub async fn analysis(State(state): State<Arc<AppState>>) -> ServerResult<Json<serde_json::Value>> {
    let analysis = state.ollama.generate(ANALYSIS_PROMPT).await?;
    Ok(Json(json!({ "analysis": analysis })))
}

/// Render the dashboard HTML from gathered data.
fn render_dashboard(data: &DashboardData) -> String {
    let mut html = String::with_capacity(8 * 1024);

    html.push_str(
        r#"<html>
<head>
    <title>Operational Dashboard</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; margin: 20px; }
        .section { margin-bottom: 20px; }
        .highlight { background-color: #d4edda; padding: 5px; border-radius: 3px; }
        table { width: 100%; border-collapse: collapse; margin-top: 10px; }
        th, td { border: 1px solid #ddd; padding: 8px; text-align: left; }
        th { background-color: #f2f2f2; }
    </style>
</head>
<body>
    <h1>Operational Dashboard</h1>
"#,
    );

    let info = &data.system_info;
    html.push_str(&format!(
        r#"    <div class="section">
        <h2>System Overview</h2>
        <p><strong>Hostname:</strong> {}</p>
        <p><strong>OS:</strong> {}</p>
        <p><strong>Uptime:</strong> {}</p>
        <p><strong>Kernel:</strong> {}</p>
        <p><strong>Architecture:</strong> {}</p>
    </div>
"#,
        escape(&info.hostname),
        escape(&info.os),
        escape(&info.uptime),
        escape(&info.kernel),
        escape(&info.architecture),
    ));

    html.push_str(
        r#"    <div class="section">
        <h2>Active Services</h2>
        <table>
            <thead><tr><th>Service</th><th>Port</th><th>Status</th></tr></thead>
            <tbody>
"#,
    );
    for service in &data.services {
        let class = if service.status == "Running" { "highlight" } else { "" };
        html.push_str(&format!(
            "            <tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td></tr>\n",
            escape(&service.name),
            service.port,
            class,
            escape(&service.status),
        ));
    }
    html.push_str("            </tbody>\n        </table>\n    </div>\n");

    html.push_str(
        r#"    <div class="section">
        <h2>Recently Worked On Projects</h2>
        <table>
            <thead><tr><th>Project</th><th>Actions</th></tr></thead>
            <tbody>
"#,
    );
    for project in &data.projects {
        html.push_str(&format!(
            "            <tr><td>{}</td><td><a href=\"/repo-details?project={}\">Details</a></td></tr>\n",
            escape(&project.name),
            escape(&project.name),
        ));
    }
    html.push_str("            </tbody>\n        </table>\n    </div>\n");

    html.push_str(
        r#"    <div class="section">
        <h2>Scraper Management</h2>
        <table>
            <thead><tr><th>Scraper</th><th>Status</th></tr></thead>
            <tbody>
"#,
    );
    for scraper in &data.scrapers {
        html.push_str(&format!(
            "            <tr><td>{}</td><td>{}</td></tr>\n",
            escape(&scraper.name),
            escape(&scraper.status),
        ));
    }
    html.push_str("            </tbody>\n        </table>\n    </div>\n");

    html.push_str(
        r#"    <div class="section">
        <h2>Embeddings and Intent Mapping</h2>
        <p>Known intents and the projects that fulfill them:</p>
        <ul>
"#,
    );
    for summary in &data.intents {
        html.push_str(&format!(
            "            <li><strong>Intent:</strong> {}<br><strong>Matched Project:</strong> {}<br><strong>Params:</strong> {}</li>\n",
            escape(&summary.intent),
            escape(&summary.matched_project),
            escape(&summary.params),
        ));
    }
    html.push_str("        </ul>\n    </div>\n</body>\n</html>\n");

    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
