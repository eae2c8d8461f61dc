//! Host metadata via shell command wrappers.
//!
//! Each field degrades to "unknown" when its command fails; gathering system
//! information never errors a request.

use serde::{Deserialize, Serialize};
use tokio::process::Command;

/// Basic system information for the dashboard header.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub hostname: String,
    pub os: String,
    pub uptime: String,
    pub kernel: String,
    pub architecture: String,
}

/// Run a command and return its trimmed stdout, or None on any failure.
async fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().await.ok()?;
    if !output.status.success() {
        tracing::debug!("{} {:?} exited with {}", program, args, output.status);
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn or_unknown(value: Option<String>) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or_else(|| "unknown".to_string())
}

/// Gather system information from host commands.
pub async fn load_system_info() -> SystemInfo {
    let hostname = command_output("hostname", &[]).await;
    let os = command_output("lsb_release", &["-d"])
        .await
        .map(|s| s.replace("Description:\t", "").trim().to_string());
    let uptime = command_output("uptime", &["-p"]).await;
    let kernel = command_output("uname", &["-r"]).await;
    let architecture = command_output("uname", &["-m"]).await;

    SystemInfo {
        hostname: or_unknown(hostname),
        os: or_unknown(os),
        uptime: or_unknown(uptime),
        kernel: or_unknown(kernel),
        architecture: or_unknown(architecture),
    }
}
