//! Project directory scanning.
//!
//! Lists recently touched project directories under configured base paths,
//! detects entry-point files, and infers intents from marker files.
//! Unreadable bases are logged and skipped; scanning never fails the caller.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tokio::process::Command;
use tokio::time::timeout;

/// Maximum number of repos reported by a scan.
const SCAN_LIMIT: usize = 10;

/// How long a `git status` call may take.
const GIT_TIMEOUT: Duration = Duration::from_secs(5);

/// File suffixes treated as runnable entry points.
const ENTRY_POINT_SUFFIXES: &[&str] = &[".rs", ".go", ".clj", ".js", ".py", ".sh"];

/// Marker files that hint at what a directory is for.
const INTENT_MARKERS: &[&str] = &[
    "README.md",
    "docs",
    "Makefile",
    "build.sh",
    "run.sh",
    "requirements.txt",
    "Cargo.toml",
    "pom.xml",
    "Dockerfile",
];

/// A recently modified project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repo {
    pub name: String,
    pub path: PathBuf,
    #[serde(default)]
    pub entry_points: Vec<String>,
    #[serde(default)]
    pub intents: Vec<String>,
    /// Seconds since the Unix epoch of the last modification
    pub last_modified: u64,
}

/// Base paths to scan, from explicit config, PROJECT_PATHS, or `$HOME` defaults.
pub fn base_paths(configured: &[PathBuf]) -> Vec<PathBuf> {
    if !configured.is_empty() {
        return configured.to_vec();
    }

    if let Ok(paths) = std::env::var("PROJECT_PATHS") {
        return paths.split(':').filter(|p| !p.is_empty()).map(PathBuf::from).collect();
    }

    match std::env::var_os("HOME") {
        Some(home) => {
            let home = PathBuf::from(home);
            vec![home.join("Projects"), home.join("src")]
        }
        None => Vec::new(),
    }
}

/// Scan base paths for non-hidden project directories, newest first.
///
/// Directories are deduplicated by name across bases and capped at the scan
/// limit. A base that cannot be read is logged and skipped.
pub fn recently_modified(bases: &[PathBuf]) -> Vec<Repo> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut repos = Vec::new();

    for base in bases {
        let entries = match std::fs::read_dir(base) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read project base {}: {}", base.display(), e);
                continue;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') || seen.contains(&name) {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if !metadata.is_dir() {
                continue;
            }

            let path = entry.path();
            let last_modified = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);

            repos.push(Repo {
                name: name.clone(),
                entry_points: find_entry_points(&path),
                intents: infer_intents(&path),
                path,
                last_modified,
            });
            seen.insert(name);
        }
    }

    repos.sort_by(|a, b| b.last_modified.cmp(&a.last_modified));
    repos.truncate(SCAN_LIMIT);
    repos
}

/// List entry-point files directly under a directory.
fn find_entry_points(path: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(path) else {
        return Vec::new();
    };

    entries
        .flatten()
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            ENTRY_POINT_SUFFIXES
                .iter()
                .any(|suffix| name.ends_with(suffix))
                .then_some(name)
        })
        .collect()
}

/// Infer what a directory is for from well-known marker files.
fn infer_intents(path: &Path) -> Vec<String> {
    let mut intents: Vec<String> = INTENT_MARKERS
        .iter()
        .filter(|marker| path.join(marker).exists())
        .map(|marker| format!("Contains {marker}"))
        .collect();

    if path.join(".git").exists() {
        intents.push("Git Repository".to_string());
    }

    intents
}

/// Detailed information about one project directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepoDetails {
    pub name: String,
    pub path: PathBuf,
    pub last_modified: u64,
    pub entry_points: Vec<String>,
    pub intents: Vec<String>,
    /// Output of `git status --short`, when the directory is a git repo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_status: Option<String>,
}

/// Resolve a project name against the scanned bases directly.
///
/// Follows the same hidden-name and first-base-wins rules as the scan, but
/// without the recency cap: a project older than the ten most recent still
/// resolves.
pub fn find_repo(bases: &[PathBuf], name: &str) -> Option<Repo> {
    if name.starts_with('.') || name.contains(std::path::MAIN_SEPARATOR) {
        return None;
    }

    for base in bases {
        let path = base.join(name);
        let Ok(metadata) = std::fs::metadata(&path) else {
            continue;
        };
        if !metadata.is_dir() {
            continue;
        }

        let last_modified = metadata
            .modified()
            .ok()
            .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
            .map(|d| d.as_secs())
            .unwrap_or(0);

        return Some(Repo {
            name: name.to_string(),
            entry_points: find_entry_points(&path),
            intents: infer_intents(&path),
            path,
            last_modified,
        });
    }

    None
}

/// Look up a repo by name and collect its details.
///
/// The `git status` call runs off the runtime's worker threads with a bounded
/// timeout; a slow or wedged git degrades to no status, not a stalled server.
pub async fn repo_details(bases: &[PathBuf], name: &str) -> Option<RepoDetails> {
    let repo = find_repo(bases, name)?;

    let git_status = match timeout(
        GIT_TIMEOUT,
        Command::new("git")
            .arg("-C")
            .arg(&repo.path)
            .args(["status", "--short"])
            .output(),
    )
    .await
    {
        Ok(Ok(output)) if output.status.success() => {
            Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
        }
        Ok(_) => None,
        Err(_) => {
            tracing::warn!("git status timed out for {}", repo.path.display());
            None
        }
    };

    Some(RepoDetails {
        name: repo.name,
        path: repo.path,
        last_modified: repo.last_modified,
        entry_points: repo.entry_points,
        intents: repo.intents,
        git_status,
    })
}
