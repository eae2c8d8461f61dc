//! Intentdash Server Library
//!
//! HTTP service exposing semantic intent-to-project matching together with an
//! operational dashboard: host metadata, recently touched project
//! directories, local service status, and an LLM analysis relay.

pub mod error;
pub mod handlers;
pub mod ollama;
pub mod repo_scan;
pub mod services;
pub mod state;
pub mod sysinfo;

pub use error::ServerError;
pub use handlers::router;
pub use state::AppState;
