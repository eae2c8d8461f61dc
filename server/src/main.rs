//! Intentdash Server Entry Point
//!
//! Loads the word embedding table and project catalog once, then serves the
//! dashboard and intent matching API over HTTP. A catalog or table change
//! requires a restart.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intentdash_match::embedding::{CATALOG_FILE, WORD_TABLE_FILE};
use intentdash_match::{
    find_data_file, Catalog, IntentMatcher, MatcherConfig, Vectorizer, WordTable,
};
use intentdash_server::ollama::{OllamaClient, DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL};
use intentdash_server::{repo_scan, router, AppState};

#[derive(Parser)]
#[command(name = "intentdash-server")]
#[command(about = "Operational dashboard with semantic intent matching")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1:8085")]
    bind: SocketAddr,

    /// Word embedding table (JSON object of token -> vector)
    #[arg(long)]
    word_table: Option<PathBuf>,

    /// Intent catalog (JSON array of intent records)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Pin the embedding dimension instead of deriving it from the table
    #[arg(long)]
    dimension: Option<usize>,

    /// Report "no match" for best scores below this similarity
    #[arg(long)]
    min_similarity: Option<f32>,

    /// Base paths scanned for recent projects (defaults to PROJECT_PATHS or $HOME)
    #[arg(long = "project-path")]
    project_paths: Vec<PathBuf>,

    /// Ollama generate endpoint for dashboard analysis
    #[arg(long, default_value = DEFAULT_OLLAMA_URL)]
    ollama_url: String,

    /// Ollama model name
    #[arg(long, default_value = DEFAULT_OLLAMA_MODEL)]
    ollama_model: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intentdash_server=info,intentdash_match=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::info!("Starting intentdash server");

    let state = match build_state(&args) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("Startup failed: {}", e);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(args.bind).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("Cannot bind {}: {}", args.bind, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Server running on {}", args.bind);
    if let Err(e) = axum::serve(listener, router(state)).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load all static resources. Any failure here is fatal to startup.
fn build_state(args: &Args) -> intentdash_match::Result<AppState> {
    let table_path = match &args.word_table {
        Some(path) => path.clone(),
        None => find_data_file(WORD_TABLE_FILE)?,
    };
    let catalog_path = match &args.catalog {
        Some(path) => path.clone(),
        None => find_data_file(CATALOG_FILE)?,
    };

    let table = Arc::new(match args.dimension {
        Some(dimension) => WordTable::load_with_dimension(&table_path, dimension)?,
        None => WordTable::load(&table_path)?,
    });
    // Records without a precomputed vector are vectorized against the
    // runtime table at load
    let vectorizer = Vectorizer::new(table.clone());
    let catalog = Catalog::load_with_vectorizer(&catalog_path, &vectorizer)?;

    tracing::info!(
        "Matching over {} intents with {} word vectors ({}d)",
        catalog.len(),
        table.len(),
        table.dimension()
    );

    let matcher = IntentMatcher::with_config(
        table,
        catalog,
        MatcherConfig {
            min_similarity: args.min_similarity,
        },
    );

    let project_paths = repo_scan::base_paths(&args.project_paths);
    tracing::info!("Scanning project paths: {:?}", project_paths);

    let ollama = OllamaClient::new(
        reqwest::Client::new(),
        args.ollama_url.clone(),
        args.ollama_model.clone(),
    );

    Ok(AppState::new(matcher, project_paths, ollama))
}
