//! Data file discovery utilities
//!
//! Finds the word table and catalog documents across installation scenarios.

use std::path::{Path, PathBuf};

use crate::error::{MatchError, Result};

/// Default word table file name
pub const WORD_TABLE_FILE: &str = "word_embeddings.json";

/// Default catalog file name
pub const CATALOG_FILE: &str = "embeddings.json";

/// Find a data file with priority:
/// 1. INTENTDASH_DATA_DIR environment variable
/// 2. `data/` under the current working directory
/// 3. User home directory (~/.intentdash/data)
pub fn find_data_file(file_name: &str) -> Result<PathBuf> {
    // Priority 1: INTENTDASH_DATA_DIR
    if let Ok(data_dir) = std::env::var("INTENTDASH_DATA_DIR") {
        let path = Path::new(&data_dir).join(file_name);
        if path.exists() {
            log::info!("Using INTENTDASH_DATA_DIR: {}", path.display());
            return Ok(path);
        }
        log::warn!(
            "INTENTDASH_DATA_DIR set but {} not found in {}",
            file_name,
            data_dir
        );
    }

    // Priority 2: local data directory
    if let Ok(cwd) = std::env::current_dir() {
        let local = cwd.join("data").join(file_name);
        if local.exists() {
            log::info!("Using local data file: {}", local.display());
            return Ok(local);
        }
    }

    // Priority 3: user home directory
    if let Some(home) = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE")) {
        let user_path = PathBuf::from(home)
            .join(".intentdash")
            .join("data")
            .join(file_name);
        if user_path.exists() {
            log::info!("Using user data file: {}", user_path.display());
            return Ok(user_path);
        }
    }

    Err(MatchError::Io(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!(
            "{} not found. Checked:\n\
             - INTENTDASH_DATA_DIR environment variable\n\
             - ./data/{}\n\
             - ~/.intentdash/data/{}",
            file_name, file_name, file_name
        ),
    )))
}
