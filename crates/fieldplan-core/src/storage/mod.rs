mod config;
pub mod draft;
pub mod token;

pub use config::Config;
pub use draft::{DraftStore, FileDraftStore, MemoryDraftStore};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns `~/.config/fieldplan[-dev]/` based on FIELDPLAN_ENV.
///
/// Set FIELDPLAN_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("FIELDPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("fieldplan-dev")
    } else {
        base_dir.join("fieldplan")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
